//! Catalog domain types: restaurants grouped by meal-time and district.
//!
//! The catalog is built once at startup and is read-only afterwards.
//! Each meal-time partition lives behind an `Arc` so session state can
//! reference it without copying.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shown when a record has no phone number.
pub const PLACEHOLDER_PHONE: &str = "這是電話";
/// Map search target when a record has no address.
pub const PLACEHOLDER_ADDRESS: &str = "台中市政府";
/// Shown when a record has no review.
pub const PLACEHOLDER_REVIEW: &str = "這是評論";

/// One restaurant row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub name: String,
    pub opening_hours: String,
    #[serde(default)]
    pub phone: String,
    pub district: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub review: String,
}

impl RestaurantRecord {
    /// Folder key under the image store: `{district}_{name}`.
    pub fn image_folder_key(&self) -> String {
        format!("{}_{}", self.district, self.name)
    }

    pub fn phone_or_placeholder(&self) -> &str {
        non_empty_or(&self.phone, PLACEHOLDER_PHONE)
    }

    pub fn address_or_placeholder(&self) -> &str {
        non_empty_or(&self.address, PLACEHOLDER_ADDRESS)
    }

    pub fn review_or_placeholder(&self) -> &str {
        non_empty_or(&self.review, PLACEHOLDER_REVIEW)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

/// The top-level meal-time partition of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealTime {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealTime {
    /// All meal times in menu order.
    pub const ALL: [MealTime; 3] = [MealTime::Breakfast, MealTime::Lunch, MealTime::Dinner];

    /// The hashtag command a user sends to select this meal time.
    pub fn hashtag(self) -> &'static str {
        match self {
            MealTime::Breakfast => "#文青早餐",
            MealTime::Lunch => "#在地午餐",
            MealTime::Dinner => "#高檔晚餐",
        }
    }

    /// Human label shown on the meal-time menu button.
    pub fn label(self) -> &'static str {
        match self {
            MealTime::Breakfast => "享用文青早點",
            MealTime::Lunch => "品嘗在地美食",
            MealTime::Dinner => "暢享高檔餐廳",
        }
    }

    /// File stem of the dataset backing this partition.
    pub fn dataset_stem(self) -> &'static str {
        match self {
            MealTime::Breakfast => "breakfast_rest",
            MealTime::Lunch => "lunch_rest",
            MealTime::Dinner => "dinner_rest",
        }
    }

    /// Resolve a full hashtag message (e.g. `#文青早餐`) to a meal time.
    pub fn from_hashtag(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|meal| meal.hashtag() == text)
    }
}

impl std::fmt::Display for MealTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dataset_stem())
    }
}

/// District name → restaurants in that district, in load order.
///
/// Districts iterate in sorted order. A district key is only present when
/// it has at least one restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistrictGroups {
    groups: BTreeMap<String, Vec<RestaurantRecord>>,
}

impl DistrictGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group records by their `district` field, preserving load order within a group.
    pub fn from_records(records: impl IntoIterator<Item = RestaurantRecord>) -> Self {
        let mut groups: BTreeMap<String, Vec<RestaurantRecord>> = BTreeMap::new();
        for record in records {
            groups.entry(record.district.clone()).or_default().push(record);
        }
        Self { groups }
    }

    /// Restaurants of one district, if the district exists.
    pub fn get(&self, district: &str) -> Option<&[RestaurantRecord]> {
        self.groups.get(district).map(Vec::as_slice)
    }

    /// District names in sorted order.
    pub fn districts(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of districts.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of restaurants across all districts.
    pub fn restaurant_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// The full, immutable restaurant catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    breakfast: Arc<DistrictGroups>,
    lunch: Arc<DistrictGroups>,
    dinner: Arc<DistrictGroups>,
}

impl Catalog {
    pub fn new(breakfast: DistrictGroups, lunch: DistrictGroups, dinner: DistrictGroups) -> Self {
        Self {
            breakfast: Arc::new(breakfast),
            lunch: Arc::new(lunch),
            dinner: Arc::new(dinner),
        }
    }

    /// The shared partition for a meal time.
    pub fn partition(&self, meal: MealTime) -> Arc<DistrictGroups> {
        match meal {
            MealTime::Breakfast => self.breakfast.clone(),
            MealTime::Lunch => self.lunch.clone(),
            MealTime::Dinner => self.dinner.clone(),
        }
    }

    /// Number of restaurants across all partitions.
    pub fn restaurant_count(&self) -> usize {
        MealTime::ALL
            .into_iter()
            .map(|meal| self.partition(meal).restaurant_count())
            .sum()
    }
}
