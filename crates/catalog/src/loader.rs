//! CSV catalog loader.
//!
//! Each meal time has its own dataset `<data_dir>/<stem>.csv`. The first row
//! is a header; every following row holds, by position:
//! `name, opening_hours, phone, district, address, review`.
//! A row missing any of the six fields is dropped entirely.

use eatba_core::catalog::{Catalog, DistrictGroups, MealTime, RestaurantRecord};
use eatba_core::error::CatalogError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FIELD_COUNT: usize = 6;

/// Loads the restaurant catalog from a directory of CSV files.
pub struct CatalogLoader {
    data_dir: PathBuf,
}

impl CatalogLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Dataset path for one meal time.
    pub fn dataset_path(&self, meal: MealTime) -> PathBuf {
        self.data_dir.join(format!("{}.csv", meal.dataset_stem()))
    }

    /// Load all three partitions.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let breakfast = self.load_partition(MealTime::Breakfast)?;
        let lunch = self.load_partition(MealTime::Lunch)?;
        let dinner = self.load_partition(MealTime::Dinner)?;
        let catalog = Catalog::new(breakfast, lunch, dinner);
        info!(
            restaurants = catalog.restaurant_count(),
            data_dir = %self.data_dir.display(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Load and group one meal-time dataset.
    pub fn load_partition(&self, meal: MealTime) -> Result<DistrictGroups, CatalogError> {
        let path = self.dataset_path(meal);
        if !path.exists() {
            return Err(CatalogError::NotFound { path });
        }

        let file = std::fs::File::open(&path).map_err(|e| CatalogError::ReadFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let records = parse_records(file, &path)?;
        let groups = DistrictGroups::from_records(records);
        info!(
            meal = %meal,
            districts = groups.len(),
            restaurants = groups.restaurant_count(),
            "Loaded meal-time partition"
        );
        Ok(groups)
    }
}

/// Parse dataset rows, dropping any row with a missing or blank field.
///
/// `path` is only used for error messages.
pub fn parse_records<R: Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<RestaurantRecord>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in csv_reader.records() {
        let row = row.map_err(|e| CatalogError::MalformedRow {
            path: path.to_path_buf(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;

        let fields: Vec<&str> = row.iter().take(FIELD_COUNT).collect();
        if fields.len() < FIELD_COUNT || fields.iter().any(|f| f.is_empty()) {
            dropped += 1;
            debug!(
                line = row.position().map(|p| p.line()).unwrap_or(0),
                "Dropping incomplete restaurant row"
            );
            continue;
        }

        records.push(RestaurantRecord {
            name: fields[0].to_string(),
            opening_hours: fields[1].to_string(),
            phone: fields[2].to_string(),
            district: fields[3].to_string(),
            address: fields[4].to_string(),
            review: fields[5].to_string(),
        });
    }

    if dropped > 0 {
        info!(path = %path.display(), dropped, kept = records.len(), "Dropped incomplete rows");
    }

    Ok(records)
}
