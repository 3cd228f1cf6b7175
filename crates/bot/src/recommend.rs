//! Restaurant carousel cards.

use eatba_catalog::{ImageResolver, Sampler};
use eatba_core::catalog::RestaurantRecord;
use eatba_core::reply::{Action, CarouselCard};
use tracing::debug;

pub const ADDRESS_LABEL: &str = "餐廳地址";
pub const PHONE_LABEL: &str = "聯絡電話";
pub const REVIEW_LABEL: &str = "餐廳評價";

const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Google Maps search link for an address.
pub fn map_search_url(address: &str) -> String {
    format!("{MAP_SEARCH_URL}{}", urlencoding::encode(address))
}

/// Text echoed back when the phone button is tapped.
pub fn phone_reply(name: &str, phone: &str) -> String {
    format!("{name}の聯絡電話： {phone}")
}

/// Text echoed back when the review button is tapped.
pub fn review_reply(name: &str, review: &str) -> String {
    format!("{name}の餐廳評價：{review}")
}

/// Build the carousel card of one restaurant.
pub async fn restaurant_card(
    record: &RestaurantRecord,
    images: &ImageResolver,
    sampler: &Sampler,
) -> CarouselCard {
    let image_url = images.resolve(record, sampler).await;
    debug!(restaurant = %record.name, image_url = %image_url, "Generated image URL");

    let name = record.name.as_str();
    CarouselCard::restaurant(
        name,
        record.opening_hours.as_str(),
        image_url,
        Action::open_link(ADDRESS_LABEL, map_search_url(record.address_or_placeholder())),
        Action::fixed_reply(
            PHONE_LABEL,
            format!("{name}の{PHONE_LABEL}"),
            phone_reply(name, record.phone_or_placeholder()),
        ),
        Action::fixed_reply(
            REVIEW_LABEL,
            format!("{name}の{REVIEW_LABEL}"),
            review_reply(name, record.review_or_placeholder()),
        ),
    )
}
