//! Restaurant catalog for Eatba.
//!
//! - **Loader**: reads the three meal-time CSV datasets into a `Catalog`
//! - **Sampler**: seedable random draws of restaurants and images
//! - **Images**: resolves a restaurant's card image from the image store

pub mod images;
pub mod loader;
pub mod sampler;

pub use images::{IMAGE_ROUTE, ImageResolver};
pub use loader::CatalogLoader;
pub use sampler::Sampler;
