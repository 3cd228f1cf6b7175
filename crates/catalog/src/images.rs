//! Restaurant image resolution.
//!
//! Photos live in `<image_dir>/<district>_<name>/`. One file is picked at
//! random per card and exposed through the gateway's static route. Any miss
//! (no public URL, no folder, empty folder, I/O error) yields the fallback
//! image instead of failing the reply.

use crate::sampler::Sampler;
use eatba_core::catalog::RestaurantRecord;
use std::path::{Path, PathBuf};
use tracing::debug;

/// URL path under which the gateway serves the image directory.
pub const IMAGE_ROUTE: &str = "/static/images";

/// Resolves card image URLs from the image store.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    root: PathBuf,
    public_url: Option<String>,
    fallback_url: String,
}

impl ImageResolver {
    pub fn new(
        root: impl Into<PathBuf>,
        public_url: Option<String>,
        fallback_url: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.map(|u| u.trim_end_matches('/').to_string()),
            fallback_url: fallback_url.into(),
        }
    }

    /// Image URL for a restaurant card.
    pub async fn resolve(&self, record: &RestaurantRecord, sampler: &Sampler) -> String {
        let Some(base) = self.public_url.as_deref() else {
            return self.fallback_url.clone();
        };

        let folder = record.image_folder_key();
        if !is_plain_segment(&folder) {
            debug!(folder = %folder, "Image folder key is not a plain path segment");
            return self.fallback_url.clone();
        }

        let files = match list_files(&self.root.join(&folder)).await {
            Ok(files) => files,
            Err(e) => {
                debug!(folder = %folder, error = %e, "No image folder, using fallback");
                return self.fallback_url.clone();
            }
        };

        match sampler.pick(&files) {
            Some(file) => format!(
                "{base}{IMAGE_ROUTE}/{}/{}",
                urlencoding::encode(&folder),
                urlencoding::encode(file)
            ),
            None => self.fallback_url.clone(),
        }
    }
}

/// Names of the regular files in `dir`, sorted.
async fn list_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    Ok(files)
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}
