//! Error types for the Eatba domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Eatba operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Catalog errors ---
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Channel errors ---
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Dataset not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read dataset {}: {reason}", path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Malformed row {line} in {}: {reason}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Message delivery failed to {channel}: {reason}")]
    DeliveryFailed { channel: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_displays_path() {
        let err = Error::Catalog(CatalogError::MalformedRow {
            path: PathBuf::from("data/lunch_rest.csv"),
            line: 7,
            reason: "unterminated quote".into(),
        });
        let text = err.to_string();
        assert!(text.contains("lunch_rest.csv"));
        assert!(text.contains("7"));
        assert!(text.contains("unterminated quote"));
    }

    #[test]
    fn channel_error_displays_correctly() {
        let err = Error::Channel(ChannelError::DeliveryFailed {
            channel: "line".into(),
            reason: "HTTP 400".into(),
        });
        assert!(err.to_string().contains("line"));
        assert!(err.to_string().contains("HTTP 400"));
    }
}
