use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SealError>;

#[derive(Error, Debug)]
pub enum SealError {
    #[error("Document not found: {0}")]
    DocumentNotFound(PathBuf),

    #[error("Document has no front matter; stamp it first")]
    MissingMetadata,

    #[error("Missing required metadata fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Metadata field '{key}' is invalid: {reason}")]
    InvalidField { key: &'static str, reason: String },

    #[error("hash10 mismatch: stored {stored}, computed {computed} (body changed after stamping)")]
    IntegrityMismatch { stored: String, computed: String },

    #[error("phi mismatch: stored {stored}, computed {computed} (catalog or field changed after stamping)")]
    ScoreMismatch { stored: f64, computed: f64 },

    #[error(transparent)]
    Catalog(#[from] resonance_catalog::CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
