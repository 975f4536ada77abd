use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Zero-length vector; check the raw scores")]
    ZeroVector,

    #[error("Artefact '{0}' not found in the catalog")]
    UnknownArtefact(String),

    #[error("Inconsistent dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("No prototypes were given for the field")]
    EmptyPrototypeSet,

    #[error("The field has not been defined yet")]
    FieldNotDefined,

    #[error("Dimension '{0}' already exists")]
    DuplicateDimension(String),

    #[error("Artefact '{0}' already exists")]
    DuplicateArtefact(String),

    #[error("Scale max must be a positive integer, got {0}")]
    InvalidScaleMax(u32),

    #[error("Score {score} for dimension '{dimension}' is out of range 0..={scale_max}")]
    ScoreOutOfRange {
        dimension: String,
        score: u32,
        scale_max: u32,
    },

    #[error("Catalog file not found: {0}")]
    Missing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
