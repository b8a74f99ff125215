//! Error types for the trainplan_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for trainplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog file or record could not be accepted
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Generation was requested against a catalog with no exercises
    #[error("No exercises available to generate a program")]
    EmptyCatalog,

    /// Profile violates frequency or duration invariants
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
