//! Error types for the wrangle library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wrangle operations.
#[derive(Debug, Error)]
pub enum WrangleError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or unreadable input data.
    #[error("Load error: {0}")]
    Load(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Operation requested before any table was loaded.
    #[error("No dataset loaded")]
    NoData,

    /// A transformation could not be applied.
    #[error("Transformation error: {0}")]
    Transformation(String),

    /// A scoring simulation failed.
    #[error("Simulation error: {0}")]
    Simulation(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for wrangle operations.
pub type Result<T> = std::result::Result<T, WrangleError>;
