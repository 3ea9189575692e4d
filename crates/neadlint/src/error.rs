//! Error types for the neadlint library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for neadlint operations.
#[derive(Debug, Error)]
pub enum NeadError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library while parsing the data block.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no content to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for neadlint operations.
pub type Result<T> = std::result::Result<T, NeadError>;
