//! Error types for capflow-loader

use thiserror::Error;

/// Snapshot loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[cfg(feature = "serde_json")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
