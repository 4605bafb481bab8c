//! Error types for capflow-scenario

use thiserror::Error;

/// Scenario management error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Baseline scenario '{0}' cannot be modified")]
    BaselineImmutable(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Duplicate scenario id: {0}")]
    DuplicateScenario(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
