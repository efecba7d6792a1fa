//! Error types for the fraud engine

use thiserror::Error;

/// Fraud engine error
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration (fatal at startup; the engine must not score
    /// in this state)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A raw input could not be coerced into a feature record (recoverable;
    /// batch evaluation skips the record and counts it)
    #[error("Record coercion failed: {0}")]
    RecordCoercion(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
