//! Error types for objmd.

use thiserror::Error;

/// Result type for objmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around rendering.
///
/// Rendering itself never fails; these cover registration preconditions,
/// configuration loading and value classification.
#[derive(Error, Debug)]
pub enum Error {
    /// A renderer was registered without a usable name.
    #[error("Invalid renderer: {0}")]
    InvalidRenderer(String),

    /// Configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A value could not be classified through serde.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Input document is not valid JSON.
    #[error("Invalid JSON input: {0}")]
    Json(String),

    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
