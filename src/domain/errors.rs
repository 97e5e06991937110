//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main veille error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum VeilleError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Structural validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Name-recognizer errors (initialization or inference)
    #[error("Recognizer error: {0}")]
    Recognizer(String),

    /// Batch scan errors
    #[error("Scan error: {0}")]
    Scan(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilleError {
    fn from(err: std::io::Error) -> Self {
        VeilleError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VeilleError {
    fn from(err: serde_json::Error) -> Self {
        VeilleError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilleError {
    fn from(err: toml::de::Error) -> Self {
        VeilleError::Configuration(format!("TOML parse error: {err}"))
    }
}
