//! Service resolution error types.

use thiserror::Error;

/// Errors surfaced by the settings loader and the service assembler.
///
/// Absent or malformed configuration never produces one of these during
/// resolution; it only narrows the result.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Service class name without a matching service kind.
    #[error("Unknown service class: {0}")]
    UnknownServiceClass(String),

    /// Settings document is not a mapping.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings file could not be read.
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON settings could not be parsed.
    #[error("JSON settings error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML settings could not be parsed.
    #[error("TOML settings error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias for fallible service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
