//! Config loading errors.

use thiserror::Error;

/// Errors returned while loading or validating a mod notes config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config layer could not be read from disk.
    #[error("failed to read config layer: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// A layer is not valid JSON5.
    #[error("failed to parse JSON5 config: {0}")]
    ParseFailed(#[from] json5::Error),
    /// The merged value does not fit the config model.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// A key is unknown or holds a value of the wrong type.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    /// The decoded config breaks a value constraint.
    #[error("invalid config: {0}")]
    Invalid(String),
}
