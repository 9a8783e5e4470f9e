//! Error types for the wordcast pipeline.

use thiserror::Error;

/// History file errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid history path: {0}")]
    InvalidPath(String),

    #[error("History serialization failed: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced from a pipeline stage to the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Required configuration missing: {0} is not set")]
    ConfigurationMissing(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Delivery failed with status {status}: {body}")]
    DeliveryFailed { status: u16, body: String },

    #[error("Delivery request failed: {0}")]
    DeliveryRequestFailed(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
