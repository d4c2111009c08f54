//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Redis key prefix must be non-empty and contain no whitespace")]
    InvalidKeyPrefix,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Cache TTL must be greater than zero")]
    ZeroCacheTtl,

    #[error("Webhook URL must use HTTPS")]
    WebhookMustBeHttps,

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(&'static str),

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}
