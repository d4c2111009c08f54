//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CONTENT_DUMPER`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use content_dumper::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod cache;
mod database;
mod error;
mod logging;
mod notification;
mod redis;
mod storage;

pub use self::redis::RedisConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use notification::NotificationConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root configuration for the operator binary and embedding services.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL content store
    pub database: DatabaseConfig,

    /// Shared tag cache; an in-process cache is used when absent
    #[serde(default)]
    pub redis: Option<RedisConfig>,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub notification: NotificationConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CONTENT_DUMPER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `CONTENT_DUMPER__DATABASE__URL=...` -> `database.url`
    /// - `CONTENT_DUMPER__CACHE__TTL_SECS=30` -> `cache.ttl_secs`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONTENT_DUMPER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        if let Some(redis) = &self.redis {
            redis.validate()?;
        }
        self.cache.validate()?;
        self.notification.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
