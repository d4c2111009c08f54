//! Logging configuration

use serde::Deserialize;

use super::error::ValidationError;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default level or full `EnvFilter` directive (e.g. `info,sqlx=warn`).
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Only the leading default level is checked; per-target directives
        // are left to the subscriber.
        let default_level = self.level.split(',').next().unwrap_or_default().trim();
        if default_level.contains('=') || LEVELS.contains(&default_level.to_ascii_lowercase().as_str()) {
            return Ok(());
        }
        Err(ValidationError::InvalidLogLevel(self.level.clone()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
