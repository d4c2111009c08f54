//! Result cache configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// TTL applied to cached content lists and counts.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 {
            return Err(ValidationError::ZeroCacheTtl);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one_minute() {
        assert_eq!(CacheConfig::default().ttl(), Duration::from_secs(60));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let config = CacheConfig { ttl_secs: 0 };
        assert!(matches!(config.validate(), Err(ValidationError::ZeroCacheTtl)));
    }
}
