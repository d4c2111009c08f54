//! Operator notification configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::notification::WebhookConfig;

/// Webhook that receives `system.*` alerts. Without it alerts are only logged.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Endpoint URL; usually embeds a token.
    pub webhook_url: Option<SecretString>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl NotificationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Webhook adapter settings, if a URL is configured.
    pub fn webhook(&self) -> Option<WebhookConfig> {
        self.webhook_url
            .clone()
            .map(|url| WebhookConfig::new(url).with_timeout(self.timeout()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.webhook_url {
            if !url.expose_secret().starts_with("https://") {
                return Err(ValidationError::WebhookMustBeHttps);
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("notification.timeout_secs"));
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}
