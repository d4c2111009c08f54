//! Webhook notifier - POSTs notifications as JSON.
//!
//! # Configuration
//!
//! ```ignore
//! let notifier = WebhookNotifier::new(WebhookConfig::new(url).with_timeout(Duration::from_secs(5)))?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::system::Severity;
use crate::ports::{Notification, Notifier};

/// Webhook endpoint settings.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Target URL. Often carries a token, so it is kept secret.
    url: SecretString,
    pub timeout: Duration,
}

impl WebhookConfig {
    pub fn new(url: SecretString) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self) -> &str {
        self.url.expose_secret()
    }
}

#[derive(Debug, Serialize)]
struct WebhookBody<'a> {
    level: Severity,
    message: &'a str,
    context: &'a JsonValue,
}

pub struct WebhookNotifier {
    config: WebhookConfig,
    client: Client,
}

impl WebhookNotifier {
    pub fn new(config: WebhookConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::NotificationError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), DomainError> {
        let body = WebhookBody {
            level: notification.level,
            message: &notification.message,
            context: &notification.context,
        };

        let response = self
            .client
            .post(self.config.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // Strip the URL: it may embed a token.
                DomainError::new(
                    ErrorCode::NotificationError,
                    format!("Webhook request failed: {}", e.without_url()),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                format!("Webhook returned {}", status),
            ));
        }

        tracing::debug!(status = status.as_u16(), "notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_serializes_level_lowercase() {
        let context = json!({"notify": true});
        let body = WebhookBody {
            level: Severity::Warning,
            message: "slow",
            context: &context,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["level"], "warning");
        assert_eq!(value["context"]["notify"], true);
    }

    #[test]
    fn config_debug_does_not_leak_url() {
        let config = WebhookConfig::new(SecretString::new("https://hooks.example.com/T0KEN".into()));
        assert!(!format!("{:?}", config).contains("T0KEN"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_notification_error() {
        let config = WebhookConfig::new(SecretString::new("http://127.0.0.1:9/hook".into()))
            .with_timeout(Duration::from_millis(200));
        let notifier = WebhookNotifier::new(config).unwrap();

        let err = notifier
            .notify(Notification {
                level: Severity::Error,
                message: "boom".into(),
                context: json!({}),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotificationError);
    }
}
