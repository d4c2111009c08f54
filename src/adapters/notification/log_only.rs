//! Notifier used when no webhook is configured.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::system::Severity;
use crate::ports::{Notification, Notifier};

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Default, Clone)]
pub struct LogOnlyNotifier;

impl LogOnlyNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogOnlyNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), DomainError> {
        match notification.level {
            Severity::Warning => tracing::warn!(
                context = %notification.context,
                "notification (not delivered): {}",
                notification.message
            ),
            Severity::Error => tracing::error!(
                context = %notification.context,
                "notification (not delivered): {}",
                notification.message
            ),
        }
        Ok(())
    }
}
