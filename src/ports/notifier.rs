//! Notifier port for operator alerts.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::domain::foundation::DomainError;
use crate::domain::system::Severity;

/// An alert forwarded by the system handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: Severity,
    pub message: String,
    /// Structured context (caller, owner, status, extra data).
    pub context: JsonValue,
}

/// Port for delivering operator notifications.
///
/// Callers treat delivery as fire-and-forget: a failed notification is
/// logged, never retried here.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_is_object_safe() {
        fn _accepts_dyn(_: &dyn Notifier) {}
    }
}
