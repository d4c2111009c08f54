//! SystemHandler - Maps severity-tagged system events to logs and alerts.
//!
//! Only `system.warning` and `system.error` are handled; every other
//! event type is ignored.

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::system::{Severity, SystemEventPayload};
use crate::ports::{EventHandler, Notification, Notifier};

pub struct SystemHandler {
    notifier: Arc<dyn Notifier>,
}

impl SystemHandler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    fn notification(
        severity: Severity,
        payload: &SystemEventPayload,
        event: &EventEnvelope,
    ) -> Notification {
        let mut context = json!({
            "caller": event.metadata.caller,
            "userId": event.metadata.user_id,
            "status": payload.status,
            "notify": true,
        });
        if severity == Severity::Error {
            if let Some(extra) = &payload.extra_data {
                context["extraData"] = extra.clone();
            }
        }
        Notification {
            level: severity,
            message: payload.message.clone(),
            context,
        }
    }
}

#[async_trait]
impl EventHandler for SystemHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(severity) = Severity::from_event_type(&event.event_type) else {
            return Ok(());
        };

        let payload: SystemEventPayload = event.payload_as().map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Failed to deserialize {} payload: {}", event.event_type, e),
            )
        })?;

        let caller = event.metadata.caller.as_deref().unwrap_or("-");
        let user_id = event.metadata.user_id.as_deref().unwrap_or("-");
        match severity {
            Severity::Warning => tracing::warn!(
                caller,
                user_id,
                status = payload.status,
                notify = payload.should_notify,
                "{}",
                payload.message
            ),
            Severity::Error => tracing::error!(
                caller,
                user_id,
                status = payload.status,
                notify = payload.should_notify,
                extra_data = %payload.extra_data.as_ref().unwrap_or(&JsonValue::Null),
                "{}",
                payload.message
            ),
        }

        if payload.should_notify {
            let notification = Self::notification(severity, &payload, &event);
            if let Err(e) = self.notifier.notify(notification).await {
                tracing::warn!(error = %e, event_type = %event.event_type, "notification failed");
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "SystemHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::system::SystemEvent;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent(&self) -> Vec<Notification> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notification: Notification) -> Result<(), DomainError> {
            self.sent.lock().unwrap().push(notification);
            if self.fail {
                return Err(DomainError::new(ErrorCode::NotificationError, "webhook down"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn ignores_unknown_event_types() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = SystemHandler::new(notifier.clone());

        let event = EventEnvelope::new("article.created", "c-1", "Content", json!({"oops": 1}));

        assert!(handler.handle(event).await.is_ok());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn does_not_notify_unless_requested() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = SystemHandler::new(notifier.clone());

        let event = SystemEvent::warning("slow query").to_envelope().unwrap();
        handler.handle(event).await.unwrap();

        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn error_notification_forwards_extra_data() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = SystemHandler::new(notifier.clone());

        let event = SystemEvent::error("db down")
            .notify()
            .with_extra_data(json!({"domain": "books"}))
            .to_envelope()
            .unwrap()
            .with_caller("createBook")
            .with_user_id("u1");
        handler.handle(event).await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].level, Severity::Error);
        assert_eq!(sent[0].message, "db down");
        assert_eq!(sent[0].context["notify"], true);
        assert_eq!(sent[0].context["caller"], "createBook");
        assert_eq!(sent[0].context["extraData"]["domain"], "books");
    }

    #[tokio::test]
    async fn warning_notification_drops_extra_data() {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = SystemHandler::new(notifier.clone());

        let event = SystemEvent::warning("cache miss storm")
            .notify()
            .with_extra_data(json!({"secret": "x"}))
            .to_envelope()
            .unwrap();
        handler.handle(event).await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].context.get("extraData").is_none());
    }

    #[tokio::test]
    async fn notifier_failure_is_swallowed() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let handler = SystemHandler::new(notifier.clone());

        let event = SystemEvent::error("boom").notify().to_envelope().unwrap();

        assert!(handler.handle(event).await.is_ok());
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn malformed_system_payload_is_an_error() {
        let handler = SystemHandler::new(Arc::new(RecordingNotifier::default()));
        let event = EventEnvelope::new("system.error", "s-1", "System", json!({"status": "x"}));

        let err = handler.handle(event).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
