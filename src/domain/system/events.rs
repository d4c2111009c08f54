//! Severity-tagged system events.
//!
//! Raised when something outside the normal content flow needs operator
//! attention. The payload shape is shared by both severities:
//! `{ message, status, shouldNotify, extraData? }`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{DomainError, DomainEvent, ErrorCode, EventEnvelope, EventId, Timestamp};

pub const SYSTEM_WARNING: &str = "system.warning";
pub const SYSTEM_ERROR: &str = "system.error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn event_type(&self) -> &'static str {
        match self {
            Severity::Warning => SYSTEM_WARNING,
            Severity::Error => SYSTEM_ERROR,
        }
    }

    /// Parses a routing key; anything other than the two system types is `None`.
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            SYSTEM_WARNING => Some(Severity::Warning),
            SYSTEM_ERROR => Some(Severity::Error),
            _ => None,
        }
    }
}

/// Wire payload of a system event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemEventPayload {
    pub message: String,
    /// HTTP-style status describing the failure class.
    pub status: u16,
    #[serde(default)]
    pub should_notify: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<JsonValue>,
}

#[derive(Debug, Clone)]
pub struct SystemEvent {
    pub event_id: EventId,
    pub severity: Severity,
    pub payload: SystemEventPayload,
    pub occurred_at: Timestamp,
}

impl SystemEvent {
    fn with_severity(severity: Severity, message: impl Into<String>, status: u16) -> Self {
        Self {
            event_id: EventId::new(),
            severity,
            payload: SystemEventPayload {
                message: message.into(),
                status,
                should_notify: false,
                extra_data: None,
            },
            occurred_at: Timestamp::now(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message, 400)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message, 500)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.payload.status = status;
        self
    }

    /// Ask the system handler to forward this event to the notifier.
    pub fn notify(mut self) -> Self {
        self.payload.should_notify = true;
        self
    }

    pub fn with_extra_data(mut self, extra: JsonValue) -> Self {
        self.payload.extra_data = Some(extra);
        self
    }

    /// Wraps the event for dispatch. Only the payload shape is serialized.
    pub fn to_envelope(&self) -> Result<EventEnvelope, DomainError> {
        let payload = serde_json::to_value(&self.payload).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize {}: {}", self.event_type(), e),
            )
        })?;
        let mut envelope = EventEnvelope::new(
            self.event_type(),
            self.aggregate_id(),
            self.aggregate_type(),
            payload,
        );
        envelope.event_id = self.event_id.clone();
        envelope.occurred_at = self.occurred_at;
        Ok(envelope)
    }
}

impl DomainEvent for SystemEvent {
    fn event_type(&self) -> &'static str {
        self.severity.event_type()
    }

    fn aggregate_id(&self) -> String {
        self.event_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "System"
    }

    fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_uses_camel_case_keys() {
        let envelope = SystemEvent::error("db down")
            .notify()
            .with_extra_data(json!({"domain": "notes"}))
            .to_envelope()
            .unwrap();

        assert_eq!(envelope.event_type, SYSTEM_ERROR);
        assert_eq!(envelope.aggregate_type, "System");
        assert_eq!(
            envelope.payload,
            json!({
                "message": "db down",
                "status": 500,
                "shouldNotify": true,
                "extraData": {"domain": "notes"}
            })
        );
    }

    #[test]
    fn extra_data_is_omitted_when_absent() {
        let envelope = SystemEvent::warning("slow").to_envelope().unwrap();
        assert_eq!(envelope.event_type, SYSTEM_WARNING);
        assert!(envelope.payload.get("extraData").is_none());
        assert_eq!(envelope.payload["shouldNotify"], false);
    }

    #[test]
    fn severity_parses_only_system_types() {
        assert_eq!(Severity::from_event_type("system.error"), Some(Severity::Error));
        assert_eq!(Severity::from_event_type("system.warning"), Some(Severity::Warning));
        assert_eq!(Severity::from_event_type("article.created"), None);
    }
}
