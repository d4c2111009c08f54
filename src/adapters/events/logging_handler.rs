//! LoggingHandler - Structured audit log of content creates and deletes.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventHandler;

/// Writes one `info` record per content event. No other side effects.
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    pub fn new() -> Self {
        Self
    }
}

fn field<'a>(payload: &'a JsonValue, key: &str) -> &'a str {
    payload.get(key).and_then(JsonValue::as_str).unwrap_or("-")
}

#[async_trait]
impl EventHandler for LoggingHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::info!(
            event_type = %event.event_type,
            domain = field(&event.payload, "domain"),
            content_id = %event.aggregate_id,
            owner_id = field(&event.payload, "owner_id"),
            natural_key = field(&event.payload, "natural_key"),
            caller = event.metadata.caller.as_deref().unwrap_or("-"),
            "content event"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LoggingHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn accepts_any_payload_shape() {
        let handler = LoggingHandler::new();
        let full = EventEnvelope::new(
            "note.created",
            "c-1",
            "Content",
            json!({"domain": "notes", "owner_id": "u1", "natural_key": "Groceries"}),
        )
        .with_caller("createNote");
        let empty = EventEnvelope::new("note.deleted", "c-1", "Content", json!(null));

        assert!(handler.handle(full).await.is_ok());
        assert!(handler.handle(empty).await.is_ok());
    }

    #[test]
    fn missing_fields_render_as_dash() {
        assert_eq!(field(&json!({"a": 1}), "a"), "-");
        assert_eq!(field(&json!({}), "domain"), "-");
        assert_eq!(field(&json!({"domain": "books"}), "domain"), "books");
    }
}
