//! Command context that flows from the entrypoint into emitted events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Metadata context for command handlers.
///
/// Carries the acting owner, the caller name (e.g. `"articles.create"`)
/// and a correlation ID. Handlers copy it onto every event they dispatch
/// so audit records can be tied back to the originating request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The owner executing this command.
    pub user_id: UserId,

    /// Name of the operation that raised the command.
    caller: String,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for the given owner and caller name.
    pub fn new(user_id: UserId, caller: impl Into<String>) -> Self {
        Self {
            user_id,
            caller: caller.into(),
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the caller name.
    pub fn caller(&self) -> &str {
        &self.caller
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[test]
    fn new_sets_owner_and_caller() {
        let metadata = CommandMetadata::new(owner(), "notes.create");

        assert_eq!(metadata.user_id, owner());
        assert_eq!(metadata.caller(), "notes.create");
        assert!(metadata.correlation_id_opt().is_none());
    }

    #[test]
    fn correlation_id_returns_set_value() {
        let metadata =
            CommandMetadata::new(owner(), "books.delete").with_correlation_id("corr-1");

        assert_eq!(metadata.correlation_id(), "corr-1");
        assert_eq!(metadata.correlation_id_opt(), Some("corr-1"));
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new(owner(), "images.create");
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn serialization_skips_unset_correlation() {
        let json = serde_json::to_string(&CommandMetadata::new(owner(), "x")).unwrap();
        assert!(json.contains("caller"));
        assert!(!json.contains("correlation_id"));
    }
}
