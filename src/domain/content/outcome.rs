//! Uniform result shape returned by the mutation entrypoint.

use serde::{Deserialize, Serialize};

use super::ContentError;
use crate::domain::foundation::ContentId;

/// Success flag plus a message key the presentation layer translates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub success: bool,
    pub message_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<ContentId>,
}

impl MutationOutcome {
    pub fn succeeded(message_key: impl Into<String>, content_id: ContentId) -> Self {
        Self {
            success: true,
            message_key: message_key.into(),
            content_id: Some(content_id),
        }
    }

    pub fn failed(err: &ContentError) -> Self {
        Self {
            success: false,
            message_key: err.message_key().to_string(),
            content_id: None,
        }
    }
}
