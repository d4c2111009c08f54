//! Mutation-level error taxonomy.

use thiserror::Error;

use super::{ContentDomain, NaturalKey};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by content mutations and queries.
///
/// Collaborator failures arrive as [`DomainError`] and are folded into
/// these kinds; the raw cause only survives inside `Unexpected` for
/// logging and is never shown to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("caller is not authenticated")]
    Unauthenticated,

    #[error("caller lacks the required role")]
    Forbidden,

    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{domain} item with key '{key}' already exists")]
    Duplicate { domain: ContentDomain, key: NaturalKey },

    /// Missing row, another owner's row, or a row in the wrong status.
    #[error("content not found")]
    NotFound,

    /// A concurrent create won the storage-level uniqueness race.
    #[error("content was created concurrently")]
    Conflict,

    #[error("unexpected failure: {0}")]
    Unexpected(String),

    /// What the caller sees of `Unexpected` once the cause has been reported.
    #[error("request failed")]
    Failed,
}

impl ContentError {
    pub fn duplicate(domain: ContentDomain, key: NaturalKey) -> Self {
        Self::Duplicate { domain, key }
    }

    /// Stable message key for the caller-facing result.
    pub fn message_key(&self) -> &'static str {
        match self {
            ContentError::Unauthenticated => "auth.unauthenticated",
            ContentError::Forbidden => "content.forbidden",
            ContentError::Validation { .. } => "content.invalid",
            ContentError::Duplicate { .. } | ContentError::Conflict => "content.duplicate",
            ContentError::NotFound => "content.not_found",
            ContentError::Unexpected(_) | ContentError::Failed => "content.unexpected_error",
        }
    }

    /// Drops the collaborator cause before the error leaves the boundary.
    pub fn redacted(self) -> Self {
        match self {
            ContentError::Unexpected(_) => ContentError::Failed,
            other => other,
        }
    }

    /// True for failures that should raise an operator alert.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, ContentError::Unexpected(_))
    }
}

impl From<DomainError> for ContentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ContentNotFound => ContentError::NotFound,
            ErrorCode::ContentConflict => ContentError::Conflict,
            code if code.is_validation() => ContentError::Validation {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => ContentError::Unexpected(err.to_string()),
        }
    }
}

impl From<ValidationError> for ContentError {
    fn from(err: ValidationError) -> Self {
        ContentError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
