//! Free-text notes, deduplicated by trimmed title.

use serde::{Deserialize, Serialize};

use super::{ContentDomain, ContentPayload, NaturalKey, NoteTitle};
use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    pub title: NoteTitle,
    pub body: String,
}

impl NotePayload {
    pub fn new(title: &str, body: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: NoteTitle::parse(title)?,
            body: body.into(),
        })
    }
}

impl ContentPayload for NotePayload {
    const DOMAIN: ContentDomain = ContentDomain::Notes;

    fn natural_key(&self) -> NaturalKey {
        NaturalKey::from(&self.title)
    }

    fn label(&self) -> &str {
        self.title.as_str()
    }
}
