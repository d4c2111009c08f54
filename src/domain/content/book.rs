//! Books, deduplicated by canonical ISBN.

use serde::{Deserialize, Serialize};

use super::{ContentDomain, ContentPayload, Isbn, NaturalKey};
use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPayload {
    pub isbn: Isbn,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl BookPayload {
    pub fn new(isbn: &str, title: &str, author: Option<String>) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(Self {
            isbn: Isbn::parse(isbn)?,
            title: title.to_string(),
            author: author
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
        })
    }
}

impl ContentPayload for BookPayload {
    const DOMAIN: ContentDomain = ContentDomain::Books;

    fn natural_key(&self) -> NaturalKey {
        NaturalKey::from(&self.isbn)
    }

    fn label(&self) -> &str {
        &self.title
    }
}
