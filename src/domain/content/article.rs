//! Saved web articles, deduplicated by canonical URL.

use serde::{Deserialize, Serialize};

use super::{CanonicalUrl, ContentDomain, ContentPayload, NaturalKey};
use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePayload {
    pub url: CanonicalUrl,
    pub title: String,
    /// Highlighted passage, if the user clipped one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

impl ArticlePayload {
    /// Builds a payload; an empty title falls back to the canonical URL.
    pub fn new(url: &str, title: &str, quote: Option<String>) -> Result<Self, ValidationError> {
        let url = CanonicalUrl::parse(url)?;
        let title = match title.trim() {
            "" => url.as_str().to_string(),
            t => t.to_string(),
        };
        let quote = quote
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        Ok(Self { url, title, quote })
    }
}

impl ContentPayload for ArticlePayload {
    const DOMAIN: ContentDomain = ContentDomain::Articles;

    fn natural_key(&self) -> NaturalKey {
        NaturalKey::from(&self.url)
    }

    fn label(&self) -> &str {
        &self.title
    }
}
