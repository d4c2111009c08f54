//! The four content domains sharing one export lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A content domain. Scopes cache tags, event types and persistence rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentDomain {
    Articles,
    Notes,
    Images,
    Books,
}

impl ContentDomain {
    pub const ALL: [ContentDomain; 4] = [
        ContentDomain::Articles,
        ContentDomain::Notes,
        ContentDomain::Images,
        ContentDomain::Books,
    ];

    /// Plural name used in cache tags and persistence (`"books"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentDomain::Articles => "articles",
            ContentDomain::Notes => "notes",
            ContentDomain::Images => "images",
            ContentDomain::Books => "books",
        }
    }

    /// Event type raised after an item of this domain is created.
    pub fn created_event_type(&self) -> &'static str {
        match self {
            ContentDomain::Articles => "article.created",
            ContentDomain::Notes => "note.created",
            ContentDomain::Images => "image.created",
            ContentDomain::Books => "book.created",
        }
    }

    /// Event type raised after an item of this domain is deleted.
    pub fn deleted_event_type(&self) -> &'static str {
        match self {
            ContentDomain::Articles => "article.deleted",
            ContentDomain::Notes => "note.deleted",
            ContentDomain::Images => "image.deleted",
            ContentDomain::Books => "book.deleted",
        }
    }

    /// Name of the natural-key field used for deduplication.
    pub fn natural_key_field(&self) -> &'static str {
        match self {
            ContentDomain::Articles => "url",
            ContentDomain::Notes => "title",
            ContentDomain::Images => "path",
            ContentDomain::Books => "isbn",
        }
    }
}

impl fmt::Display for ContentDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentDomain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentDomain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("domain", format!("unknown content domain '{}'", s))
            })
    }
}
