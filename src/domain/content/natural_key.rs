//! Natural keys and the value objects that normalise them.
//!
//! Deduplication compares keys byte-for-byte, so every key is built from
//! a value object that has already put the raw input in canonical form.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::domain::foundation::ValidationError;

const MAX_TITLE_CHARS: usize = 200;

/// Canonical, domain-specific dedup key (URL, note title, image path, ISBN).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NaturalKey(String);

impl NaturalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rebuilds a key read back from storage; the stored form is already canonical.
    pub(crate) fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Article URL in canonical form.
///
/// Scheme and host are lower-cased by the parser, the fragment is dropped
/// and a trailing slash is trimmed from non-root paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("url"));
        }

        let mut url = Url::parse(trimmed)
            .map_err(|e| ValidationError::invalid_format("url", e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::invalid_format(
                "url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        url.set_fragment(None);
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(if path.is_empty() { "/" } else { &path });

        Ok(Self(url.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CanonicalUrl {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CanonicalUrl> for String {
    fn from(value: CanonicalUrl) -> Self {
        value.0
    }
}

impl From<&CanonicalUrl> for NaturalKey {
    fn from(value: &CanonicalUrl) -> Self {
        NaturalKey(value.0.clone())
    }
}

/// Trimmed, non-empty note title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteTitle(String);

impl NoteTitle {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let chars = trimmed.chars().count();
        if chars > MAX_TITLE_CHARS {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_CHARS as i32,
                chars as i32,
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NoteTitle {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NoteTitle> for String {
    fn from(value: NoteTitle) -> Self {
        value.0
    }
}

impl From<&NoteTitle> for NaturalKey {
    fn from(value: &NoteTitle) -> Self {
        NaturalKey(value.0.clone())
    }
}

/// ISBN reduced to its canonical characters (no hyphens or spaces).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Accepts ISBN-13 (13 digits) or ISBN-10 (9 digits + digit or `X`).
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let canonical: String = raw
            .chars()
            .filter(|c| !matches!(c, '-' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if canonical.is_empty() {
            return Err(ValidationError::empty_field("isbn"));
        }

        let valid = match canonical.len() {
            13 => canonical.chars().all(|c| c.is_ascii_digit()),
            10 => canonical.char_indices().all(|(i, c)| {
                c.is_ascii_digit() || (i == 9 && c == 'X')
            }),
            _ => false,
        };

        if !valid {
            return Err(ValidationError::invalid_format(
                "isbn",
                "expected 13 digits or 9 digits followed by a digit or X",
            ));
        }
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Isbn {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Isbn> for String {
    fn from(value: Isbn) -> Self {
        value.0
    }
}

impl From<&Isbn> for NaturalKey {
    fn from(value: &Isbn) -> Self {
        NaturalKey(value.0.clone())
    }
}

/// Relative object-storage path for an image (`albums/2024/cat.png`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetPath(String);

impl AssetPath {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("path"));
        }
        if trimmed.contains('\\') {
            return Err(ValidationError::invalid_format("path", "backslashes are not allowed"));
        }
        if trimmed
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(ValidationError::invalid_format(
                "path",
                "empty, '.' and '..' segments are not allowed",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AssetPath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AssetPath> for String {
    fn from(value: AssetPath) -> Self {
        value.0
    }
}

impl From<&AssetPath> for NaturalKey {
    fn from(value: &AssetPath) -> Self {
        NaturalKey(value.0.clone())
    }
}
