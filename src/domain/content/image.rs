//! Images, deduplicated by storage path.
//!
//! Binary data lives in object storage. The persisted payload only holds
//! metadata; the raw bytes ride along in [`ImageUpload`] until the image
//! repository has uploaded them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AssetPath, ContentDomain, ContentPayload, NaturalKey};
use crate::domain::foundation::ValidationError;

/// Raw bytes for a new image. Never persisted with the row.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub original: Vec<u8>,
    /// Pre-generated thumbnail; thumbnailing itself happens elsewhere.
    pub thumbnail: Option<Vec<u8>>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("original_bytes", &self.original.len())
            .field("thumbnail_bytes", &self.thumbnail.as_ref().map(Vec::len))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub path: AssetPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content_type: String,
    pub has_thumbnail: bool,
    #[serde(skip)]
    upload: Option<ImageUpload>,
}

impl ImagePayload {
    pub fn new(
        path: &str,
        title: Option<String>,
        content_type: &str,
        upload: ImageUpload,
    ) -> Result<Self, ValidationError> {
        let content_type = content_type.trim().to_ascii_lowercase();
        if !content_type.starts_with("image/") {
            return Err(ValidationError::invalid_format(
                "content_type",
                format!("'{}' is not an image type", content_type),
            ));
        }
        if upload.original.is_empty() {
            return Err(ValidationError::empty_field("original"));
        }
        Ok(Self {
            path: AssetPath::parse(path)?,
            title: title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            content_type,
            has_thumbnail: upload.thumbnail.is_some(),
            upload: Some(upload),
        })
    }

    /// Removes the pending bytes, leaving the metadata to persist.
    pub fn take_upload(&mut self) -> Option<ImageUpload> {
        self.upload.take()
    }

    pub fn has_pending_upload(&self) -> bool {
        self.upload.is_some()
    }
}

impl ContentPayload for ImagePayload {
    const DOMAIN: ContentDomain = ContentDomain::Images;

    fn natural_key(&self) -> NaturalKey {
        NaturalKey::from(&self.path)
    }

    fn label(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> ImageUpload {
        ImageUpload {
            original: vec![1, 2, 3],
            thumbnail: Some(vec![9]),
        }
    }

    #[test]
    fn records_thumbnail_presence() {
        let image = ImagePayload::new("cats/a.png", None, "image/png", upload()).unwrap();
        assert!(image.has_thumbnail);
        assert_eq!(image.label(), "cats/a.png");
    }

    #[test]
    fn rejects_non_image_content_type() {
        assert!(ImagePayload::new("a.txt", None, "text/plain", upload()).is_err());
    }

    #[test]
    fn upload_is_not_serialized() {
        let mut image = ImagePayload::new("a.png", None, "IMAGE/PNG", upload()).unwrap();
        let json = serde_json::to_value(&image).unwrap();
        assert!(json.get("upload").is_none());
        assert_eq!(json["content_type"], "image/png");

        let restored: ImagePayload = serde_json::from_value(json).unwrap();
        assert!(!restored.has_pending_upload());

        assert!(image.take_upload().is_some());
        assert!(image.take_upload().is_none());
    }
}
