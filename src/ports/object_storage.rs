//! Object Storage Port - Binary storage for image originals and thumbnails.
//!
//! Objects are addressed by owner, asset path and variant. Adapters decide
//! the physical layout; the local filesystem adapter uses
//!
//! ```text
//! {root}/{owner}/{original|thumbnail}/{path}
//! ```

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::content::AssetPath;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Which rendition of an image an object holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectVariant {
    Original,
    Thumbnail,
}

impl ObjectVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectVariant::Original => "original",
            ObjectVariant::Thumbnail => "thumbnail",
        }
    }
}

/// Address of one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub owner: UserId,
    pub path: AssetPath,
    pub variant: ObjectVariant,
}

impl ObjectKey {
    pub fn original(owner: &UserId, path: &AssetPath) -> Self {
        Self {
            owner: owner.clone(),
            path: path.clone(),
            variant: ObjectVariant::Original,
        }
    }

    pub fn thumbnail(owner: &UserId, path: &AssetPath) -> Self {
        Self {
            owner: owner.clone(),
            path: path.clone(),
            variant: ObjectVariant::Thumbnail,
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.owner, self.variant.as_str(), self.path.as_str())
    }
}

/// Errors from object storage operations.
#[derive(Debug, Clone, Error)]
pub enum ObjectStorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("storage I/O error: {0}")]
    Io(String),
}

impl From<ObjectStorageError> for DomainError {
    fn from(err: ObjectStorageError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// Port for image object storage.
///
/// # Contract
///
/// Implementations must:
/// - Write atomically (no partial object is ever visible)
/// - Overwrite an existing object on upload
/// - Treat deleting a missing object as success
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, key: &ObjectKey, bytes: &[u8]) -> Result<(), ObjectStorageError>;

    /// # Errors
    ///
    /// Returns `ObjectStorageError::NotFound` if the object doesn't exist.
    async fn fetch(&self, key: &ObjectKey) -> Result<Vec<u8>, ObjectStorageError>;

    async fn delete(&self, key: &ObjectKey) -> Result<(), ObjectStorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_includes_variant() {
        let owner = UserId::new("u1").unwrap();
        let path = AssetPath::parse("cats/a.png").unwrap();
        assert_eq!(ObjectKey::original(&owner, &path).to_string(), "u1/original/cats/a.png");
        assert_eq!(ObjectKey::thumbnail(&owner, &path).to_string(), "u1/thumbnail/cats/a.png");
    }

    #[test]
    fn storage_errors_map_to_storage_code() {
        let err: DomainError = ObjectStorageError::Io("disk full".into()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
