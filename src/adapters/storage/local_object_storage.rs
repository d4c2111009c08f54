//! Local filesystem object storage.
//!
//! Layout: `{root}/{owner}/{original|thumbnail}/{path}`. Writes go to a
//! temporary sibling file that is renamed into place.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::ports::{ObjectKey, ObjectStorage, ObjectStorageError};

#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
}

impl LocalObjectStorage {
    /// ```ignore
    /// let storage = LocalObjectStorage::new("./data/objects");
    /// ```
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a key to a file path below the root.
    fn object_path(&self, key: &ObjectKey) -> Result<PathBuf, ObjectStorageError> {
        let owner = key.owner.as_str();
        if owner.is_empty()
            || owner == "."
            || owner == ".."
            || owner.contains('/')
            || owner.contains('\\')
        {
            return Err(ObjectStorageError::InvalidKey(format!(
                "owner '{}' is not a valid directory name",
                owner
            )));
        }

        let mut path = self.root.join(owner).join(key.variant.as_str());
        // AssetPath guarantees relative, non-empty segments without `..`.
        for segment in key.path.as_str().split('/') {
            path.push(segment);
        }
        Ok(path)
    }
}

fn io_error(e: std::io::Error) -> ObjectStorageError {
    ObjectStorageError::Io(e.to_string())
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, key: &ObjectKey, bytes: &[u8]) -> Result<(), ObjectStorageError> {
        let path = self.object_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        fs::write(&tmp, bytes).await.map_err(io_error)?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(io_error(e));
        }

        tracing::debug!(key = %key, bytes = bytes.len(), "object stored");
        Ok(())
    }

    async fn fetch(&self, key: &ObjectKey) -> Result<Vec<u8>, ObjectStorageError> {
        let path = self.object_path(key)?;
        fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ObjectStorageError::NotFound(key.to_string()),
            _ => io_error(e),
        })
    }

    async fn delete(&self, key: &ObjectKey) -> Result<(), ObjectStorageError> {
        let path = self.object_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::AssetPath;
    use crate::domain::foundation::UserId;
    use tempfile::TempDir;

    fn key(owner: &str, path: &str) -> ObjectKey {
        ObjectKey::original(&UserId::new(owner).unwrap(), &AssetPath::parse(path).unwrap())
    }

    #[tokio::test]
    async fn upload_then_fetch_roundtrips_bytes() {
        let dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(dir.path());
        let key = key("u1", "cats/a.png");

        storage.upload(&key, b"png-bytes").await.unwrap();

        assert_eq!(storage.fetch(&key).await.unwrap(), b"png-bytes");
        assert!(dir.path().join("u1/original/cats/a.png").exists());
    }

    #[tokio::test]
    async fn upload_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(dir.path());
        storage.upload(&key("u1", "a.png"), b"x").await.unwrap();
        storage.upload(&key("u1", "a.png"), b"y").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("u1/original"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["a.png".to_string()]);
        assert_eq!(storage.fetch(&key("u1", "a.png")).await.unwrap(), b"y");
    }

    #[tokio::test]
    async fn fetch_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(dir.path());
        let err = storage.fetch(&key("u1", "nope.png")).await.unwrap_err();
        assert!(matches!(err, ObjectStorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(dir.path());
        assert!(storage.delete(&key("u1", "nope.png")).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_owner_that_escapes_root() {
        let dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(dir.path());
        let err = storage.upload(&key("..", "a.png"), b"x").await.unwrap_err();
        assert!(matches!(err, ObjectStorageError::InvalidKey(_)));
        let err = storage.upload(&key("a/b", "a.png"), b"x").await.unwrap_err();
        assert!(matches!(err, ObjectStorageError::InvalidKey(_)));
    }
}
