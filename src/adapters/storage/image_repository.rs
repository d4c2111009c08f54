//! Image repository decorator that keeps object storage in step with rows.
//!
//! - create: insert the row, then upload original (and thumbnail). If an
//!   upload fails, the uploaded objects and the row are deleted again. A
//!   create that loses the uniqueness race never touches object storage,
//!   so it cannot overwrite the objects of the row that won.
//! - delete: delete the row, then its objects. Object cleanup failures
//!   are logged; the row is already gone.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::content::{ContentItem, ExportStatus, ImagePayload};
use crate::domain::foundation::{ContentId, DomainError, UserId};
use crate::ports::{ContentRepository, ObjectKey, ObjectStorage};

pub struct StoredImageRepository {
    inner: Arc<dyn ContentRepository<ImagePayload>>,
    storage: Arc<dyn ObjectStorage>,
}

impl StoredImageRepository {
    pub fn new(
        inner: Arc<dyn ContentRepository<ImagePayload>>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self { inner, storage }
    }

    /// Compensates a create whose objects could not be stored.
    async fn remove_row(&self, item: &ContentItem<ImagePayload>) {
        if let Err(e) = self
            .inner
            .delete_by_id(item.id(), item.owner_id(), ExportStatus::Unexported)
            .await
        {
            tracing::error!(
                content_id = %item.id(),
                error = %e,
                "failed to remove image row after upload failure"
            );
        }
    }

    async fn discard(&self, keys: &[ObjectKey]) {
        for key in keys {
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!(key = %key, error = %e, "failed to delete image object");
            }
        }
    }
}

#[async_trait]
impl ContentRepository<ImagePayload> for StoredImageRepository {
    async fn create(
        &self,
        owner: &UserId,
        mut payload: ImagePayload,
    ) -> Result<ContentItem<ImagePayload>, DomainError> {
        let upload = payload
            .take_upload()
            .ok_or_else(|| DomainError::validation("original", "Image bytes are missing"))?;

        let item = self.inner.create(owner, payload).await?;

        let path = &item.payload().path;
        let mut pending = vec![(ObjectKey::original(owner, path), upload.original.as_slice())];
        if let Some(thumbnail) = &upload.thumbnail {
            pending.push((ObjectKey::thumbnail(owner, path), thumbnail.as_slice()));
        }

        let mut uploaded = Vec::with_capacity(pending.len());
        for (key, bytes) in pending {
            if let Err(e) = self.storage.upload(&key, bytes).await {
                self.discard(&uploaded).await;
                self.remove_row(&item).await;
                return Err(e.into());
            }
            uploaded.push(key);
        }

        Ok(item)
    }

    async fn delete_by_id(
        &self,
        id: &ContentId,
        owner: &UserId,
        expected_status: ExportStatus,
    ) -> Result<ContentItem<ImagePayload>, DomainError> {
        let item = self.inner.delete_by_id(id, owner, expected_status).await?;

        let path = &item.payload().path;
        let mut keys = vec![ObjectKey::original(owner, path)];
        if item.payload().has_thumbnail {
            keys.push(ObjectKey::thumbnail(owner, path));
        }
        self.discard(&keys).await;

        Ok(item)
    }
}
