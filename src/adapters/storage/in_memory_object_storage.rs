//! In-memory object storage for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ObjectKey, ObjectStorage, ObjectStorageError, ObjectVariant};

#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStorage {
    objects: Arc<RwLock<HashMap<ObjectKey, Vec<u8>>>>,
    fail_variant: Option<ObjectVariant>,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every upload of `variant` fail (for compensation tests).
    pub fn failing_uploads_of(mut self, variant: ObjectVariant) -> Self {
        self.fail_variant = Some(variant);
        self
    }

    pub async fn contains(&self, key: &ObjectKey) -> bool {
        self.objects.read().await.contains_key(key)
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(&self, key: &ObjectKey, bytes: &[u8]) -> Result<(), ObjectStorageError> {
        if self.fail_variant == Some(key.variant) {
            return Err(ObjectStorageError::Io(format!("simulated upload failure for {}", key)));
        }
        self.objects.write().await.insert(key.clone(), bytes.to_vec());
        Ok(())
    }

    async fn fetch(&self, key: &ObjectKey) -> Result<Vec<u8>, ObjectStorageError> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| ObjectStorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &ObjectKey) -> Result<(), ObjectStorageError> {
        self.objects.write().await.remove(key);
        Ok(())
    }
}
