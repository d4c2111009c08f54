//! In-memory content store.
//!
//! Implements the repository, reader and status store ports over one
//! shared vector. Used by tests and local development.
//!
//! A status transaction holds the store's lock for its whole lifetime
//! and edits a working copy; commit swaps the copy in, drop discards it.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::content::{ContentDomain, ContentItem, ContentPayload, ExportStatus, NaturalKey};
use crate::domain::foundation::{ContentId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::{
    CacheStrategy, ContentReader, ContentRepository, ListOptions, StatusStore, StatusTransaction,
};

pub struct InMemoryContentStore<P> {
    items: Arc<Mutex<Vec<ContentItem<P>>>>,
}

impl<P: ContentPayload> InMemoryContentStore<P> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inserts an item as-is, bypassing the uniqueness check (test seeding).
    pub async fn insert(&self, item: ContentItem<P>) {
        self.items.lock().await.push(item);
    }

    /// Copy of every stored item.
    pub async fn snapshot(&self) -> Vec<ContentItem<P>> {
        self.items.lock().await.clone()
    }

    pub async fn get(&self, id: &ContentId) -> Option<ContentItem<P>> {
        self.items.lock().await.iter().find(|i| i.id() == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }
}

impl<P: ContentPayload> Default for InMemoryContentStore<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for InMemoryContentStore<P> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

#[async_trait]
impl<P: ContentPayload> ContentRepository<P> for InMemoryContentStore<P> {
    async fn create(&self, owner: &UserId, payload: P) -> Result<ContentItem<P>, DomainError> {
        let item = ContentItem::create(owner.clone(), payload);
        let key = item.natural_key();

        let mut items = self.items.lock().await;
        if items
            .iter()
            .any(|i| i.owner_id() == owner && i.natural_key() == key)
        {
            return Err(DomainError::new(
                ErrorCode::ContentConflict,
                format!("{} '{}' already exists", P::DOMAIN, key),
            ));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn delete_by_id(
        &self,
        id: &ContentId,
        owner: &UserId,
        expected_status: ExportStatus,
    ) -> Result<ContentItem<P>, DomainError> {
        let mut items = self.items.lock().await;
        let position = items
            .iter()
            .position(|i| i.id() == id && i.owner_id() == owner && i.status() == expected_status)
            .ok_or_else(|| DomainError::new(ErrorCode::ContentNotFound, "Content not found"))?;
        Ok(items.remove(position))
    }
}

#[async_trait]
impl<P: ContentPayload> ContentReader<P> for InMemoryContentStore<P> {
    async fn find_by_natural_key(
        &self,
        owner: &UserId,
        key: &NaturalKey,
    ) -> Result<Option<ContentItem<P>>, DomainError> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .find(|i| i.owner_id() == owner && &i.natural_key() == key)
            .cloned())
    }

    async fn find_many(
        &self,
        owner: &UserId,
        status: ExportStatus,
        options: &ListOptions,
    ) -> Result<Vec<ContentItem<P>>, DomainError> {
        let matching: Vec<_> = self
            .items
            .lock()
            .await
            .iter()
            .filter(|i| i.owner_id() == owner && i.status() == status)
            .cloned()
            .collect();
        Ok(options.apply(matching))
    }

    async fn count(
        &self,
        owner: &UserId,
        status: ExportStatus,
        _cache_strategy: Option<&CacheStrategy>,
    ) -> Result<u64, DomainError> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .filter(|i| i.owner_id() == owner && i.status() == status)
            .count() as u64)
    }
}

#[async_trait]
impl<P: ContentPayload> StatusStore for InMemoryContentStore<P> {
    fn domain(&self) -> ContentDomain {
        P::DOMAIN
    }

    async fn begin_status_transaction(&self) -> Result<Box<dyn StatusTransaction>, DomainError> {
        let guard = Arc::clone(&self.items).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryStatusTransaction { guard, working }))
    }
}

struct InMemoryStatusTransaction<P> {
    guard: OwnedMutexGuard<Vec<ContentItem<P>>>,
    working: Vec<ContentItem<P>>,
}

#[async_trait]
impl<P: ContentPayload> StatusTransaction for InMemoryStatusTransaction<P> {
    async fn update_many_status(
        &mut self,
        owner: &UserId,
        from: ExportStatus,
        to: ExportStatus,
        changed_at: Timestamp,
    ) -> Result<u64, DomainError> {
        let mut count = 0;
        for item in self
            .working
            .iter_mut()
            .filter(|i| i.owner_id() == owner && i.status() == from)
        {
            item.transition(to, changed_at)
                .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
            count += 1;
        }
        Ok(count)
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let InMemoryStatusTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        Ok(())
    }
}
