//! Read-through cache decorator for `ContentReader`.
//!
//! Lists and counts are cached only when the caller passes a
//! `CacheStrategy`; the strategy's tags are attached to the entry so that
//! writer-side invalidation evicts it. Natural-key lookups always go to
//! the inner reader because deduplication needs fresh data.
//!
//! Cache failures degrade to an uncached read.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::content::{ContentItem, ContentPayload, ExportStatus, NaturalKey};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{CacheStrategy, ContentReader, ListOptions, TagCache};

pub struct CachedContentReader<P> {
    inner: Arc<dyn ContentReader<P>>,
    cache: Arc<dyn TagCache>,
}

impl<P: ContentPayload> CachedContentReader<P> {
    pub fn new(inner: Arc<dyn ContentReader<P>>, cache: Arc<dyn TagCache>) -> Self {
        Self { inner, cache }
    }

    fn list_key(owner: &UserId, status: ExportStatus, options: &ListOptions) -> String {
        let take = options
            .take
            .map(|t| t.to_string())
            .unwrap_or_else(|| "all".to_string());
        format!(
            "{}:list:{}:{}:{}:{}:{}",
            P::DOMAIN,
            status,
            options.order.as_str(),
            take,
            options.skip.unwrap_or(0),
            owner
        )
    }

    fn count_key(owner: &UserId, status: ExportStatus) -> String {
        format!("{}:count:{}:{}", P::DOMAIN, status, owner)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, error = %e, "discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed");
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T, strategy: &CacheStrategy) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to encode cache entry");
                return;
            }
        };
        if let Err(e) = self
            .cache
            .put(key, raw, strategy.ttl, &strategy.tags)
            .await
        {
            tracing::warn!(key, error = %e, "cache write failed");
        }
    }
}

#[async_trait]
impl<P: ContentPayload> ContentReader<P> for CachedContentReader<P> {
    async fn find_by_natural_key(
        &self,
        owner: &UserId,
        key: &NaturalKey,
    ) -> Result<Option<ContentItem<P>>, DomainError> {
        self.inner.find_by_natural_key(owner, key).await
    }

    async fn find_many(
        &self,
        owner: &UserId,
        status: ExportStatus,
        options: &ListOptions,
    ) -> Result<Vec<ContentItem<P>>, DomainError> {
        let Some(strategy) = &options.cache_strategy else {
            return self.inner.find_many(owner, status, options).await;
        };

        let key = Self::list_key(owner, status, options);
        if let Some(items) = self.lookup::<Vec<ContentItem<P>>>(&key).await {
            tracing::debug!(key = %key, "content list cache hit");
            return Ok(items);
        }

        let items = self.inner.find_many(owner, status, options).await?;
        self.store(&key, &items, strategy).await;
        Ok(items)
    }

    async fn count(
        &self,
        owner: &UserId,
        status: ExportStatus,
        cache_strategy: Option<&CacheStrategy>,
    ) -> Result<u64, DomainError> {
        let Some(strategy) = cache_strategy else {
            return self.inner.count(owner, status, None).await;
        };

        let key = Self::count_key(owner, status);
        if let Some(count) = self.lookup::<u64>(&key).await {
            return Ok(count);
        }

        let count = self.inner.count(owner, status, cache_strategy).await?;
        self.store(&key, &count, strategy).await;
        Ok(count)
    }
}
