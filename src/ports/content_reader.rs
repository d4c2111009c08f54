//! Content reader port (read side).
//!
//! Queries are always scoped to one owner. `CacheStrategy` is a hint for
//! the read cache and is ignored by readers that do not cache.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::content::{CacheTag, ContentItem, ContentPayload, ExportStatus, NaturalKey};
use crate::domain::foundation::{DomainError, UserId};

/// Reader port for content queries.
#[async_trait]
pub trait ContentReader<P: ContentPayload>: Send + Sync {
    /// Find an owner's item by natural key, in any status.
    async fn find_by_natural_key(
        &self,
        owner: &UserId,
        key: &NaturalKey,
    ) -> Result<Option<ContentItem<P>>, DomainError>;

    /// List an owner's items in one status.
    async fn find_many(
        &self,
        owner: &UserId,
        status: ExportStatus,
        options: &ListOptions,
    ) -> Result<Vec<ContentItem<P>>, DomainError>;

    /// Count an owner's items in one status.
    async fn count(
        &self,
        owner: &UserId,
        status: ExportStatus,
        cache_strategy: Option<&CacheStrategy>,
    ) -> Result<u64, DomainError>;
}

/// Ordering by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "newest_first",
            SortOrder::OldestFirst => "oldest_first",
        }
    }
}

/// Cache hint: how long to keep a result and which tags evict it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStrategy {
    pub ttl: Duration,
    pub tags: Vec<CacheTag>,
}

impl CacheStrategy {
    pub fn new(ttl: Duration, tags: Vec<CacheTag>) -> Self {
        Self { ttl, tags }
    }
}

/// Options for listing content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub order: SortOrder,

    /// Maximum number of results to return.
    pub take: Option<u32>,

    /// Number of results to skip.
    pub skip: Option<u32>,

    pub cache_strategy: Option<CacheStrategy>,
}

impl ListOptions {
    /// Options for a 1-based page. An offset past `u32::MAX` saturates.
    pub fn paginated(page: u32, per_page: u32) -> Self {
        Self {
            take: Some(per_page),
            skip: Some(page.saturating_sub(1).saturating_mul(per_page)),
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_cache_strategy(mut self, strategy: CacheStrategy) -> Self {
        self.cache_strategy = Some(strategy);
        self
    }

    /// Applies ordering and pagination to an in-memory result set.
    pub fn apply<P: ContentPayload>(&self, mut items: Vec<ContentItem<P>>) -> Vec<ContentItem<P>> {
        items.sort_by(|a, b| match self.order {
            SortOrder::NewestFirst => b.created_at().cmp(a.created_at()),
            SortOrder::OldestFirst => a.created_at().cmp(b.created_at()),
        });
        let skip = self.skip.unwrap_or(0) as usize;
        let take = self.take.map(|t| t as usize).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}
