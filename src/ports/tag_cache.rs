//! Tag-indexed result cache port.
//!
//! Readers store serialized results under a key and attach cache tags;
//! writers evict every key carrying a tag they touched.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::content::CacheTag;
use crate::domain::foundation::DomainError;

/// Port for a tag-indexed key/value cache.
///
/// # Contract
///
/// - `get` returns `None` for missing or expired keys
/// - `invalidate_tags` removes every key attached to any given tag and
///   returns how many keys were removed
/// - Unknown tags are not an error
#[async_trait]
pub trait TagCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn put(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
        tags: &[CacheTag],
    ) -> Result<(), DomainError>;

    async fn invalidate_tags(&self, tags: &[CacheTag]) -> Result<u64, DomainError>;
}
