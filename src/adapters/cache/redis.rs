//! Redis-backed tag cache for multi-process deployments.
//!
//! Values live under `{prefix}:entry:{key}` with `SET .. EX`. Each tag is a
//! set `{prefix}:tag:{tag}` of entry keys; invalidation reads the set with
//! `SMEMBERS` and deletes the members together with the set.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use std::time::Duration;

use crate::domain::content::CacheTag;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::TagCache;

const DEFAULT_PREFIX: &str = "content-dumper";

#[derive(Clone)]
pub struct RedisTagCache {
    conn: MultiplexedConnection,
    prefix: String,
}

fn cache_error(e: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::CacheError, format!("Redis error: {}", e))
}

impl RedisTagCache {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Connects to `url` and builds a cache.
    pub async fn connect(url: &str) -> Result<Self, DomainError> {
        let client = redis::Client::open(url).map_err(cache_error)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(cache_error)?;
        Ok(Self::new(conn))
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn entry_key(&self, key: &str) -> String {
        format!("{}:entry:{}", self.prefix, key)
    }

    fn tag_key(&self, tag: &CacheTag) -> String {
        format!("{}:tag:{}", self.prefix, tag)
    }
}

#[async_trait]
impl TagCache for RedisTagCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.conn.clone();
        redis::cmd("GET")
            .arg(self.entry_key(key))
            .query_async(&mut conn)
            .await
            .map_err(cache_error)
    }

    async fn put(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
        tags: &[CacheTag],
    ) -> Result<(), DomainError> {
        let entry_key = self.entry_key(key);
        let ttl_secs = ttl.as_secs().max(1);

        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("SET")
            .arg(&entry_key)
            .arg(value)
            .arg("EX")
            .arg(ttl_secs)
            .ignore();
        for tag in tags {
            let tag_key = self.tag_key(tag);
            pipe.cmd("SADD").arg(&tag_key).arg(&entry_key).ignore();
            // Entries under one tag share the configured TTL.
            pipe.cmd("EXPIRE").arg(&tag_key).arg(ttl_secs).ignore();
        }

        let mut conn = self.conn.clone();
        pipe.query_async::<_, ()>(&mut conn).await.map_err(cache_error)
    }

    async fn invalidate_tags(&self, tags: &[CacheTag]) -> Result<u64, DomainError> {
        let mut conn = self.conn.clone();
        let mut removed = 0u64;
        for tag in tags {
            let tag_key = self.tag_key(tag);
            let members: Vec<String> = redis::cmd("SMEMBERS")
                .arg(&tag_key)
                .query_async(&mut conn)
                .await
                .map_err(cache_error)?;

            if !members.is_empty() {
                let deleted: u64 = redis::cmd("DEL")
                    .arg(&members)
                    .query_async(&mut conn)
                    .await
                    .map_err(cache_error)?;
                removed += deleted;
            }
            redis::cmd("DEL")
                .arg(&tag_key)
                .query_async::<_, ()>(&mut conn)
                .await
                .map_err(cache_error)?;
        }
        tracing::debug!(tags = tags.len(), removed, "invalidated redis cache tags");
        Ok(removed)
    }
}
