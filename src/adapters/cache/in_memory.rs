//! In-memory tag cache for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::domain::content::CacheTag;
use crate::domain::foundation::DomainError;
use crate::ports::TagCache;

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, (String, Instant)>,
    tags: HashMap<CacheTag, HashSet<String>>,
    #[cfg(test)]
    invalidated: Vec<CacheTag>,
}

impl CacheState {
    /// Drops expired entries, then tag memberships of keys that are gone.
    fn prune(&mut self, now: Instant) {
        self.entries.retain(|_, (_, expires)| *expires > now);
        let entries = &self.entries;
        self.tags.retain(|_, keys| {
            keys.retain(|key| entries.contains_key(key));
            !keys.is_empty()
        });
    }
}

/// Tag cache backed by hash maps. Expired entries are pruned on every write.
#[derive(Default)]
pub struct InMemoryTagCache {
    state: Mutex<CacheState>,
}

impl InMemoryTagCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // === Test Helpers ===

    /// Every tag passed to `invalidate_tags`, in call order.
    #[cfg(test)]
    pub(crate) fn invalidated_tags(&self) -> Vec<CacheTag> {
        self.state().invalidated.clone()
    }

    #[cfg(test)]
    pub(crate) fn clear_history(&self) {
        self.state().invalidated.clear();
    }

    /// Stored entries (live or not yet pruned) and tag sets.
    #[cfg(test)]
    fn footprint(&self) -> (usize, usize) {
        let state = self.state();
        (state.entries.len(), state.tags.len())
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.state()
            .entries
            .values()
            .filter(|(_, expires)| *expires > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TagCache for InMemoryTagCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut state = self.state();
        match state.entries.get(key) {
            Some((value, expires)) if *expires > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                state.entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
        tags: &[CacheTag],
    ) -> Result<(), DomainError> {
        let now = Instant::now();
        let mut state = self.state();
        state.prune(now);
        state.entries.insert(key.to_string(), (value, now + ttl));
        for tag in tags {
            state
                .tags
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
        Ok(())
    }

    async fn invalidate_tags(&self, tags: &[CacheTag]) -> Result<u64, DomainError> {
        let mut state = self.state();
        let mut removed = 0;
        for tag in tags {
            #[cfg(test)]
            state.invalidated.push(tag.clone());
            if let Some(keys) = state.tags.remove(tag) {
                for key in keys {
                    if state.entries.remove(&key).is_some() {
                        removed += 1;
                    }
                }
            }
        }
        state.prune(Instant::now());
        Ok(removed)
    }
}
