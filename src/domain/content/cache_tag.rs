//! Deterministic cache tags for owner-scoped content reads.
//!
//! The writer recomputes the same tag a reader stored its result under,
//! so both sides must go through these functions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ContentDomain, ExportStatus};
use crate::domain::foundation::UserId;

/// Invalidation key for one cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheTag(String);

impl CacheTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag for the cached "items in this status for this owner" list.
pub fn build_content_cache_tag(
    domain: ContentDomain,
    status: ExportStatus,
    owner: &UserId,
) -> CacheTag {
    CacheTag(format!("{}:content:{}:{}", domain, status, owner))
}

/// Tag for the cached count of the same triple.
pub fn build_count_cache_tag(
    domain: ContentDomain,
    status: ExportStatus,
    owner: &UserId,
) -> CacheTag {
    CacheTag(format!("{}:count:{}:{}", domain, status, owner))
}

/// Content and count tags for every status a mutation touched.
pub fn invalidation_tags(
    domain: ContentDomain,
    owner: &UserId,
    statuses: &[ExportStatus],
) -> Vec<CacheTag> {
    statuses
        .iter()
        .flat_map(|status| {
            [
                build_content_cache_tag(domain, *status, owner),
                build_count_cache_tag(domain, *status, owner),
            ]
        })
        .collect()
}
