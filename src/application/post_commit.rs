//! Side effects that follow a committed mutation.
//!
//! The mutation has already succeeded when these run, so failures are
//! logged and swallowed.

use crate::domain::content::CacheTag;
use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventPublisher, TagCache};

pub(crate) async fn invalidate(cache: &dyn TagCache, tags: &[CacheTag]) {
    match cache.invalidate_tags(tags).await {
        Ok(evicted) => {
            tracing::debug!(tags = tags.len(), evicted, "cache tags invalidated");
        }
        Err(e) => {
            tracing::warn!(error = %e, tags = ?tags, "cache invalidation failed");
        }
    }
}

pub(crate) async fn dispatch(
    publisher: &dyn EventPublisher,
    envelope: Result<EventEnvelope, DomainError>,
) {
    let envelope = match envelope {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "failed to build event envelope");
            return;
        }
    };
    let event_type = envelope.event_type.clone();
    if let Err(e) = publisher.dispatch(envelope).await {
        tracing::warn!(event_type = %event_type, error = %e, "event dispatch failed");
    }
}
