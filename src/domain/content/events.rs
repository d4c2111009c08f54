//! Content domain events.
//!
//! Raised after a committed create or delete, for every domain:
//! - `ContentCreated` - `<domain>.created`
//! - `ContentDeleted` - `<domain>.deleted`

use serde::{Deserialize, Serialize};

use super::{ContentDomain, ContentItem, ContentPayload, NaturalKey};
use crate::domain::foundation::{ContentId, DomainEvent, EventId, Timestamp, UserId};

/// Published when a new content item has been stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCreated {
    pub event_id: EventId,
    pub content_id: ContentId,
    pub domain: ContentDomain,
    pub owner_id: UserId,
    pub natural_key: NaturalKey,
    /// Human label (title, or path for untitled images).
    pub label: String,
    pub created_at: Timestamp,
}

impl ContentCreated {
    pub fn from_item<P: ContentPayload>(item: &ContentItem<P>) -> Self {
        Self {
            event_id: EventId::new(),
            content_id: *item.id(),
            domain: item.domain(),
            owner_id: item.owner_id().clone(),
            natural_key: item.natural_key(),
            label: item.payload().label().to_string(),
            created_at: *item.created_at(),
        }
    }
}

impl DomainEvent for ContentCreated {
    fn event_type(&self) -> &'static str {
        self.domain.created_event_type()
    }

    fn aggregate_id(&self) -> String {
        self.content_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Content"
    }

    fn occurred_at(&self) -> Timestamp {
        self.created_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}

/// Published when an unexported item has been deleted by its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDeleted {
    pub event_id: EventId,
    pub content_id: ContentId,
    pub domain: ContentDomain,
    pub owner_id: UserId,
    pub natural_key: NaturalKey,
    pub deleted_at: Timestamp,
}

impl ContentDeleted {
    pub fn from_item<P: ContentPayload>(item: &ContentItem<P>) -> Self {
        Self {
            event_id: EventId::new(),
            content_id: *item.id(),
            domain: item.domain(),
            owner_id: item.owner_id().clone(),
            natural_key: item.natural_key(),
            deleted_at: Timestamp::now(),
        }
    }
}

impl DomainEvent for ContentDeleted {
    fn event_type(&self) -> &'static str {
        self.domain.deleted_event_type()
    }

    fn aggregate_id(&self) -> String {
        self.content_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Content"
    }

    fn occurred_at(&self) -> Timestamp {
        self.deleted_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}
