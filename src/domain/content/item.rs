//! The content item shared by all four domains.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::{ContentDomain, ExportStatus, NaturalKey};
use crate::domain::foundation::{ContentId, StateMachine, Timestamp, UserId, ValidationError};

/// Domain-specific payload carried by a [`ContentItem`].
///
/// One lifecycle implementation serves every domain; the payload type
/// only contributes its domain tag and the natural key used for
/// deduplication.
pub trait ContentPayload:
    Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    const DOMAIN: ContentDomain;

    /// Canonical key that must be unique per owner.
    fn natural_key(&self) -> NaturalKey;

    /// Short human label for log lines.
    fn label(&self) -> &str;
}

/// A user-submitted item progressing through the export lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem<P> {
    id: ContentId,
    owner_id: UserId,
    status: ExportStatus,
    created_at: Timestamp,
    exported_at: Option<Timestamp>,
    payload: P,
}

impl<P: ContentPayload> ContentItem<P> {
    /// Creates a fresh item. New items always start `UNEXPORTED`.
    pub fn create(owner_id: UserId, payload: P) -> Self {
        Self {
            id: ContentId::new(),
            owner_id,
            status: ExportStatus::Unexported,
            created_at: Timestamp::now(),
            exported_at: None,
            payload,
        }
    }

    /// Rebuilds an item from persisted state.
    pub fn reconstitute(
        id: ContentId,
        owner_id: UserId,
        status: ExportStatus,
        created_at: Timestamp,
        exported_at: Option<Timestamp>,
        payload: P,
    ) -> Self {
        Self {
            id,
            owner_id,
            status,
            created_at,
            exported_at,
            payload,
        }
    }

    pub fn id(&self) -> &ContentId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn status(&self) -> ExportStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Set only once the item has been finalized.
    pub fn exported_at(&self) -> Option<&Timestamp> {
        self.exported_at.as_ref()
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn domain(&self) -> ContentDomain {
        P::DOMAIN
    }

    pub fn natural_key(&self) -> NaturalKey {
        self.payload.natural_key()
    }

    /// Moves the item to `target`, stamping `exported_at` when finalizing.
    pub fn transition(&mut self, target: ExportStatus, at: Timestamp) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(target)?;
        if target == ExportStatus::Exported {
            self.exported_at = Some(at);
        }
        Ok(())
    }
}
