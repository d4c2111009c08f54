//! DeduplicationService - Pre-create natural key check.

use std::sync::Arc;

use crate::domain::content::{ContentError, ContentPayload, NaturalKey};
use crate::domain::foundation::UserId;
use crate::ports::ContentReader;

/// Rejects a create when the owner already has an item with the same key.
///
/// Items in any status count, so an exported item still blocks
/// re-creation. The check is advisory: concurrent creates can both pass
/// it, and the repository's uniqueness constraint settles the race.
pub struct DeduplicationService<P> {
    reader: Arc<dyn ContentReader<P>>,
}

impl<P> Clone for DeduplicationService<P> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
        }
    }
}

impl<P: ContentPayload> DeduplicationService<P> {
    pub fn new(reader: Arc<dyn ContentReader<P>>) -> Self {
        Self { reader }
    }

    pub async fn ensure_no_duplicate(
        &self,
        key: &NaturalKey,
        owner: &UserId,
    ) -> Result<(), ContentError> {
        match self.reader.find_by_natural_key(owner, key).await? {
            Some(existing) => {
                tracing::debug!(
                    domain = %P::DOMAIN,
                    owner_id = %owner,
                    natural_key = %key,
                    existing_status = %existing.status(),
                    "duplicate natural key"
                );
                Err(ContentError::duplicate(P::DOMAIN, key.clone()))
            }
            None => Ok(()),
        }
    }
}
