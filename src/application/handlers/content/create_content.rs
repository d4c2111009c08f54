//! CreateContentHandler - Command handler for submitting new content.

use std::sync::Arc;

use crate::application::dedup::DeduplicationService;
use crate::application::post_commit;
use crate::domain::content::{
    invalidation_tags, ContentCreated, ContentError, ContentItem, ContentPayload, ExportStatus,
};
use crate::domain::foundation::{Caller, CommandMetadata, EventEnvelope};
use crate::ports::{ContentReader, ContentRepository, EventPublisher, TagCache};

/// Command to create a content item for the calling owner.
#[derive(Debug, Clone)]
pub struct CreateContentCommand<P> {
    pub payload: P,
}

/// Handler for creating content in the domain of `P`.
pub struct CreateContentHandler<P> {
    repository: Arc<dyn ContentRepository<P>>,
    dedup: DeduplicationService<P>,
    cache: Arc<dyn TagCache>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl<P: ContentPayload> CreateContentHandler<P> {
    pub fn new(
        repository: Arc<dyn ContentRepository<P>>,
        reader: Arc<dyn ContentReader<P>>,
        cache: Arc<dyn TagCache>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            dedup: DeduplicationService::new(reader),
            cache,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        caller: &Caller,
        cmd: CreateContentCommand<P>,
        metadata: &CommandMetadata,
    ) -> Result<ContentItem<P>, ContentError> {
        // 1. Role check, before anything touches storage
        if !caller.can_mutate() {
            return Err(ContentError::Forbidden);
        }
        let owner = &caller.user_id;

        // 2. Natural key must be free for this owner
        let key = cmd.payload.natural_key();
        self.dedup.ensure_no_duplicate(&key, owner).await?;

        // 3. Persist (storage uniqueness is the final arbiter)
        let item = self.repository.create(owner, cmd.payload).await?;

        tracing::info!(
            domain = %P::DOMAIN,
            content_id = %item.id(),
            owner_id = %owner,
            "content created"
        );

        // 4. Post-commit: new rows only affect UNEXPORTED reads
        let tags = invalidation_tags(P::DOMAIN, owner, &[ExportStatus::Unexported]);
        post_commit::invalidate(self.cache.as_ref(), &tags).await;

        let envelope = EventEnvelope::from_event(&ContentCreated::from_item(&item)).map(|e| {
            e.with_caller(metadata.caller())
                .with_user_id(owner.to_string())
                .with_correlation_id(metadata.correlation_id())
        });
        post_commit::dispatch(self.event_publisher.as_ref(), envelope).await;

        Ok(item)
    }
}
