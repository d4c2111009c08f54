//! DeleteContentHandler - Command handler for removing unexported content.

use std::sync::Arc;

use crate::application::post_commit;
use crate::domain::content::{
    invalidation_tags, ContentDeleted, ContentError, ContentItem, ContentPayload, ExportStatus,
};
use crate::domain::foundation::{Caller, CommandMetadata, ContentId, EventEnvelope};
use crate::ports::{ContentRepository, EventPublisher, TagCache};

/// Command to delete one of the caller's items.
#[derive(Debug, Clone)]
pub struct DeleteContentCommand {
    pub content_id: ContentId,
}

/// Handler for deleting content in the domain of `P`.
///
/// Owners may only delete items that have not entered a batch. A missing
/// row, a row owned by someone else and a row in another status all come
/// back as the same `NotFound`.
pub struct DeleteContentHandler<P> {
    repository: Arc<dyn ContentRepository<P>>,
    cache: Arc<dyn TagCache>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl<P: ContentPayload> DeleteContentHandler<P> {
    pub fn new(
        repository: Arc<dyn ContentRepository<P>>,
        cache: Arc<dyn TagCache>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            cache,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        caller: &Caller,
        cmd: DeleteContentCommand,
        metadata: &CommandMetadata,
    ) -> Result<ContentItem<P>, ContentError> {
        if !caller.can_mutate() {
            return Err(ContentError::Forbidden);
        }
        let owner = &caller.user_id;

        let item = self
            .repository
            .delete_by_id(&cmd.content_id, owner, ExportStatus::Unexported)
            .await?;

        tracing::info!(
            domain = %P::DOMAIN,
            content_id = %item.id(),
            owner_id = %owner,
            "content deleted"
        );

        let tags = invalidation_tags(P::DOMAIN, owner, &[ExportStatus::Unexported]);
        post_commit::invalidate(self.cache.as_ref(), &tags).await;

        let envelope = EventEnvelope::from_event(&ContentDeleted::from_item(&item)).map(|e| {
            e.with_caller(metadata.caller())
                .with_user_id(owner.to_string())
                .with_correlation_id(metadata.correlation_id())
        });
        post_commit::dispatch(self.event_publisher.as_ref(), envelope).await;

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::InMemoryTagCache;
    use crate::adapters::events::EventDispatcher;
    use crate::adapters::memory::InMemoryContentStore;
    use crate::domain::content::NotePayload;
    use crate::domain::foundation::{DomainError, Role, Timestamp, UserId};
    use crate::ports::{EventHandler, EventSubscriber, StatusStore};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
            self.seen.lock().unwrap().push(event.event_type);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "RecordingHandler"
        }
    }

    fn owner(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(owner("u1"), "notes.delete")
    }

    struct Fixture {
        store: InMemoryContentStore<NotePayload>,
        cache: Arc<InMemoryTagCache>,
        recorder: Arc<RecordingHandler>,
        handler: DeleteContentHandler<NotePayload>,
    }

    fn fixture() -> Fixture {
        let store = InMemoryContentStore::<NotePayload>::new();
        let cache = Arc::new(InMemoryTagCache::new());
        let dispatcher = Arc::new(EventDispatcher::new());
        let recorder = Arc::new(RecordingHandler::default());
        dispatcher.register("note.deleted", recorder.clone());
        let handler = DeleteContentHandler::new(Arc::new(store.clone()), cache.clone(), dispatcher);
        Fixture {
            store,
            cache,
            recorder,
            handler,
        }
    }

    async fn seed(store: &InMemoryContentStore<NotePayload>, title: &str) -> ContentItem<NotePayload> {
        store
            .create(&owner("u1"), NotePayload::new(title, "body").unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn deletes_unexported_item() {
        let f = fixture();
        let item = seed(&f.store, "Groceries").await;

        let deleted = f
            .handler
            .handle(
                &Caller::owner(owner("u1")),
                DeleteContentCommand { content_id: *item.id() },
                &metadata(),
            )
            .await
            .unwrap();

        assert_eq!(deleted.id(), item.id());
        assert_eq!(f.store.len().await, 0);
        assert_eq!(*f.recorder.seen.lock().unwrap(), vec!["note.deleted"]);
        assert_eq!(
            f.cache
                .invalidated_tags()
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>(),
            vec!["notes:content:UNEXPORTED:u1", "notes:count:UNEXPORTED:u1"]
        );
    }

    #[tokio::test]
    async fn batched_item_is_not_found_and_untouched() {
        let f = fixture();
        let item = seed(&f.store, "Groceries").await;
        f.store
            .update_many_status(&owner("u1"), ExportStatus::Unexported, ExportStatus::LastUpdated)
            .await
            .unwrap();

        let err = f
            .handler
            .handle(
                &Caller::owner(owner("u1")),
                DeleteContentCommand { content_id: *item.id() },
                &metadata(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ContentError::NotFound);
        let stored = f.store.get(item.id()).await.unwrap();
        assert_eq!(stored.status(), ExportStatus::LastUpdated);
        assert!(f.recorder.seen.lock().unwrap().is_empty());
        assert!(f.cache.invalidated_tags().is_empty());
    }

    #[tokio::test]
    async fn other_owner_gets_the_same_not_found() {
        let f = fixture();
        let item = seed(&f.store, "Groceries").await;

        let err = f
            .handler
            .handle(
                &Caller::owner(owner("u2")),
                DeleteContentCommand { content_id: *item.id() },
                &CommandMetadata::new(owner("u2"), "notes.delete"),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ContentError::NotFound);
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test]
    async fn viewer_cannot_delete() {
        let f = fixture();
        let item = seed(&f.store, "Groceries").await;

        let err = f
            .handler
            .handle(
                &Caller::new(owner("u1"), [Role::View]),
                DeleteContentCommand { content_id: *item.id() },
                &metadata(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ContentError::Forbidden);
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test]
    async fn exported_item_cannot_be_deleted() {
        let f = fixture();
        let exported = ContentItem::reconstitute(
            ContentId::new(),
            owner("u1"),
            ExportStatus::Exported,
            Timestamp::now(),
            Some(Timestamp::now()),
            NotePayload::new("Old", "body").unwrap(),
        );
        f.store.insert(exported.clone()).await;

        let err = f
            .handler
            .handle(
                &Caller::owner(owner("u1")),
                DeleteContentCommand { content_id: *exported.id() },
                &metadata(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ContentError::NotFound);
        assert!(f.store.get(exported.id()).await.is_some());
    }
}
