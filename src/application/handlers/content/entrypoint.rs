//! ContentEntrypoint - Outermost boundary for content requests.
//!
//! Resolves the caller, runs the handler, and folds every failure into a
//! [`MutationOutcome`]. Unexpected failures are raised as `system.error`
//! events with notification requested; the caller only ever sees the
//! message key.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use super::{
    ContentPage, CreateContentCommand, CreateContentHandler, DeleteContentCommand,
    DeleteContentHandler, ListContentHandler, ListContentQuery,
};
use crate::application::post_commit;
use crate::domain::content::{ContentError, ContentPayload, MutationOutcome};
use crate::domain::foundation::{
    AuthError, Caller, CommandMetadata, ContentId, Credentials, UserId, ValidationError,
};
use crate::domain::system::SystemEvent;
use crate::ports::{ContentReader, ContentRepository, EventPublisher, IdentityProvider, TagCache};

/// Collaborators for one content domain.
pub struct ContentPorts<P> {
    pub repository: Arc<dyn ContentRepository<P>>,
    pub reader: Arc<dyn ContentReader<P>>,
    pub cache: Arc<dyn TagCache>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub cache_ttl: Duration,
}

pub struct ContentEntrypoint<P> {
    identity: Arc<dyn IdentityProvider>,
    event_publisher: Arc<dyn EventPublisher>,
    create: CreateContentHandler<P>,
    delete: DeleteContentHandler<P>,
    list: ListContentHandler<P>,
}

impl<P: ContentPayload> ContentEntrypoint<P> {
    pub fn new(identity: Arc<dyn IdentityProvider>, ports: ContentPorts<P>) -> Self {
        Self {
            identity,
            event_publisher: Arc::clone(&ports.event_publisher),
            create: CreateContentHandler::new(
                Arc::clone(&ports.repository),
                Arc::clone(&ports.reader),
                Arc::clone(&ports.cache),
                Arc::clone(&ports.event_publisher),
            ),
            delete: DeleteContentHandler::new(
                ports.repository,
                ports.cache,
                Arc::clone(&ports.event_publisher),
            ),
            list: ListContentHandler::new(ports.reader, ports.cache_ttl),
        }
    }

    /// Creates an item from an already validated payload.
    pub async fn create(&self, credentials: &Credentials, payload: P) -> MutationOutcome {
        self.create_with(credentials, move || Ok(payload)).await
    }

    /// Creates an item, building the payload only after the caller has
    /// been authenticated and authorised.
    pub async fn create_with<F>(&self, credentials: &Credentials, build: F) -> MutationOutcome
    where
        F: FnOnce() -> Result<P, ValidationError> + Send,
    {
        let operation = format!("{}.create", P::DOMAIN);
        let caller = match self.resolve(credentials, &operation).await {
            Ok(caller) => caller,
            Err(err) => return MutationOutcome::failed(&err),
        };

        let result = async {
            if !caller.can_mutate() {
                return Err(ContentError::Forbidden);
            }
            let payload = build()?;
            let metadata = CommandMetadata::new(caller.user_id.clone(), operation.as_str());
            self.create
                .handle(&caller, CreateContentCommand { payload }, &metadata)
                .await
        }
        .await;

        match result {
            Ok(item) => MutationOutcome::succeeded(P::DOMAIN.created_event_type(), *item.id()),
            Err(err) => self.fail(&operation, Some(&caller.user_id), err).await,
        }
    }

    /// Deletes one of the caller's unexported items.
    pub async fn delete(&self, credentials: &Credentials, content_id: ContentId) -> MutationOutcome {
        let operation = format!("{}.delete", P::DOMAIN);
        let caller = match self.resolve(credentials, &operation).await {
            Ok(caller) => caller,
            Err(err) => return MutationOutcome::failed(&err),
        };

        let metadata = CommandMetadata::new(caller.user_id.clone(), operation.as_str());
        match self
            .delete
            .handle(&caller, DeleteContentCommand { content_id }, &metadata)
            .await
        {
            Ok(item) => MutationOutcome::succeeded(P::DOMAIN.deleted_event_type(), *item.id()),
            Err(err) => self.fail(&operation, Some(&caller.user_id), err).await,
        }
    }

    /// Lists one page of the caller's items.
    ///
    /// Unexpected failures are reported, then returned as
    /// [`ContentError::Failed`] without their cause.
    pub async fn list(
        &self,
        credentials: &Credentials,
        query: ListContentQuery,
    ) -> Result<ContentPage<P>, ContentError> {
        let operation = format!("{}.list", P::DOMAIN);
        let caller = self
            .resolve(credentials, &operation)
            .await
            .map_err(ContentError::redacted)?;
        match self.list.handle(&caller, query).await {
            Ok(page) => Ok(page),
            Err(err) => {
                self.report(&operation, Some(&caller.user_id), &err).await;
                Err(err.redacted())
            }
        }
    }

    async fn resolve(&self, credentials: &Credentials, operation: &str) -> Result<Caller, ContentError> {
        match self.identity.authenticate(credentials).await {
            Ok(caller) => Ok(caller),
            Err(AuthError::InvalidCredentials) => Err(ContentError::Unauthenticated),
            Err(e @ AuthError::ServiceUnavailable(_)) => {
                let err = ContentError::Unexpected(e.to_string());
                self.report(operation, None, &err).await;
                Err(err)
            }
        }
    }

    async fn fail(&self, operation: &str, owner: Option<&UserId>, err: ContentError) -> MutationOutcome {
        self.report(operation, owner, &err).await;
        MutationOutcome::failed(&err)
    }

    async fn report(&self, operation: &str, owner: Option<&UserId>, err: &ContentError) {
        if !err.is_unexpected() {
            tracing::debug!(operation, error = %err, "content request rejected");
            return;
        }

        let event = SystemEvent::error(format!("{} failed", operation))
            .notify()
            .with_extra_data(json!({
                "domain": P::DOMAIN.as_str(),
                "error": err.to_string(),
            }));
        let envelope = event.to_envelope().map(|e| {
            let e = e.with_caller(operation);
            match owner {
                Some(owner) => e.with_user_id(owner.to_string()),
                None => e,
            }
        });
        post_commit::dispatch(self.event_publisher.as_ref(), envelope).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::StaticTokenIdentityProvider;
    use crate::adapters::cache::InMemoryTagCache;
    use crate::adapters::memory::InMemoryContentStore;
    use crate::domain::content::{BookPayload, ExportStatus};
    use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockEventPublisher {
        published_events: Mutex<Vec<EventEnvelope>>,
    }

    impl MockEventPublisher {
        fn event_types(&self) -> Vec<String> {
            self.published_events
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.event_type.clone())
                .collect()
        }
    }

    #[async_trait]
    impl EventPublisher for MockEventPublisher {
        async fn dispatch(&self, event: EventEnvelope) -> Result<(), DomainError> {
            self.published_events.lock().unwrap().push(event);
            Ok(())
        }

        async fn dispatch_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
            self.published_events.lock().unwrap().extend(events);
            Ok(())
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl ContentRepository<BookPayload> for FailingRepository {
        async fn create(
            &self,
            _owner: &UserId,
            _payload: BookPayload,
        ) -> Result<crate::domain::content::ContentItem<BookPayload>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "disk full"))
        }

        async fn delete_by_id(
            &self,
            _id: &ContentId,
            _owner: &UserId,
            _expected_status: ExportStatus,
        ) -> Result<crate::domain::content::ContentItem<BookPayload>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "disk full"))
        }
    }

    struct UnavailableReader;

    #[async_trait]
    impl ContentReader<BookPayload> for UnavailableReader {
        async fn find_by_natural_key(
            &self,
            _owner: &UserId,
            _key: &crate::domain::content::NaturalKey,
        ) -> Result<Option<crate::domain::content::ContentItem<BookPayload>>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "password authentication failed for user \"dumper\""))
        }

        async fn find_many(
            &self,
            _owner: &UserId,
            _status: ExportStatus,
            _options: &crate::ports::ListOptions,
        ) -> Result<Vec<crate::domain::content::ContentItem<BookPayload>>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "password authentication failed for user \"dumper\""))
        }

        async fn count(
            &self,
            _owner: &UserId,
            _status: ExportStatus,
            _cache_strategy: Option<&crate::ports::CacheStrategy>,
        ) -> Result<u64, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "password authentication failed for user \"dumper\""))
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn identity() -> Arc<StaticTokenIdentityProvider> {
        Arc::new(
            StaticTokenIdentityProvider::new()
                .with_token("owner-token", Caller::owner(user("u1")))
                .with_token("viewer-token", Caller::new(user("u1"), [Role::View])),
        )
    }

    fn entrypoint(
        repository: Arc<dyn ContentRepository<BookPayload>>,
        store: InMemoryContentStore<BookPayload>,
        publisher: Arc<MockEventPublisher>,
    ) -> ContentEntrypoint<BookPayload> {
        ContentEntrypoint::new(
            identity(),
            ContentPorts {
                repository,
                reader: Arc::new(store),
                cache: Arc::new(InMemoryTagCache::new()),
                event_publisher: publisher,
                cache_ttl: Duration::from_secs(60),
            },
        )
    }

    fn dune() -> BookPayload {
        BookPayload::new("9781234567890", "Dune", None).unwrap()
    }

    #[tokio::test]
    async fn successful_create_reports_created_key() {
        let store = InMemoryContentStore::<BookPayload>::new();
        let publisher = Arc::new(MockEventPublisher::default());
        let entry = entrypoint(Arc::new(store.clone()), store.clone(), publisher.clone());

        let outcome = entry.create(&Credentials::new("owner-token"), dune()).await;

        assert!(outcome.success);
        assert_eq!(outcome.message_key, "book.created");
        assert!(outcome.content_id.is_some());
        assert_eq!(publisher.event_types(), vec!["book.created"]);
    }

    #[tokio::test]
    async fn duplicate_create_is_a_soft_failure() {
        let store = InMemoryContentStore::<BookPayload>::new();
        let publisher = Arc::new(MockEventPublisher::default());
        let entry = entrypoint(Arc::new(store.clone()), store.clone(), publisher.clone());
        let creds = Credentials::new("owner-token");

        entry.create(&creds, dune()).await;
        let outcome = entry.create(&creds, dune()).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message_key, "content.duplicate");
        assert_eq!(store.len().await, 1);
        assert_eq!(publisher.event_types(), vec!["book.created"]);
    }

    #[tokio::test]
    async fn unknown_token_is_unauthenticated() {
        let store = InMemoryContentStore::<BookPayload>::new();
        let publisher = Arc::new(MockEventPublisher::default());
        let entry = entrypoint(Arc::new(store.clone()), store.clone(), publisher.clone());

        let outcome = entry.create(&Credentials::new("nope"), dune()).await;

        assert_eq!(outcome.message_key, "auth.unauthenticated");
        assert!(publisher.event_types().is_empty());
    }

    #[tokio::test]
    async fn permission_is_checked_before_payload_is_built() {
        let store = InMemoryContentStore::<BookPayload>::new();
        let publisher = Arc::new(MockEventPublisher::default());
        let entry = entrypoint(Arc::new(store.clone()), store.clone(), publisher.clone());

        let outcome = entry
            .create_with(&Credentials::new("viewer-token"), || {
                Err(ValidationError::empty_field("title"))
            })
            .await;

        assert_eq!(outcome.message_key, "content.forbidden");
    }

    #[tokio::test]
    async fn invalid_payload_is_reported_as_invalid() {
        let store = InMemoryContentStore::<BookPayload>::new();
        let publisher = Arc::new(MockEventPublisher::default());
        let entry = entrypoint(Arc::new(store.clone()), store.clone(), publisher.clone());

        let outcome = entry
            .create_with(&Credentials::new("owner-token"), || {
                BookPayload::new("not-an-isbn", "Dune", None)
            })
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.message_key, "content.invalid");
        assert!(publisher.event_types().is_empty());
    }

    #[tokio::test]
    async fn unexpected_failure_raises_system_error() {
        let store = InMemoryContentStore::<BookPayload>::new();
        let publisher = Arc::new(MockEventPublisher::default());
        let entry = entrypoint(Arc::new(FailingRepository), store, publisher.clone());

        let outcome = entry.create(&Credentials::new("owner-token"), dune()).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message_key, "content.unexpected_error");

        let events = publisher.published_events.lock().unwrap().clone();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "system.error");
        assert_eq!(events[0].payload["shouldNotify"], true);
        assert_eq!(events[0].payload["status"], 500);
        assert_eq!(events[0].metadata.caller.as_deref(), Some("books.create"));
        assert_eq!(events[0].metadata.user_id.as_deref(), Some("u1"));
        assert!(!events[0].payload["extraData"]["error"]
            .as_str()
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_item_is_not_found() {
        let store = InMemoryContentStore::<BookPayload>::new();
        let publisher = Arc::new(MockEventPublisher::default());
        let entry = entrypoint(Arc::new(store.clone()), store.clone(), publisher.clone());

        let outcome = entry
            .delete(&Credentials::new("owner-token"), ContentId::new())
            .await;

        assert_eq!(outcome.message_key, "content.not_found");
        assert!(publisher.event_types().is_empty());
    }

    #[tokio::test]
    async fn list_requires_authentication() {
        let store = InMemoryContentStore::<BookPayload>::new();
        let publisher = Arc::new(MockEventPublisher::default());
        let entry = entrypoint(Arc::new(store.clone()), store.clone(), publisher);

        let err = entry
            .list(
                &Credentials::new("nope"),
                ListContentQuery::first_page(ExportStatus::Unexported, 10),
            )
            .await
            .unwrap_err();
        assert_eq!(err, ContentError::Unauthenticated);
    }

    #[tokio::test]
    async fn list_failure_hides_cause_from_caller() {
        let store = InMemoryContentStore::<BookPayload>::new();
        let publisher = Arc::new(MockEventPublisher::default());
        let entry = ContentEntrypoint::new(
            identity(),
            ContentPorts {
                repository: Arc::new(store),
                reader: Arc::new(UnavailableReader),
                cache: Arc::new(InMemoryTagCache::new()),
                event_publisher: publisher.clone(),
                cache_ttl: Duration::from_secs(60),
            },
        );

        let err = entry
            .list(
                &Credentials::new("owner-token"),
                ListContentQuery::first_page(ExportStatus::Unexported, 10),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ContentError::Failed);
        assert!(!err.to_string().contains("password"));

        let events = publisher.published_events.lock().unwrap().clone();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metadata.caller.as_deref(), Some("books.list"));
        assert!(events[0].payload["extraData"]["error"]
            .as_str()
            .unwrap()
            .contains("password authentication failed"));
    }
}
