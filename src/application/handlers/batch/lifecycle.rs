//! BatchLifecycleHandler - Operator-triggered status transitions.
//!
//! `reset` finalizes the previous batch and then marks the current one;
//! `revert` returns an in-flight batch to the owner. Every routine runs
//! inside one status transaction, so a failure leaves nothing applied.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::application::post_commit;
use crate::domain::content::{invalidation_tags, ContentDomain, ExportStatus};
use crate::domain::foundation::{DomainError, StateMachine, Timestamp, UserId};
use crate::ports::{StatusStore, StatusTransaction, TagCache};

/// Errors from a batch routine. The transaction has been rolled back.
#[derive(Debug, Clone, Error)]
pub enum BatchError {
    #[error("{from} -> {to} is not a valid export transition")]
    InvalidTransition { from: ExportStatus, to: ExportStatus },

    #[error("batch storage failure: {0}")]
    Storage(#[from] DomainError),
}

/// Row counts of a `reset` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    /// LAST_UPDATED -> EXPORTED
    pub finalized: u64,
    /// UNEXPORTED -> LAST_UPDATED
    pub marked: u64,
}

/// Row counts of a `revert` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevertReport {
    /// LAST_UPDATED -> UNEXPORTED
    pub reverted: u64,
}

const RESET_STEPS: [(ExportStatus, ExportStatus); 2] = [
    (ExportStatus::LastUpdated, ExportStatus::Exported),
    (ExportStatus::Unexported, ExportStatus::LastUpdated),
];

const REVERT_STEPS: [(ExportStatus, ExportStatus); 1] =
    [(ExportStatus::LastUpdated, ExportStatus::Unexported)];

/// Batch routines for one content domain.
pub struct BatchLifecycleHandler {
    store: Arc<dyn StatusStore>,
    cache: Arc<dyn TagCache>,
}

impl BatchLifecycleHandler {
    pub fn new(store: Arc<dyn StatusStore>, cache: Arc<dyn TagCache>) -> Self {
        Self { store, cache }
    }

    pub fn domain(&self) -> ContentDomain {
        self.store.domain()
    }

    /// Finalize-then-mark. Items marked by the previous run are exported
    /// before this run marks anything, so fresh items can never be
    /// promoted twice in one call.
    pub async fn reset(&self, owner: &UserId) -> Result<ResetReport, BatchError> {
        let counts = self.run("reset", owner, &RESET_STEPS).await?;
        Ok(ResetReport {
            finalized: counts[0],
            marked: counts[1],
        })
    }

    /// Undo an in-flight batch before it is finalized.
    pub async fn revert(&self, owner: &UserId) -> Result<RevertReport, BatchError> {
        let counts = self.run("revert", owner, &REVERT_STEPS).await?;
        Ok(RevertReport {
            reverted: counts[0],
        })
    }

    async fn run(
        &self,
        routine: &'static str,
        owner: &UserId,
        steps: &[(ExportStatus, ExportStatus)],
    ) -> Result<Vec<u64>, BatchError> {
        for (from, to) in steps {
            if !from.can_transition_to(to) {
                return Err(BatchError::InvalidTransition {
                    from: *from,
                    to: *to,
                });
            }
        }

        let domain = self.store.domain();
        let mut tx = self.store.begin_status_transaction().await?;
        let changed_at = Timestamp::now();

        let counts = match apply_steps(tx.as_mut(), owner, steps, changed_at).await {
            Ok(counts) => counts,
            Err(e) => {
                tracing::error!(
                    routine,
                    domain = %domain,
                    owner_id = %owner,
                    error = %e,
                    "batch step failed, rolling back"
                );
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(routine, error = %rollback_err, "batch rollback failed");
                }
                return Err(e.into());
            }
        };
        tx.commit().await?;

        tracing::info!(
            routine,
            domain = %domain,
            owner_id = %owner,
            counts = ?counts,
            "batch routine committed"
        );

        let touched: Vec<ExportStatus> = ExportStatus::ALL
            .into_iter()
            .filter(|status| {
                steps
                    .iter()
                    .zip(&counts)
                    .any(|((from, to), count)| *count > 0 && (from == status || to == status))
            })
            .collect();
        if !touched.is_empty() {
            let tags = invalidation_tags(domain, owner, &touched);
            post_commit::invalidate(self.cache.as_ref(), &tags).await;
        }

        Ok(counts)
    }
}

async fn apply_steps(
    tx: &mut dyn StatusTransaction,
    owner: &UserId,
    steps: &[(ExportStatus, ExportStatus)],
    changed_at: Timestamp,
) -> Result<Vec<u64>, DomainError> {
    let mut counts = Vec::with_capacity(steps.len());
    for (from, to) in steps {
        counts.push(tx.update_many_status(owner, *from, *to, changed_at).await?);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::InMemoryTagCache;
    use crate::adapters::memory::InMemoryContentStore;
    use crate::domain::content::{ContentItem, NotePayload};
    use crate::domain::foundation::{ContentId, ErrorCode};
    use crate::ports::ContentRepository;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn owner(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn seed_notes(store: &InMemoryContentStore<NotePayload>, who: &str, titles: &[&str]) {
        for title in titles {
            store
                .create(&owner(who), NotePayload::new(title, "").unwrap())
                .await
                .unwrap();
        }
    }

    async fn statuses(store: &InMemoryContentStore<NotePayload>) -> Vec<ExportStatus> {
        let mut items = store.snapshot().await;
        items.sort_by(|a, b| a.payload().title.as_str().cmp(b.payload().title.as_str()));
        items.iter().map(|i| i.status()).collect()
    }

    /// Store whose transactions fail on the second status update.
    struct SecondStepFails {
        inner: InMemoryContentStore<NotePayload>,
        rolled_back: Arc<AtomicBool>,
    }

    struct SecondStepFailsTx {
        inner: Box<dyn StatusTransaction>,
        calls: usize,
        rolled_back: Arc<AtomicBool>,
    }

    #[async_trait]
    impl StatusStore for SecondStepFails {
        fn domain(&self) -> ContentDomain {
            ContentDomain::Notes
        }

        async fn begin_status_transaction(&self) -> Result<Box<dyn StatusTransaction>, DomainError> {
            Ok(Box::new(SecondStepFailsTx {
                inner: self.inner.begin_status_transaction().await?,
                calls: 0,
                rolled_back: Arc::clone(&self.rolled_back),
            }))
        }
    }

    #[async_trait]
    impl StatusTransaction for SecondStepFailsTx {
        async fn update_many_status(
            &mut self,
            owner: &UserId,
            from: ExportStatus,
            to: ExportStatus,
            changed_at: Timestamp,
        ) -> Result<u64, DomainError> {
            self.calls += 1;
            if self.calls == 2 {
                return Err(DomainError::new(ErrorCode::DatabaseError, "lock timeout"));
            }
            self.inner.update_many_status(owner, from, to, changed_at).await
        }

        async fn commit(self: Box<Self>) -> Result<(), DomainError> {
            self.inner.commit().await
        }

        async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
            self.rolled_back.store(true, Ordering::SeqCst);
            self.inner.rollback().await
        }
    }

    fn handler(store: &InMemoryContentStore<NotePayload>) -> (BatchLifecycleHandler, Arc<InMemoryTagCache>) {
        let cache = Arc::new(InMemoryTagCache::new());
        (
            BatchLifecycleHandler::new(Arc::new(store.clone()), cache.clone()),
            cache,
        )
    }

    #[tokio::test]
    async fn first_reset_marks_without_finalizing() {
        let store = InMemoryContentStore::<NotePayload>::new();
        seed_notes(&store, "u1", &["a", "b", "c"]).await;
        let (batch, _) = handler(&store);

        let report = batch.reset(&owner("u1")).await.unwrap();

        assert_eq!(report, ResetReport { finalized: 0, marked: 3 });
        assert_eq!(statuses(&store).await, vec![ExportStatus::LastUpdated; 3]);
    }

    #[tokio::test]
    async fn second_reset_finalizes_previous_batch() {
        let store = InMemoryContentStore::<NotePayload>::new();
        seed_notes(&store, "u1", &["a", "b", "c"]).await;
        let (batch, _) = handler(&store);

        batch.reset(&owner("u1")).await.unwrap();
        let report = batch.reset(&owner("u1")).await.unwrap();

        assert_eq!(report, ResetReport { finalized: 3, marked: 0 });
        let items = store.snapshot().await;
        assert!(items.iter().all(|i| i.status() == ExportStatus::Exported));
        assert!(items.iter().all(|i| i.exported_at().is_some()));
    }

    #[tokio::test]
    async fn reset_never_promotes_fresh_items_twice() {
        let store = InMemoryContentStore::<NotePayload>::new();
        seed_notes(&store, "u1", &["a"]).await;
        let (batch, _) = handler(&store);
        batch.reset(&owner("u1")).await.unwrap();

        seed_notes(&store, "u1", &["b"]).await;
        let report = batch.reset(&owner("u1")).await.unwrap();

        assert_eq!(report, ResetReport { finalized: 1, marked: 1 });
        assert_eq!(
            statuses(&store).await,
            vec![ExportStatus::Exported, ExportStatus::LastUpdated]
        );
        let fresh = store
            .snapshot()
            .await
            .into_iter()
            .find(|i| i.payload().title.as_str() == "b")
            .unwrap();
        assert!(fresh.exported_at().is_none());
    }

    #[tokio::test]
    async fn revert_returns_batch_to_owner() {
        let store = InMemoryContentStore::<NotePayload>::new();
        seed_notes(&store, "u1", &["a", "b", "c"]).await;
        let (batch, _) = handler(&store);
        batch.reset(&owner("u1")).await.unwrap();

        let report = batch.revert(&owner("u1")).await.unwrap();

        assert_eq!(report, RevertReport { reverted: 3 });
        assert_eq!(statuses(&store).await, vec![ExportStatus::Unexported; 3]);
    }

    #[tokio::test]
    async fn routines_only_touch_the_given_owner() {
        let store = InMemoryContentStore::<NotePayload>::new();
        seed_notes(&store, "u1", &["a"]).await;
        seed_notes(&store, "u2", &["b"]).await;
        let (batch, _) = handler(&store);

        batch.reset(&owner("u1")).await.unwrap();

        assert_eq!(
            statuses(&store).await,
            vec![ExportStatus::LastUpdated, ExportStatus::Unexported]
        );
    }

    #[tokio::test]
    async fn empty_run_is_not_an_error_and_invalidates_nothing() {
        let store = InMemoryContentStore::<NotePayload>::new();
        let (batch, cache) = handler(&store);

        assert_eq!(batch.reset(&owner("u1")).await.unwrap(), ResetReport::default());
        assert_eq!(batch.revert(&owner("u1")).await.unwrap(), RevertReport::default());
        assert!(cache.invalidated_tags().is_empty());
    }

    #[tokio::test]
    async fn mark_invalidates_unexported_and_last_updated_tags() {
        let store = InMemoryContentStore::<NotePayload>::new();
        seed_notes(&store, "u1", &["a"]).await;
        let (batch, cache) = handler(&store);

        batch.reset(&owner("u1")).await.unwrap();

        let tags: Vec<String> = cache.invalidated_tags().iter().map(|t| t.to_string()).collect();
        assert_eq!(
            tags,
            vec![
                "notes:content:UNEXPORTED:u1",
                "notes:count:UNEXPORTED:u1",
                "notes:content:LAST_UPDATED:u1",
                "notes:count:LAST_UPDATED:u1",
            ]
        );
    }

    #[tokio::test]
    async fn failed_second_step_rolls_back_the_first() {
        let store = InMemoryContentStore::<NotePayload>::new();
        store
            .insert(ContentItem::reconstitute(
                ContentId::new(),
                owner("u1"),
                ExportStatus::LastUpdated,
                Timestamp::now(),
                None,
                NotePayload::new("a", "").unwrap(),
            ))
            .await;
        seed_notes(&store, "u1", &["b"]).await;

        let rolled_back = Arc::new(AtomicBool::new(false));
        let cache = Arc::new(InMemoryTagCache::new());
        let batch = BatchLifecycleHandler::new(
            Arc::new(SecondStepFails {
                inner: store.clone(),
                rolled_back: Arc::clone(&rolled_back),
            }),
            cache.clone(),
        );

        let err = batch.reset(&owner("u1")).await.unwrap_err();

        assert!(matches!(err, BatchError::Storage(_)));
        assert!(rolled_back.load(Ordering::SeqCst));
        assert_eq!(
            statuses(&store).await,
            vec![ExportStatus::LastUpdated, ExportStatus::Unexported]
        );
        assert!(store.snapshot().await.iter().all(|i| i.exported_at().is_none()));
        assert!(cache.invalidated_tags().is_empty());
    }
}
