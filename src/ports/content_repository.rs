//! Content command repository port (write side).
//!
//! One generic contract serves all four content domains; the payload type
//! selects the domain. Status changes go through [`StatusStore`], which is
//! payload-agnostic and transactional.

use async_trait::async_trait;

use crate::domain::content::{ContentDomain, ContentItem, ContentPayload, ExportStatus};
use crate::domain::foundation::{ContentId, DomainError, Timestamp, UserId};

/// Repository port for content item creation and deletion.
#[async_trait]
pub trait ContentRepository<P: ContentPayload>: Send + Sync {
    /// Store a new item for `owner`. New items are always `UNEXPORTED`.
    ///
    /// # Errors
    ///
    /// - `ContentConflict` if the storage-level uniqueness check on
    ///   `(domain, owner, natural_key)` rejects the row
    /// - `DatabaseError` / `StorageError` on persistence failure
    async fn create(&self, owner: &UserId, payload: P) -> Result<ContentItem<P>, DomainError>;

    /// Delete the item matching id, owner and expected status.
    ///
    /// Returns the deleted item.
    ///
    /// # Errors
    ///
    /// - `ContentNotFound` if no row matches all three. Missing rows,
    ///   foreign rows and rows in another status are not distinguished.
    /// - `DatabaseError` on persistence failure
    async fn delete_by_id(
        &self,
        id: &ContentId,
        owner: &UserId,
        expected_status: ExportStatus,
    ) -> Result<ContentItem<P>, DomainError>;
}

/// Bulk status transitions for one domain.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Domain whose rows this store touches.
    fn domain(&self) -> ContentDomain;

    /// Open a transaction spanning one or more bulk updates.
    async fn begin_status_transaction(&self) -> Result<Box<dyn StatusTransaction>, DomainError>;

    /// Single bulk update in its own transaction.
    async fn update_many_status(
        &self,
        owner: &UserId,
        from: ExportStatus,
        to: ExportStatus,
    ) -> Result<u64, DomainError> {
        let mut tx = self.begin_status_transaction().await?;
        let count = tx.update_many_status(owner, from, to, Timestamp::now()).await?;
        tx.commit().await?;
        Ok(count)
    }
}

/// An open status transaction.
///
/// Dropping a transaction without calling [`commit`](Self::commit)
/// discards every update made through it.
#[async_trait]
pub trait StatusTransaction: Send {
    /// Move every `from` item of `owner` to `to`, returning the row count.
    ///
    /// When `to` is `EXPORTED` the rows' `exported_at` is set to `changed_at`.
    async fn update_many_status(
        &mut self,
        owner: &UserId,
        from: ExportStatus,
        to: ExportStatus,
        changed_at: Timestamp,
    ) -> Result<u64, DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}
