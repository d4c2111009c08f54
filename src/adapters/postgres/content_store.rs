//! PostgreSQL implementation of the content persistence ports.
//!
//! All four domains share one `content_items` table. Rows are scoped by
//! the `domain` column and the payload is stored as JSONB.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::marker::PhantomData;

use crate::domain::content::{
    ContentDomain, ContentItem, ContentPayload, ExportStatus, NaturalKey,
};
use crate::domain::foundation::{ContentId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::{
    CacheStrategy, ContentReader, ContentRepository, ListOptions, SortOrder, StatusStore,
    StatusTransaction,
};

const UNIQUE_VIOLATION: &str = "23505";

/// Content store for the domain of `P`.
pub struct PostgresContentStore<P> {
    pool: PgPool,
    _payload: PhantomData<fn() -> P>,
}

impl<P> Clone for PostgresContentStore<P> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _payload: PhantomData,
        }
    }
}

impl<P: ContentPayload> PostgresContentStore<P> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _payload: PhantomData,
        }
    }
}

#[async_trait]
impl<P: ContentPayload> ContentRepository<P> for PostgresContentStore<P> {
    async fn create(&self, owner: &UserId, payload: P) -> Result<ContentItem<P>, DomainError> {
        let item = ContentItem::create(owner.clone(), payload);
        let payload_json = serde_json::to_value(item.payload()).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize payload: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO content_items (
                id, domain, owner_id, natural_key, status, created_at, exported_at, payload
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(P::DOMAIN.as_str())
        .bind(item.owner_id().as_str())
        .bind(item.natural_key().as_str())
        .bind(item.status().as_str())
        .bind(item.created_at().as_datetime())
        .bind(item.exported_at().map(|t| *t.as_datetime()))
        .bind(payload_json)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::ContentConflict,
                    format!("{} item already exists", P::DOMAIN),
                )
                .with_detail("natural_key", item.natural_key().as_str())
            } else {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert content item: {}", e),
                )
            }
        })?;

        Ok(item)
    }

    async fn delete_by_id(
        &self,
        id: &ContentId,
        owner: &UserId,
        expected_status: ExportStatus,
    ) -> Result<ContentItem<P>, DomainError> {
        let row = sqlx::query(
            r#"
            DELETE FROM content_items
            WHERE id = $1 AND domain = $2 AND owner_id = $3 AND status = $4
            RETURNING id, owner_id, status, created_at, exported_at, payload
            "#,
        )
        .bind(id.as_uuid())
        .bind(P::DOMAIN.as_str())
        .bind(owner.as_str())
        .bind(expected_status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to delete content item: {}", e),
            )
        })?;

        match row {
            Some(row) => row_to_item(row),
            None => Err(DomainError::new(
                ErrorCode::ContentNotFound,
                format!("Content not found: {}", id),
            )),
        }
    }
}

#[async_trait]
impl<P: ContentPayload> ContentReader<P> for PostgresContentStore<P> {
    async fn find_by_natural_key(
        &self,
        owner: &UserId,
        key: &NaturalKey,
    ) -> Result<Option<ContentItem<P>>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, status, created_at, exported_at, payload
            FROM content_items
            WHERE domain = $1 AND owner_id = $2 AND natural_key = $3
            "#,
        )
        .bind(P::DOMAIN.as_str())
        .bind(owner.as_str())
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch content by key: {}", e),
            )
        })?;

        row.map(row_to_item).transpose()
    }

    async fn find_many(
        &self,
        owner: &UserId,
        status: ExportStatus,
        options: &ListOptions,
    ) -> Result<Vec<ContentItem<P>>, DomainError> {
        let order = match options.order {
            SortOrder::NewestFirst => "DESC",
            SortOrder::OldestFirst => "ASC",
        };
        let sql = format!(
            r#"
            SELECT id, owner_id, status, created_at, exported_at, payload
            FROM content_items
            WHERE domain = $1 AND owner_id = $2 AND status = $3
            ORDER BY created_at {order}, id {order}
            LIMIT $4 OFFSET $5
            "#,
            order = order
        );

        let rows = sqlx::query(&sql)
            .bind(P::DOMAIN.as_str())
            .bind(owner.as_str())
            .bind(status.as_str())
            .bind(options.take.map(i64::from))
            .bind(i64::from(options.skip.unwrap_or(0)))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list content items: {}", e),
                )
            })?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn count(
        &self,
        owner: &UserId,
        status: ExportStatus,
        _cache_strategy: Option<&CacheStrategy>,
    ) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM content_items WHERE domain = $1 AND owner_id = $2 AND status = $3",
        )
        .bind(P::DOMAIN.as_str())
        .bind(owner.as_str())
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count content items: {}", e),
            )
        })?;

        Ok(result.0.max(0) as u64)
    }
}

#[async_trait]
impl<P: ContentPayload> StatusStore for PostgresContentStore<P> {
    fn domain(&self) -> ContentDomain {
        P::DOMAIN
    }

    async fn begin_status_transaction(&self) -> Result<Box<dyn StatusTransaction>, DomainError> {
        let tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to begin transaction: {}", e))
        })?;
        Ok(Box::new(PgStatusTransaction {
            tx,
            domain: P::DOMAIN,
        }))
    }
}

/// Status moves sharing one database transaction.
struct PgStatusTransaction {
    tx: Transaction<'static, Postgres>,
    domain: ContentDomain,
}

#[async_trait]
impl StatusTransaction for PgStatusTransaction {
    async fn update_many_status(
        &mut self,
        owner: &UserId,
        from: ExportStatus,
        to: ExportStatus,
        changed_at: Timestamp,
    ) -> Result<u64, DomainError> {
        let exported_at = (to == ExportStatus::Exported).then(|| *changed_at.as_datetime());

        let result = sqlx::query(
            r#"
            UPDATE content_items SET
                status = $4,
                exported_at = COALESCE($5, exported_at)
            WHERE domain = $1 AND owner_id = $2 AND status = $3
            "#,
        )
        .bind(self.domain.as_str())
        .bind(owner.as_str())
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(exported_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update content status: {}", e),
            )
        })?;

        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx.commit().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to commit transaction: {}", e))
        })
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        self.tx.rollback().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to roll back transaction: {}", e),
            )
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read column {}: {}", column, e),
    )
}

fn row_to_item<P: ContentPayload>(row: sqlx::postgres::PgRow) -> Result<ContentItem<P>, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let owner_id: String = row.try_get("owner_id").map_err(|e| column_error("owner_id", e))?;
    let status: String = row.try_get("status").map_err(|e| column_error("status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(|e| column_error("created_at", e))?;
    let exported_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("exported_at").map_err(|e| column_error("exported_at", e))?;
    let payload: serde_json::Value = row.try_get("payload").map_err(|e| column_error("payload", e))?;

    let payload: P = serde_json::from_value(payload).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored {} payload is malformed: {}", P::DOMAIN, e),
        )
    })?;

    Ok(ContentItem::reconstitute(
        ContentId::from_uuid(id),
        UserId::new(owner_id)?,
        status.parse::<ExportStatus>()?,
        Timestamp::from_datetime(created_at),
        exported_at.map(Timestamp::from_datetime),
        payload,
    ))
}
