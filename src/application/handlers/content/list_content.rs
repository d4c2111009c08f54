//! ListContentHandler - Query handler for an owner's items in one status.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::content::{
    build_content_cache_tag, build_count_cache_tag, ContentError, ContentItem, ContentPayload,
    ExportStatus,
};
use crate::domain::foundation::Caller;
use crate::ports::{CacheStrategy, ContentReader, ListOptions, SortOrder};

/// Query for one page of the caller's items.
#[derive(Debug, Clone)]
pub struct ListContentQuery {
    pub status: ExportStatus,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    pub order: SortOrder,
}

impl ListContentQuery {
    pub fn first_page(status: ExportStatus, per_page: u32) -> Self {
        Self {
            status,
            page: 1,
            per_page,
            order: SortOrder::default(),
        }
    }
}

/// One page of results plus the total for the status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage<P> {
    pub items: Vec<ContentItem<P>>,
    pub total: u64,
    pub has_more: bool,
}

/// Handler for listing content in the domain of `P`.
///
/// Both reads carry a cache strategy tagged with the same tags that
/// mutations invalidate.
pub struct ListContentHandler<P> {
    reader: Arc<dyn ContentReader<P>>,
    cache_ttl: Duration,
}

impl<P: ContentPayload> ListContentHandler<P> {
    pub fn new(reader: Arc<dyn ContentReader<P>>, cache_ttl: Duration) -> Self {
        Self { reader, cache_ttl }
    }

    pub async fn handle(
        &self,
        caller: &Caller,
        query: ListContentQuery,
    ) -> Result<ContentPage<P>, ContentError> {
        if !caller.can_view() {
            return Err(ContentError::Forbidden);
        }
        if query.per_page == 0 {
            return Err(ContentError::Validation {
                field: "per_page".to_string(),
                message: "per_page must be greater than zero".to_string(),
            });
        }
        if query.page.saturating_sub(1).checked_mul(query.per_page).is_none() {
            return Err(ContentError::Validation {
                field: "page".to_string(),
                message: "page is out of range".to_string(),
            });
        }
        let owner = &caller.user_id;

        let options = ListOptions::paginated(query.page, query.per_page)
            .with_order(query.order)
            .with_cache_strategy(CacheStrategy::new(
                self.cache_ttl,
                vec![build_content_cache_tag(P::DOMAIN, query.status, owner)],
            ));
        let count_strategy = CacheStrategy::new(
            self.cache_ttl,
            vec![build_count_cache_tag(P::DOMAIN, query.status, owner)],
        );

        let items = self.reader.find_many(owner, query.status, &options).await?;
        let total = self
            .reader
            .count(owner, query.status, Some(&count_strategy))
            .await?;

        let seen = u64::from(options.skip.unwrap_or(0)) + items.len() as u64;
        Ok(ContentPage {
            has_more: seen < total,
            items,
            total,
        })
    }
}
