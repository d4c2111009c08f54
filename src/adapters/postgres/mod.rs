//! PostgreSQL adapters - Database implementations for the content ports.
//!
//! - `PostgresContentStore` - Repository, reader and status store over
//!   the shared `content_items` table

mod content_store;

pub use content_store::PostgresContentStore;
