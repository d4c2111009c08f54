//! In-memory content persistence.
//!
//! - `InMemoryContentStore` - Repository, reader and status store in one

mod content_store;

pub use content_store::InMemoryContentStore;
