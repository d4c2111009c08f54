//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod dedup;
pub mod handlers;
mod post_commit;

pub use dedup::DeduplicationService;
pub use handlers::{
    // Batch
    BatchError, BatchLifecycleHandler, ResetReport, RevertReport,
    // Content
    ContentEntrypoint, ContentPage, ContentPorts, CreateContentCommand, CreateContentHandler,
    DeleteContentCommand, DeleteContentHandler, ListContentHandler, ListContentQuery,
};
