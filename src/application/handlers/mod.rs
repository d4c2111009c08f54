//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod batch;
pub mod content;

pub use batch::{BatchError, BatchLifecycleHandler, ResetReport, RevertReport};
pub use content::{
    ContentEntrypoint, ContentPage, ContentPorts, CreateContentCommand, CreateContentHandler,
    DeleteContentCommand, DeleteContentHandler, ListContentHandler, ListContentQuery,
};
