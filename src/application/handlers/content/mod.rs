//! Content command and query handlers, generic over the payload type.

mod create_content;
mod delete_content;
mod entrypoint;
mod list_content;

pub use create_content::{CreateContentCommand, CreateContentHandler};
pub use delete_content::{DeleteContentCommand, DeleteContentHandler};
pub use entrypoint::{ContentEntrypoint, ContentPorts};
pub use list_content::{ContentPage, ListContentHandler, ListContentQuery};
