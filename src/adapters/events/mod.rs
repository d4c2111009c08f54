//! Event adapters.
//!
//! - `EventDispatcher` - In-process registry and dispatcher
//! - `LoggingHandler` - Audit log for content events
//! - `SystemHandler` - Warning/error events to logs and notifier
//! - `register_default_handlers` - One-time wiring of the two handlers

mod bootstrap;
mod dispatcher;
mod logging_handler;
mod system_handler;

pub use bootstrap::{content_event_types, register_default_handlers};
pub use dispatcher::EventDispatcher;
pub use logging_handler::LoggingHandler;
pub use system_handler::SystemHandler;
