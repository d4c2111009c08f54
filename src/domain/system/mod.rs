//! System module: operator-facing warning and error events.

mod events;

pub use events::{Severity, SystemEvent, SystemEventPayload, SYSTEM_ERROR, SYSTEM_WARNING};
