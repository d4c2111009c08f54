//! Foundation module - Shared domain primitives.
//!
//! Value objects, identifiers, errors, event envelopes and the
//! state-machine trait shared by every content domain.

mod auth;
mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, Caller, Credentials, Role};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{ContentId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
