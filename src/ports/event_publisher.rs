//! EventPublisher port - Interface for dispatching domain events.
//!
//! Mutation code hands events to this port after its write has committed;
//! it never learns which handlers exist.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for dispatching domain events to registered handlers.
///
/// Implementations must ensure:
/// - Every handler registered for `event.event_type` is invoked, in
///   registration order, before `dispatch` resolves
/// - Handlers registered for other types are never invoked
/// - Handler failures are reported to the caller after all handlers ran
///
/// # Example
///
/// ```ignore
/// let event = EventEnvelope::from_event(&ContentCreated::from_item(&item))?;
/// dispatcher.dispatch(event).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Dispatch a single event.
    async fn dispatch(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Dispatch several events in order.
    async fn dispatch_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
