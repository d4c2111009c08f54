//! EventSubscriber port - Interface for registering event handlers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Handlers run inline with the dispatching call, so they should be
/// quick. A handler's own failures are its concern; returning `Err` only
/// reports the failure to the dispatcher.
///
/// # Example
///
/// ```ignore
/// struct AuditTrail;
///
/// #[async_trait]
/// impl EventHandler for AuditTrail {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let created: ContentCreated = event.payload_as()?;
///         // ...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "AuditTrail"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for registering handlers against event types.
///
/// ```ignore
/// subscriber.register("article.created", logging_handler.clone());
/// subscriber.register_all(&["system.warning", "system.error"], system_handler);
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Append a handler for one event type.
    fn register(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Append the same handler for several event types.
    fn register_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Combined trait for dispatcher implementations.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
