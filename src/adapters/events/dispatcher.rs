//! In-process domain event dispatcher.
//!
//! Holds the event-type → handlers registry. One dispatcher is built at
//! process start and shared by reference with everything that dispatches
//! or registers.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// Registry-backed dispatcher.
///
/// - Handlers for one event type run sequentially in registration order
/// - Every handler runs even if an earlier one failed; failures are
///   aggregated into one error after the last handler
/// - The registry lock is released before any handler is awaited
///
/// # Example
///
/// ```ignore
/// let dispatcher = Arc::new(EventDispatcher::new());
/// dispatcher.register("note.created", Arc::new(LoggingHandler::new()));
/// dispatcher.dispatch(envelope).await?;
/// ```
pub struct EventDispatcher {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    initialized: OnceCell<()>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            initialized: OnceCell::new(),
        }
    }

    /// Runs `init` the first time it is called on this dispatcher.
    ///
    /// Returns `true` if `init` ran, `false` if a previous call already did.
    pub fn initialize_once<F>(&self, init: F) -> bool
    where
        F: FnOnce(&Self),
    {
        let mut ran = false;
        self.initialized.get_or_init(|| {
            init(self);
            ran = true;
        });
        ran
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get().is_some()
    }

    /// Number of handlers registered for `event_type`.
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.read_handlers()
            .get(event_type)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Names of the handlers registered for `event_type`, in order.
    pub fn handler_names(&self, event_type: &str) -> Vec<&'static str> {
        self.read_handlers()
            .get(event_type)
            .map(|hs| hs.iter().map(|h| h.name()).collect())
            .unwrap_or_default()
    }

    fn read_handlers(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vec<Arc<dyn EventHandler>>>> {
        // Registration never panics mid-write, so a poisoned map is still consistent.
        self.handlers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_handlers(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<Arc<dyn EventHandler>>>> {
        self.handlers.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for EventDispatcher {
    async fn dispatch(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let type_handlers: Vec<Arc<dyn EventHandler>> = self
            .read_handlers()
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            event_type = %event.event_type,
            handlers = type_handlers.len(),
            "dispatching event"
        );

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }

    async fn dispatch_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.dispatch(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for EventDispatcher {
    fn register(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.write_handlers()
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn register_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = self.write_handlers();
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}
