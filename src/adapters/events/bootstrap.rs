//! Default handler registration.

use std::sync::Arc;

use super::{EventDispatcher, LoggingHandler, SystemHandler};
use crate::domain::content::ContentDomain;
use crate::domain::system::{SYSTEM_ERROR, SYSTEM_WARNING};
use crate::ports::{EventHandler, EventSubscriber, Notifier};

/// Every `<domain>.created` and `<domain>.deleted` event type.
pub fn content_event_types() -> Vec<&'static str> {
    ContentDomain::ALL
        .iter()
        .flat_map(|d| [d.created_event_type(), d.deleted_event_type()])
        .collect()
}

/// Registers the logging and system handlers on `dispatcher`.
///
/// Idempotent per dispatcher: only the first call registers anything.
/// Returns whether this call performed the registration.
pub fn register_default_handlers(dispatcher: &EventDispatcher, notifier: Arc<dyn Notifier>) -> bool {
    let registered = dispatcher.initialize_once(|d| {
        let logging: Arc<dyn EventHandler> = Arc::new(LoggingHandler::new());
        d.register_all(&content_event_types(), logging);

        let system: Arc<dyn EventHandler> = Arc::new(SystemHandler::new(notifier));
        d.register_all(&[SYSTEM_WARNING, SYSTEM_ERROR], system);
    });
    if registered {
        tracing::debug!("default event handlers registered");
    }
    registered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notification::LogOnlyNotifier;

    #[test]
    fn registers_eight_content_types_and_two_system_types() {
        let dispatcher = EventDispatcher::new();
        assert!(register_default_handlers(&dispatcher, Arc::new(LogOnlyNotifier::new())));

        let types = content_event_types();
        assert_eq!(types.len(), 8);
        for t in types {
            assert_eq!(dispatcher.handler_names(t), vec!["LoggingHandler"]);
        }
        assert_eq!(dispatcher.handler_names("system.warning"), vec!["SystemHandler"]);
        assert_eq!(dispatcher.handler_names("system.error"), vec!["SystemHandler"]);
    }

    #[test]
    fn second_call_is_a_no_op() {
        let dispatcher = EventDispatcher::new();
        let notifier: Arc<dyn Notifier> = Arc::new(LogOnlyNotifier::new());

        assert!(register_default_handlers(&dispatcher, notifier.clone()));
        assert!(!register_default_handlers(&dispatcher, notifier));

        assert_eq!(dispatcher.handler_count("article.created"), 1);
        assert_eq!(dispatcher.handler_count("system.error"), 1);
    }
}
