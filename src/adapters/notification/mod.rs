//! Notification adapters.
//!
//! - `WebhookNotifier` - JSON POST to a configured endpoint
//! - `LogOnlyNotifier` - Logs instead of delivering (no webhook configured)

mod log_only;
mod webhook;

pub use log_only::LogOnlyNotifier;
pub use webhook::{WebhookConfig, WebhookNotifier};
