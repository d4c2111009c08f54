//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Content Ports
//!
//! - `ContentRepository` - Create/delete per content domain
//! - `StatusStore` / `StatusTransaction` - Transactional bulk status moves
//! - `ContentReader` - Owner-scoped queries with cache hints
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Dispatch domain events
//! - `EventSubscriber` - Register handlers by event type
//! - `EventHandler` - Handler that processes dispatched events
//!
//! ## Collaborator Ports
//!
//! - `TagCache` - Tag-indexed read cache
//! - `IdentityProvider` - Caller resolution
//! - `Notifier` - Operator alerts
//! - `ObjectStorage` - Image binaries

mod content_reader;
mod content_repository;
mod event_publisher;
mod event_subscriber;
mod identity_provider;
mod notifier;
mod object_storage;
mod tag_cache;

pub use content_reader::{CacheStrategy, ContentReader, ListOptions, SortOrder};
pub use content_repository::{ContentRepository, StatusStore, StatusTransaction};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use identity_provider::IdentityProvider;
pub use notifier::{Notification, Notifier};
pub use object_storage::{ObjectKey, ObjectStorage, ObjectStorageError, ObjectVariant};
pub use tag_cache::TagCache;
