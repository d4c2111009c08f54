//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Identity providers
//! - `cache` - Tag-indexed result caches (in-memory, Redis) and the caching reader
//! - `events` - In-process dispatcher and its default handlers
//! - `memory` - In-memory content store
//! - `notification` - Operator alert channels (webhook, log-only)
//! - `postgres` - PostgreSQL content store
//! - `storage` - Image object storage and the image repository

pub mod auth;
pub mod cache;
pub mod events;
pub mod memory;
pub mod notification;
pub mod postgres;
pub mod storage;
