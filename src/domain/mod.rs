//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, events, auth)
//! - `content` - Export lifecycle, natural keys and cache tags for all content domains
//! - `system` - Severity-tagged system events

pub mod content;
pub mod foundation;
pub mod system;
