//! Content Dumper - Export lifecycle for user-submitted content
//!
//! Articles, notes, images and books share one status machine
//! (`UNEXPORTED -> LAST_UPDATED -> EXPORTED`), per-owner deduplication,
//! tag-based cache invalidation and an in-process domain event dispatcher.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
