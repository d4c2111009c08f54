//! Image object storage adapters.
//!
//! - `LocalObjectStorage` - Files below a root directory
//! - `InMemoryObjectStorage` - In-memory map (testing)
//! - `StoredImageRepository` - Keeps objects in step with image rows

mod image_repository;
mod in_memory_object_storage;
mod local_object_storage;

pub use image_repository::StoredImageRepository;
pub use in_memory_object_storage::InMemoryObjectStorage;
pub use local_object_storage::LocalObjectStorage;
