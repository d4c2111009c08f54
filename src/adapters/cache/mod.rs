//! Cache adapters.
//!
//! - `InMemoryTagCache` - Process-local tag cache
//! - `RedisTagCache` - Shared tag cache on Redis
//! - `CachedContentReader` - Read-through decorator honouring `CacheStrategy`

mod cached_reader;
mod in_memory;
mod redis;

pub use cached_reader::CachedContentReader;
pub use in_memory::InMemoryTagCache;
pub use self::redis::RedisTagCache;
