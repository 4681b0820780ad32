//! grouped-cache-storage: Key-value stores for grouped-cache

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "memory")]
pub use memory::{MemoryStore, StoreStats};

#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisStore};
