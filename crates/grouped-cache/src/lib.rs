//! grouped-cache: group-scoped invalidation on top of flat key-value stores
//!
//! # Features
//!
//! - **Group invalidation** through per-group catalogs kept in the store itself
//! - **Graceful degradation** to a disabled provider when the store is unreachable
//! - **Pluggable serialization** (JSON, MessagePack, Bincode)
//! - **Metrics integration**
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use grouped_cache::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = GroupCacheProvider::new(MemoryStore::new(), ProviderConfig::with_schema("app"));
//!
//!     cache.set(&["users", "admins"], "users", "42", &"alice", 60).await;
//!     let name: String = cache.get("users", "42", String::new()).await;
//!     println!("Got: {}", name);
//!
//!     // Drops users:42 along with everything else the admins group lists
//!     cache.invalidate_group(&["admins"]).await;
//! }
//! ```

mod provider;

// Re-export core
pub use grouped_cache_core::*;

// Re-export storage
#[cfg(feature = "memory")]
pub use grouped_cache_storage::{MemoryStore, StoreStats};

#[cfg(feature = "redis")]
pub use grouped_cache_storage::{RedisConfig, RedisStore};

pub use provider::{GroupCacheProvider, ProviderConfig, DEFAULT_CATALOG_DURATION};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CacheError, ConnectionResult, GcPolicy, GroupCacheProvider, JsonSerializer,
        KeyValueStore, ProviderConfig, Result, Serializer,
    };

    #[cfg(feature = "memory")]
    pub use crate::MemoryStore;

    #[cfg(feature = "redis")]
    pub use crate::{RedisConfig, RedisStore};

    #[cfg(feature = "msgpack")]
    pub use crate::MsgPackSerializer;

    #[cfg(feature = "bincode")]
    pub use crate::BincodeSerializer;
}
