//! Connection bootstrap with degrade-to-disabled on failure

use std::future::Future;

use tracing::{info, warn};

use grouped_cache_core::{ConnectionResult, KeyValueStore, Result};

use super::{GroupCacheProvider, ProviderConfig};

impl<S: KeyValueStore> GroupCacheProvider<S> {
    /// Build a provider from whatever `connector` yields
    ///
    /// Never fails: a connector error produces a disabled provider, and the
    /// returned [`ConnectionResult`] tells the owning facade to bypass caching.
    pub async fn connect_with<F, Fut>(
        config: ProviderConfig,
        connector: F,
    ) -> (Self, ConnectionResult)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<S>>,
    {
        match connector().await {
            Ok(store) => {
                info!(
                    store = store.name(),
                    schema = %config.schema,
                    "cache provider enabled"
                );
                let result = ConnectionResult::enabled(config.schema.clone());
                (Self::new(store, config), result)
            }
            Err(e) => {
                warn!(
                    schema = %config.schema,
                    error = %e,
                    unreachable = e.is_connection_failure(),
                    "cache store unusable, provider disabled"
                );
                let result = ConnectionResult::disabled(config.schema.clone(), e);
                (Self::disabled(config), result)
            }
        }
    }
}

#[cfg(feature = "redis")]
impl GroupCacheProvider<grouped_cache_storage::RedisStore> {
    /// Connect to Redis
    ///
    /// # Example
    /// ```rust,no_run
    /// use grouped_cache::prelude::*;
    ///
    /// # async fn run() {
    /// let (cache, status) = GroupCacheProvider::connect(
    ///     RedisConfig::new("127.0.0.1").read_timeout(std::time::Duration::from_millis(500)),
    ///     ProviderConfig::with_schema("app"),
    /// )
    /// .await;
    ///
    /// if status.enabled {
    ///     cache.set(&["users"], "users", "u1", &"alice", 60).await;
    /// }
    /// # }
    /// ```
    pub async fn connect(
        redis: grouped_cache_storage::RedisConfig,
        config: ProviderConfig,
    ) -> (Self, ConnectionResult) {
        Self::connect_with(config, || grouped_cache_storage::RedisStore::connect(redis)).await
    }
}
