//! Group-aware cache provider

use std::sync::Arc;
use std::time::Instant;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, trace, warn};

use grouped_cache_core::{
    CacheError, CacheMetrics, CacheOperation, GcPolicy, IdGenerator, JsonSerializer,
    KeyValueStore, NoopMetrics, SchemaIdGenerator, Serializer,
};

mod catalog;
mod connect;

/// Default catalog lifetime cap: seven days
pub const DEFAULT_CATALOG_DURATION: u64 = 7 * 24 * 60 * 60;

/// Configuration for GroupCacheProvider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Prefix for every member and catalog id
    pub schema: String,
    /// Catalog lifetime cap in seconds (0 = unbounded)
    pub catalog_duration: u64,
    /// When catalog writes also sweep stale members
    pub gc_policy: GcPolicy,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            schema: String::new(),
            catalog_duration: DEFAULT_CATALOG_DURATION,
            gc_policy: GcPolicy::default(),
        }
    }
}

impl ProviderConfig {
    /// Create config with a schema prefix
    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            ..Default::default()
        }
    }

    /// Set the catalog lifetime cap (0 = unbounded)
    pub fn catalog_duration(mut self, seconds: u64) -> Self {
        self.catalog_duration = seconds;
        self
    }

    /// Set the sweep sampling policy
    pub fn gc_policy(mut self, policy: GcPolicy) -> Self {
        self.gc_policy = policy;
        self
    }
}

/// Cache provider that adds group invalidation to a flat key-value store
///
/// Each group gets a catalog entry listing its members' ids; writes keep the
/// catalogs up to date and group invalidation walks them. Nothing here is
/// transactional: a catalog and the entry it references are written
/// separately, and concurrent writers to one group may drop each other's
/// catalog insertions. Expiry and sampled sweeps clean up what that leaves
/// behind.
///
/// A provider built without a store (see [`GroupCacheProvider::disabled`])
/// answers every call with `false`, an empty result, or the caller's default.
///
/// Generic over:
/// - `S`: the key-value store (Memory, Redis)
/// - `Z`: the serializer (JSON, MessagePack, Bincode)
/// - `I`: the id generator
/// - `M`: the metrics collector
pub struct GroupCacheProvider<S, Z = JsonSerializer, I = SchemaIdGenerator, M = NoopMetrics>
where
    S: KeyValueStore,
    Z: Serializer,
    I: IdGenerator,
    M: CacheMetrics,
{
    store: Option<Arc<S>>,
    serializer: Arc<Z>,
    ids: Arc<I>,
    metrics: Arc<M>,
    config: ProviderConfig,
}

// Constructors for default serializer/ids/metrics
impl<S: KeyValueStore> GroupCacheProvider<S> {
    /// Create a provider over a connected store
    pub fn new(store: S, config: ProviderConfig) -> Self {
        Self::with_serializer_and_metrics(store, JsonSerializer, NoopMetrics, config)
    }

    /// Create a provider with no usable store
    pub fn disabled(config: ProviderConfig) -> Self {
        let ids = SchemaIdGenerator::new(config.schema.clone());
        Self::from_parts(None, JsonSerializer, ids, NoopMetrics, config)
    }
}

impl<S, Z, M> GroupCacheProvider<S, Z, SchemaIdGenerator, M>
where
    S: KeyValueStore,
    Z: Serializer,
    M: CacheMetrics,
{
    /// Create a provider with custom serializer and metrics
    pub fn with_serializer_and_metrics(
        store: S,
        serializer: Z,
        metrics: M,
        config: ProviderConfig,
    ) -> Self {
        let ids = SchemaIdGenerator::new(config.schema.clone());
        Self::from_parts(Some(store), serializer, ids, metrics, config)
    }
}

// Full generic implementation
impl<S, Z, I, M> GroupCacheProvider<S, Z, I, M>
where
    S: KeyValueStore,
    Z: Serializer,
    I: IdGenerator,
    M: CacheMetrics,
{
    /// Assemble a provider from every part; `None` builds it disabled
    pub fn from_parts(
        store: Option<S>,
        serializer: Z,
        ids: I,
        metrics: M,
        config: ProviderConfig,
    ) -> Self {
        Self {
            store: store.map(Arc::new),
            serializer: Arc::new(serializer),
            ids: Arc::new(ids),
            metrics: Arc::new(metrics),
            config,
        }
    }

    /// Whether a store is attached
    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// The attached store, if any
    pub fn store(&self) -> Option<&S> {
        self.store.as_deref()
    }

    /// Provider configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Store a value under `(group, key)` and register it in every catalog of
    /// `groups`
    ///
    /// An empty `group` skips catalog work entirely. `duration` is the TTL in
    /// seconds; 0 stores the value without expiry. Returns whether the entry
    /// itself was written: a failed catalog write is logged but does not
    /// change the result.
    pub async fn set<T>(
        &self,
        groups: &[&str],
        group: &str,
        key: &str,
        value: &T,
        duration: u64,
    ) -> bool
    where
        T: Serialize,
    {
        let Some(store) = self.store.as_deref() else {
            return false;
        };
        let start = Instant::now();
        let uid = self.ids.member_id(group, key);

        let payload = match self.serializer.serialize(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(id = %uid, error = %e, "value could not be serialized, not cached");
                return false;
            }
        };

        let mut catalogs_failed = 0usize;
        if !group.is_empty() {
            for name in groups {
                if !self.register_member(store, name, &uid, duration).await {
                    catalogs_failed += 1;
                }
            }
        }

        let written = match store.set(&uid, payload, duration).await {
            Ok(()) => true,
            Err(e) => {
                self.report_failure(CacheOperation::Set, &uid, &e);
                false
            }
        };

        if catalogs_failed > 0 {
            debug!(
                id = %uid,
                catalogs_failed,
                "entry may be missed by group invalidation"
            );
        }
        trace!(id = %uid, groups = groups.len(), duration, written, "entry stored");
        self.metrics
            .record_latency(CacheOperation::Set, start.elapsed());
        written
    }

    /// Read the value under `(group, key)`, or `default` when it is absent,
    /// unreadable, or not a `T`
    pub async fn get<T>(&self, group: &str, key: &str, default: T) -> T
    where
        T: DeserializeOwned,
    {
        self.try_get(group, key).await.unwrap_or(default)
    }

    /// Read the value under `(group, key)` if there is a usable one
    pub async fn try_get<T>(&self, group: &str, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let store = self.store.as_deref()?;
        let start = Instant::now();
        let uid = self.ids.member_id(group, key);

        let value = match store.get(&uid).await {
            Ok(Some(bytes)) => match self.serializer.deserialize::<T>(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!(id = %uid, error = %e, "stored value not decodable, treated as miss");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                self.report_failure(CacheOperation::Get, &uid, &e);
                None
            }
        };

        if value.is_some() {
            self.metrics.record_hit(&uid);
        } else {
            self.metrics.record_miss(&uid);
        }
        self.metrics
            .record_latency(CacheOperation::Get, start.elapsed());
        value
    }

    /// Delete the entry under `(group, key)`
    ///
    /// Catalogs keep listing the id until a sweep or a group invalidation
    /// drops it. Returns whether a key was actually removed.
    pub async fn invalidate(&self, group: &str, key: &str) -> bool {
        let Some(store) = self.store.as_deref() else {
            return false;
        };
        let start = Instant::now();
        let uid = self.ids.member_id(group, key);

        let removed = match store.delete(&uid).await {
            Ok(count) => count,
            Err(e) => {
                self.report_failure(CacheOperation::Invalidate, &uid, &e);
                0
            }
        };

        self.metrics
            .record_latency(CacheOperation::Invalidate, start.elapsed());
        removed > 0
    }

    /// Flush the whole active namespace, entries and catalogs alike
    pub async fn invalidate_all(&self) -> bool {
        let Some(store) = self.store.as_deref() else {
            return false;
        };
        let start = Instant::now();

        let flushed = match store.flush().await {
            Ok(()) => true,
            Err(e) => {
                self.report_failure(CacheOperation::InvalidateAll, "*", &e);
                false
            }
        };

        debug!(store = store.name(), flushed, "namespace flushed");
        self.metrics
            .record_latency(CacheOperation::InvalidateAll, start.elapsed());
        flushed
    }

    /// Switch the store's active logical database
    pub async fn select(&self, index: i64) -> bool {
        let Some(store) = self.store.as_deref() else {
            return false;
        };
        let start = Instant::now();

        let selected = match store.select(index).await {
            Ok(()) => true,
            Err(e) => {
                self.report_failure(CacheOperation::Select, &index.to_string(), &e);
                false
            }
        };

        self.metrics
            .record_latency(CacheOperation::Select, start.elapsed());
        selected
    }

    /// Log and count a store call whose failure is being swallowed
    fn report_failure(&self, operation: CacheOperation, id: &str, err: &CacheError) {
        warn!(
            operation = operation.as_str(),
            id = %id,
            error = %err,
            "store call failed"
        );
        self.metrics.record_store_error(operation);
    }
}

impl<S, Z, I, M> Clone for GroupCacheProvider<S, Z, I, M>
where
    S: KeyValueStore,
    Z: Serializer,
    I: IdGenerator,
    M: CacheMetrics,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            serializer: self.serializer.clone(),
            ids: self.ids.clone(),
            metrics: self.metrics.clone(),
            config: self.config.clone(),
        }
    }
}
