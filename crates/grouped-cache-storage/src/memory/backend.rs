//! In-memory key-value store using DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use grouped_cache_core::{CacheError, KeyValueStore, Result};

/// Counters for calls made against a [`MemoryStore`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// `get` calls that found a live key
    pub hits: u64,
    /// `get` calls that found nothing
    pub misses: u64,
    /// `set` calls
    pub writes: u64,
    /// Keys removed by `delete`
    pub deletes: u64,
    /// `exists` calls
    pub exists_checks: u64,
    /// `flush` calls
    pub flushes: u64,
}

#[derive(Debug, Clone)]
struct StoredValue {
    payload: Vec<u8>,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Key is (database index, id)
type Slots = DashMap<(i64, String), StoredValue>;

/// In-memory key-value store
///
/// Mirrors the subset of Redis semantics the provider relies on: per-key
/// expiry (checked lazily on access), numbered logical databases, and a flush
/// that only clears the active database.
/// Cloning creates a new handle to the SAME underlying store, including the
/// active database selection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<Slots>,
    database: Arc<AtomicI64>,
    stats: Arc<RwLock<StoreStats>>,
}

impl MemoryStore {
    /// Create an empty store on database 0
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: &str) -> (i64, String) {
        (self.database.load(Ordering::SeqCst), id.to_string())
    }

    /// Drop the slot if it has expired and report whether it is still live
    fn live(&self, slot: &(i64, String)) -> bool {
        let now = Instant::now();
        self.data.remove_if(slot, |_, value| value.is_expired(now));
        self.data.contains_key(slot)
    }

    /// Currently active database index
    pub fn database(&self) -> i64 {
        self.database.load(Ordering::SeqCst)
    }

    /// Remaining lifetime of `id`, rounded up to whole seconds
    ///
    /// `None` if the id is absent, `Some(None)` if it never expires.
    pub fn ttl(&self, id: &str) -> Option<Option<u64>> {
        let slot = self.slot(id);
        if !self.live(&slot) {
            return None;
        }
        let now = Instant::now();
        self.data.get(&slot).map(|value| {
            value.expires_at.map(|at| {
                let remaining = at.saturating_duration_since(now);
                remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
            })
        })
    }

    /// Drop `id` as if its TTL had just elapsed
    ///
    /// Unlike `delete` this is not counted in the stats; it stands in for the
    /// store expiring a key on its own.
    pub fn expire(&self, id: &str) -> bool {
        self.data.remove(&self.slot(id)).is_some()
    }

    /// Number of live keys in the active database
    pub fn len(&self) -> usize {
        let db = self.database();
        let now = Instant::now();
        self.data
            .iter()
            .filter(|entry| entry.key().0 == db && !entry.value().is_expired(now))
            .count()
    }

    /// Whether the active database holds no live keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the call counters
    pub fn stats(&self) -> StoreStats {
        self.stats.read().clone()
    }

    /// Reset the call counters
    pub fn reset_stats(&self) {
        *self.stats.write() = StoreStats::default();
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<Vec<u8>>> {
        let slot = self.slot(id);
        let found = if self.live(&slot) {
            self.data.get(&slot).map(|value| value.payload.clone())
        } else {
            None
        };

        let mut stats = self.stats.write();
        if found.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        Ok(found)
    }

    async fn set(&self, id: &str, payload: Vec<u8>, ttl_secs: u64) -> Result<()> {
        // An expiry past what `Instant` can represent is stored as no expiry
        let expires_at = if ttl_secs > 0 {
            Instant::now().checked_add(Duration::from_secs(ttl_secs))
        } else {
            None
        };
        self.data
            .insert(self.slot(id), StoredValue { payload, expires_at });
        self.stats.write().writes += 1;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let slot = self.slot(id);
        let removed = if self.live(&slot) {
            u64::from(self.data.remove(&slot).is_some())
        } else {
            0
        };
        self.stats.write().deletes += removed;
        Ok(removed)
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let found = self.live(&self.slot(id));
        self.stats.write().exists_checks += 1;
        Ok(found)
    }

    async fn flush(&self) -> Result<()> {
        let db = self.database();
        self.data.retain(|(slot_db, _), _| *slot_db != db);
        self.stats.write().flushes += 1;
        Ok(())
    }

    async fn select(&self, index: i64) -> Result<()> {
        if index < 0 {
            return Err(CacheError::InvalidConfig(format!(
                "database index {} is negative",
                index
            )));
        }
        self.database.store(index, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
