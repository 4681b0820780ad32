use crate::{CacheMetrics, CacheOperation};
use std::time::Duration;
use tracing::{debug, warn};

/// Metrics adapter that logs events via `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingMetrics {
    /// Service name/prefix (optional)
    service_name: Option<String>,
}

impl TracingMetrics {
    /// Create new tracing metrics adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with service name prefix
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }
}

impl CacheMetrics for TracingMetrics {
    fn record_hit(&self, id: &str) {
        debug!(
            target: "grouped_cache",
            event = "hit",
            id = %id,
            service = ?self.service_name,
            "Cache Hit"
        );
    }

    fn record_miss(&self, id: &str) {
        debug!(
            target: "grouped_cache",
            event = "miss",
            id = %id,
            service = ?self.service_name,
            "Cache Miss"
        );
    }

    fn record_latency(&self, operation: CacheOperation, duration: Duration) {
        tracing::trace!(
            target: "grouped_cache",
            event = "latency",
            operation = operation.as_str(),
            duration_us = duration.as_micros() as u64,
            service = ?self.service_name,
            "Cache Operation Latency"
        );
    }

    fn record_store_error(&self, operation: CacheOperation) {
        warn!(
            target: "grouped_cache",
            event = "store_error",
            operation = operation.as_str(),
            service = ?self.service_name,
            "Store Call Failed"
        );
    }

    fn record_group_invalidation(&self, group: &str, removed: u64) {
        debug!(
            target: "grouped_cache",
            event = "group_invalidation",
            group = %group,
            removed,
            service = ?self.service_name,
            "Group Invalidated"
        );
    }

    fn record_sweep(&self, group: &str, scanned: usize, reclaimed: usize) {
        debug!(
            target: "grouped_cache",
            event = "sweep",
            group = %group,
            scanned,
            reclaimed,
            service = ?self.service_name,
            "Catalog Swept"
        );
    }
}
