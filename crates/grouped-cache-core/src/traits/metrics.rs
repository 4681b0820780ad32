//! Metrics trait for provider observability

use std::time::Duration;

/// Provider operation for latency and error tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOperation {
    Get,
    Set,
    Invalidate,
    InvalidateGroup,
    InvalidateAll,
    Select,
    CatalogLoad,
    CatalogStore,
    CatalogSweep,
}

impl CacheOperation {
    /// Get operation as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOperation::Get => "get",
            CacheOperation::Set => "set",
            CacheOperation::Invalidate => "invalidate",
            CacheOperation::InvalidateGroup => "invalidate_group",
            CacheOperation::InvalidateAll => "invalidate_all",
            CacheOperation::Select => "select",
            CacheOperation::CatalogLoad => "catalog_load",
            CacheOperation::CatalogStore => "catalog_store",
            CacheOperation::CatalogSweep => "catalog_sweep",
        }
    }
}

/// Trait for provider metrics
///
/// Implement this to integrate with your metrics system (Prometheus, StatsD, etc.)
pub trait CacheMetrics: Send + Sync + 'static {
    /// Record a cache hit
    fn record_hit(&self, id: &str);

    /// Record a cache miss (absent or undecodable entry)
    fn record_miss(&self, id: &str);

    /// Record operation latency
    fn record_latency(&self, operation: CacheOperation, duration: Duration);

    /// Record a store call that failed and was swallowed
    fn record_store_error(&self, operation: CacheOperation);

    /// Record how many store keys a group invalidation removed
    fn record_group_invalidation(&self, group: &str, removed: u64);

    /// Record one catalog garbage-collection pass
    fn record_sweep(&self, group: &str, scanned: usize, reclaimed: usize);
}

/// No-op metrics implementation (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl CacheMetrics for NoopMetrics {
    #[inline]
    fn record_hit(&self, _id: &str) {}

    #[inline]
    fn record_miss(&self, _id: &str) {}

    #[inline]
    fn record_latency(&self, _operation: CacheOperation, _duration: Duration) {}

    #[inline]
    fn record_store_error(&self, _operation: CacheOperation) {}

    #[inline]
    fn record_group_invalidation(&self, _group: &str, _removed: u64) {}

    #[inline]
    fn record_sweep(&self, _group: &str, _scanned: usize, _reclaimed: usize) {}
}

/// Metrics adapter using the `metrics` crate
///
/// # Example
/// ```ignore
/// use grouped_cache_core::MetricsCrateAdapter;
///
/// let metrics = MetricsCrateAdapter::new("grouped_cache");
/// // Emits: grouped_cache_hits_total, grouped_cache_sweep_reclaimed_total, ...
/// ```
#[cfg(feature = "metrics")]
#[derive(Debug, Clone)]
pub struct MetricsCrateAdapter {
    prefix: String,
}

#[cfg(feature = "metrics")]
impl MetricsCrateAdapter {
    /// Create a new adapter with the given metric name prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn metric_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }
}

#[cfg(feature = "metrics")]
impl CacheMetrics for MetricsCrateAdapter {
    fn record_hit(&self, _id: &str) {
        metrics::counter!(self.metric_name("hits_total")).increment(1);
    }

    fn record_miss(&self, _id: &str) {
        metrics::counter!(self.metric_name("misses_total")).increment(1);
    }

    fn record_latency(&self, operation: CacheOperation, duration: Duration) {
        metrics::histogram!(
            self.metric_name("operation_duration_seconds"),
            "operation" => operation.as_str()
        )
        .record(duration.as_secs_f64());
    }

    fn record_store_error(&self, operation: CacheOperation) {
        metrics::counter!(
            self.metric_name("store_errors_total"),
            "operation" => operation.as_str()
        )
        .increment(1);
    }

    fn record_group_invalidation(&self, _group: &str, removed: u64) {
        metrics::counter!(self.metric_name("group_invalidations_total")).increment(1);
        metrics::counter!(self.metric_name("group_invalidated_keys_total")).increment(removed);
    }

    fn record_sweep(&self, _group: &str, scanned: usize, reclaimed: usize) {
        metrics::counter!(self.metric_name("sweeps_total")).increment(1);
        metrics::counter!(self.metric_name("sweep_scanned_total")).increment(scanned as u64);
        metrics::counter!(self.metric_name("sweep_reclaimed_total")).increment(reclaimed as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_as_str() {
        assert_eq!(CacheOperation::Get.as_str(), "get");
        assert_eq!(CacheOperation::InvalidateGroup.as_str(), "invalidate_group");
        assert_eq!(CacheOperation::CatalogSweep.as_str(), "catalog_sweep");
    }

    #[test]
    fn test_noop_metrics() {
        let metrics = NoopMetrics;
        metrics.record_hit("id");
        metrics.record_miss("id");
        metrics.record_latency(CacheOperation::Set, Duration::from_millis(1));
        metrics.record_sweep("users", 10, 3);
    }
}
