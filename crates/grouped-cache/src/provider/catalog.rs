//! Catalog read-modify-write cycle, sweeping and group invalidation

use std::time::Instant;

use tracing::{debug, trace};

use grouped_cache_core::{
    CacheMetrics, CacheOperation, Catalog, IdGenerator, KeyValueStore, Serializer,
};

use super::GroupCacheProvider;

impl<S, Z, I, M> GroupCacheProvider<S, Z, I, M>
where
    S: KeyValueStore,
    Z: Serializer,
    I: IdGenerator,
    M: CacheMetrics,
{
    /// Delete every member listed in each group's catalog, then the catalog
    ///
    /// Returns whether any store key other than the catalogs was removed.
    /// Members that already expired count for nothing; a group with no
    /// catalog is a no-op apart from the catalog delete.
    pub async fn invalidate_group(&self, groups: &[&str]) -> bool {
        let Some(store) = self.store.as_deref() else {
            return false;
        };
        let start = Instant::now();
        let mut removed = 0u64;

        for group in groups {
            let catalog_id = self.ids.catalog_id(group);
            let catalog = self.load_catalog(store, &catalog_id).await;

            let mut group_removed = 0u64;
            for id in catalog.member_ids() {
                match store.delete(id).await {
                    Ok(count) => group_removed += count,
                    Err(e) => self.report_failure(CacheOperation::InvalidateGroup, id, &e),
                }
            }

            if let Err(e) = store.delete(&catalog_id).await {
                self.report_failure(CacheOperation::InvalidateGroup, &catalog_id, &e);
            }

            debug!(
                group = %group,
                listed = catalog.len(),
                removed = group_removed,
                "group invalidated"
            );
            self.metrics.record_group_invalidation(group, group_removed);
            removed += group_removed;
        }

        self.metrics
            .record_latency(CacheOperation::InvalidateGroup, start.elapsed());
        removed > 0
    }

    /// Member ids currently listed in a group's catalog
    ///
    /// May include ids whose entries have expired but were not swept yet.
    pub async fn catalog_members(&self, group: &str) -> Vec<String> {
        let Some(store) = self.store.as_deref() else {
            return Vec::new();
        };
        let catalog_id = self.ids.catalog_id(group);
        self.load_catalog(store, &catalog_id).await.into_member_ids()
    }

    /// Add `member_id` to a group's catalog and write the catalog back
    ///
    /// Returns whether the catalog write went through.
    pub(super) async fn register_member(
        &self,
        store: &S,
        group: &str,
        member_id: &str,
        entry_ttl: u64,
    ) -> bool {
        let catalog_id = self.ids.catalog_id(group);
        let mut catalog = self.load_catalog(store, &catalog_id).await;

        if self.config.gc_policy.should_sweep() {
            self.sweep(store, group, &mut catalog).await;
        }

        catalog.insert(member_id);
        let ttl = Catalog::ttl_for(entry_ttl, self.config.catalog_duration);
        self.store_catalog(store, &catalog_id, &catalog, ttl).await
    }

    /// Load a catalog; failed reads and undecodable bytes give an empty one
    async fn load_catalog(&self, store: &S, catalog_id: &str) -> Catalog {
        let start = Instant::now();
        let catalog = match store.get(catalog_id).await {
            Ok(bytes) => Catalog::decode(self.serializer.as_ref(), bytes.as_deref()),
            Err(e) => {
                self.report_failure(CacheOperation::CatalogLoad, catalog_id, &e);
                Catalog::new()
            }
        };
        self.metrics
            .record_latency(CacheOperation::CatalogLoad, start.elapsed());
        catalog
    }

    async fn store_catalog(&self, store: &S, catalog_id: &str, catalog: &Catalog, ttl: u64) -> bool {
        let start = Instant::now();
        let stored = match catalog.encode(self.serializer.as_ref()) {
            Ok(bytes) => match store.set(catalog_id, bytes, ttl).await {
                Ok(()) => true,
                Err(e) => {
                    self.report_failure(CacheOperation::CatalogStore, catalog_id, &e);
                    false
                }
            },
            Err(e) => {
                self.report_failure(CacheOperation::CatalogStore, catalog_id, &e);
                false
            }
        };

        trace!(id = %catalog_id, members = catalog.len(), ttl, stored, "catalog stored");
        self.metrics
            .record_latency(CacheOperation::CatalogStore, start.elapsed());
        stored
    }

    /// Drop members whose entries no longer exist
    ///
    /// Costs one `exists` per member. A failing `exists` ends the pass and
    /// keeps every member not yet confirmed stale.
    async fn sweep(&self, store: &S, group: &str, catalog: &mut Catalog) -> usize {
        let start = Instant::now();
        let scanned = catalog.len();
        let mut stale = Vec::new();

        for id in catalog.member_ids() {
            match store.exists(id).await {
                Ok(true) => {}
                Ok(false) => stale.push(id.to_string()),
                Err(e) => {
                    self.report_failure(CacheOperation::CatalogSweep, id, &e);
                    break;
                }
            }
        }

        for id in &stale {
            catalog.remove(id);
        }

        debug!(group = %group, scanned, reclaimed = stale.len(), "catalog swept");
        self.metrics.record_sweep(group, scanned, stale.len());
        self.metrics
            .record_latency(CacheOperation::CatalogSweep, start.elapsed());
        stale.len()
    }
}
