//! Key-value store trait

use async_trait::async_trait;
use crate::CacheError;

/// Flat key-value store the provider writes entries and catalogs into
///
/// Implementations only need per-key operations and a namespace flush; no
/// multi-key transactions are assumed. Each call is awaited to completion
/// before the provider issues the next one.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the raw payload stored at `id`
    ///
    /// Returns `None` if the id doesn't exist or has expired.
    async fn get(&self, id: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `payload` at `id`
    ///
    /// A `ttl_secs` of 0 stores the payload without expiry.
    async fn set(&self, id: &str, payload: Vec<u8>, ttl_secs: u64) -> Result<(), CacheError>;

    /// Delete the id
    ///
    /// Returns the number of keys actually removed (0 or 1).
    async fn delete(&self, id: &str) -> Result<u64, CacheError>;

    /// Check if the id currently exists
    async fn exists(&self, id: &str) -> Result<bool, CacheError>;

    /// Remove every key in the active namespace
    async fn flush(&self) -> Result<(), CacheError>;

    /// Switch the active logical namespace (database index)
    async fn select(&self, index: i64) -> Result<(), CacheError>;

    /// Short name of the store (for logs)
    fn name(&self) -> &str {
        "store"
    }
}
