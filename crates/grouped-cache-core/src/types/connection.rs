//! Outcome of connecting a provider to its store

use crate::CacheError;

/// What a cache facade needs to know after the provider tried to connect
///
/// When `enabled` is false the provider turns every operation into a no-op
/// and the facade should bypass caching altogether.
#[derive(Debug, Clone)]
pub struct ConnectionResult {
    /// Whether the store is reachable and the provider is live
    pub enabled: bool,
    /// Schema the provider prefixes ids with
    pub schema: String,
    /// Why the connection failed, when it did
    pub error: Option<CacheError>,
}

impl ConnectionResult {
    /// Successful connection
    pub fn enabled(schema: impl Into<String>) -> Self {
        Self {
            enabled: true,
            schema: schema.into(),
            error: None,
        }
    }

    /// Failed connection
    pub fn disabled(schema: impl Into<String>, error: CacheError) -> Self {
        Self {
            enabled: false,
            schema: schema.into(),
            error: Some(error),
        }
    }
}
