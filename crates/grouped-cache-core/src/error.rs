//! Error types for store, serializer and connection operations

use thiserror::Error;

/// Main error type for everything below the provider
///
/// The provider itself never returns these from its steady-state operations;
/// it maps them onto `false`, `0` or the caller's default value.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Store connection failed
    #[error("connection error: {0}")]
    Connection(String),

    /// Store command failed
    #[error("backend error: {0}")]
    Backend(String),

    /// Configuration rejected before connecting
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Timeout
    #[error("operation timed out")]
    Timeout,
}

impl CacheError {
    /// Whether the error came from the store connection rather than the data
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            CacheError::Connection(_) | CacheError::Timeout
        )
    }
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CacheError::Backend("READONLY".to_string());
        assert_eq!(err.to_string(), "backend error: READONLY");

        let err = CacheError::Serialization("failed".to_string());
        assert_eq!(err.to_string(), "serialization error: failed");
    }

    #[test]
    fn test_connection_failure_classification() {
        assert!(CacheError::Connection("refused".into()).is_connection_failure());
        assert!(CacheError::Timeout.is_connection_failure());
        assert!(!CacheError::Deserialization("bad".into()).is_connection_failure());
        assert!(!CacheError::Backend("oops".into()).is_connection_failure());
    }
}
