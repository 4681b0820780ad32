//! Configuration for the Redis store

use std::env;
use std::time::Duration;

use grouped_cache_core::{CacheError, Result};

/// Port used when the configured port is 0
pub const DEFAULT_PORT: u16 = 6379;

/// Configuration for the Redis connection
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Server host name or address
    pub host: String,

    /// Server port (0 = [`DEFAULT_PORT`])
    pub port: u16,

    /// Logical database selected on every connection
    pub database: i64,

    /// Bounds connection establishment and pool checkout
    pub connect_timeout: Duration,

    /// Bounds every command (None = wait indefinitely)
    pub read_timeout: Option<Duration>,

    /// Extra connection attempts after the first one fails
    pub retries: u32,

    /// Pause between connection attempts
    pub retry_interval: Duration,

    /// Connection pool size
    pub pool_size: u32,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database: 0,
            connect_timeout: Duration::from_secs(8),
            read_timeout: None,
            retries: 0,
            retry_interval: Duration::from_millis(100),
            pool_size: 4,
        }
    }
}

impl RedisConfig {
    /// Create new config for a host
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Load from `GROUPED_CACHE_REDIS_*` environment variables
    ///
    /// # Environment Variables
    /// - `GROUPED_CACHE_REDIS_HOST` (default: 127.0.0.1)
    /// - `GROUPED_CACHE_REDIS_PORT` (default: 6379)
    /// - `GROUPED_CACHE_REDIS_DB` (default: 0)
    /// - `GROUPED_CACHE_REDIS_CONNECT_TIMEOUT_MS` (default: 8000)
    /// - `GROUPED_CACHE_REDIS_READ_TIMEOUT_MS` (default: unset)
    /// - `GROUPED_CACHE_REDIS_RETRIES` (default: 0)
    /// - `GROUPED_CACHE_REDIS_POOL_SIZE` (default: 4)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("GROUPED_CACHE_REDIS_HOST").unwrap_or(defaults.host),
            port: parse_var("GROUPED_CACHE_REDIS_PORT").unwrap_or(defaults.port),
            database: parse_var("GROUPED_CACHE_REDIS_DB").unwrap_or(defaults.database),
            connect_timeout: parse_var("GROUPED_CACHE_REDIS_CONNECT_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.connect_timeout),
            read_timeout: parse_var("GROUPED_CACHE_REDIS_READ_TIMEOUT_MS")
                .map(Duration::from_millis)
                .or(defaults.read_timeout),
            retries: parse_var("GROUPED_CACHE_REDIS_RETRIES").unwrap_or(defaults.retries),
            retry_interval: defaults.retry_interval,
            pool_size: parse_var("GROUPED_CACHE_REDIS_POOL_SIZE").unwrap_or(defaults.pool_size),
        }
    }

    /// Set port (0 = default)
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set logical database
    pub fn database(mut self, database: i64) -> Self {
        self.database = database;
        self
    }

    /// Set connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set per-command read timeout
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set connection retry count
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set pool size
    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = size;
        self
    }

    /// Port actually dialled
    pub fn effective_port(&self) -> u16 {
        if self.port == 0 { DEFAULT_PORT } else { self.port }
    }

    /// Connection URL for a given database
    pub fn url_for(&self, database: i64) -> String {
        format!("redis://{}:{}/{}", self.host, self.effective_port(), database)
    }

    /// Connection URL for the configured database
    pub fn url(&self) -> String {
        self.url_for(self.database)
    }

    /// Reject settings that can never connect
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(CacheError::InvalidConfig("host is empty".into()));
        }
        if self.pool_size == 0 {
            return Err(CacheError::InvalidConfig("pool_size must be at least 1".into()));
        }
        if self.database < 0 {
            return Err(CacheError::InvalidConfig(format!(
                "database index {} is negative",
                self.database
            )));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RedisConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.effective_port(), 6379);
        assert_eq!(config.connect_timeout, Duration::from_secs(8));
        assert!(config.read_timeout.is_none());
        assert_eq!(config.url(), "redis://127.0.0.1:6379/0");
    }

    #[test]
    fn test_zero_port_uses_default() {
        let config = RedisConfig::new("cache.internal").port(0);
        assert_eq!(config.effective_port(), DEFAULT_PORT);

        let config = config.port(6380);
        assert_eq!(config.url(), "redis://cache.internal:6380/0");
    }

    #[test]
    fn test_url_for_database() {
        let config = RedisConfig::new("localhost").database(2);
        assert_eq!(config.url(), "redis://localhost:6379/2");
        assert_eq!(config.url_for(5), "redis://localhost:6379/5");
    }

    #[test]
    fn test_builder() {
        let config = RedisConfig::new("localhost")
            .read_timeout(Duration::from_millis(250))
            .connect_timeout(Duration::from_secs(1))
            .retries(3)
            .pool_size(2);

        assert_eq!(config.read_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.retries, 3);
        assert_eq!(config.pool_size, 2);
    }

    #[test]
    fn test_validate() {
        assert!(RedisConfig::default().validate().is_ok());
        assert!(matches!(
            RedisConfig::new("  ").validate(),
            Err(CacheError::InvalidConfig(_))
        ));
        assert!(RedisConfig::default().pool_size(0).validate().is_err());
        assert!(RedisConfig::default().database(-1).validate().is_err());
    }
}
