use async_trait::async_trait;
use bb8::{Pool, PooledConnection, RunError};
use bb8_redis::RedisConnectionManager;
use parking_lot::RwLock;
use redis::{AsyncCommands, RedisError, RedisResult};
use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use grouped_cache_core::{CacheError, KeyValueStore, Result};

use super::config::RedisConfig;

type RedisPool = Pool<RedisConnectionManager>;

/// Redis-backed key-value store
///
/// Holds a long-lived connection pool for its whole lifetime. Every command
/// runs on a pooled connection bound to the active database and is cut off
/// after the configured read timeout.
#[derive(Clone)]
pub struct RedisStore {
    pool: Arc<RwLock<RedisPool>>,
    database: Arc<AtomicI64>,
    config: RedisConfig,
}

impl RedisStore {
    /// Connect, retrying up to `config.retries` extra times
    ///
    /// The connection is only considered established once a `PING` round
    /// trip succeeds.
    pub async fn connect(config: RedisConfig) -> Result<Self> {
        config.validate()?;
        let pool = Self::open_pool(&config, config.database).await?;

        info!(
            host = %config.host,
            port = config.effective_port(),
            database = config.database,
            pool_size = config.pool_size,
            "connected to redis"
        );

        Ok(Self {
            pool: Arc::new(RwLock::new(pool)),
            database: Arc::new(AtomicI64::new(config.database)),
            config,
        })
    }

    /// Configuration this store was built with
    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    /// Currently active database index
    pub fn database(&self) -> i64 {
        self.database.load(Ordering::SeqCst)
    }

    async fn open_pool(config: &RedisConfig, database: i64) -> Result<RedisPool> {
        let url = config.url_for(database);
        let mut attempt = 0;
        loop {
            match Self::try_open(config, &url).await {
                Ok(pool) => return Ok(pool),
                Err(e) if attempt < config.retries => {
                    attempt += 1;
                    warn!(
                        attempt,
                        retries = config.retries,
                        error = %e,
                        "redis connection attempt failed, retrying"
                    );
                    tokio::time::sleep(config.retry_interval).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_open(config: &RedisConfig, url: &str) -> Result<RedisPool> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connect_timeout)
            .build(manager)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        {
            let mut conn = pool.get().await.map_err(Self::checkout_error)?;
            let ping = redis::cmd("PING");
            tokio::time::timeout(config.connect_timeout, ping.query_async::<String>(&mut *conn))
                .await
                .map_err(|_| CacheError::Timeout)?
                .map_err(|e| CacheError::Connection(e.to_string()))?;
        }

        Ok(pool)
    }

    fn checkout_error(err: RunError<RedisError>) -> CacheError {
        match err {
            RunError::User(e) => CacheError::Connection(e.to_string()),
            RunError::TimedOut => CacheError::Timeout,
        }
    }

    /// Get an owned connection from the current pool
    async fn connection(&self) -> Result<PooledConnection<'static, RedisConnectionManager>> {
        let pool = self.pool.read().clone();
        pool.get_owned().await.map_err(Self::checkout_error)
    }

    /// Await a command, bounded by the read timeout
    async fn timed<T, F>(&self, command: F) -> Result<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        let outcome = match self.config.read_timeout {
            Some(limit) => tokio::time::timeout(limit, command)
                .await
                .map_err(|_| CacheError::Timeout)?,
            None => command.await,
        };
        outcome.map_err(|e| CacheError::Backend(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, id: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let bytes: Option<Vec<u8>> = self.timed(conn.get(id)).await?;
        Ok(bytes)
    }

    async fn set(&self, id: &str, payload: Vec<u8>, ttl_secs: u64) -> Result<()> {
        let mut conn = self.connection().await?;
        if ttl_secs > 0 {
            let _: () = self.timed(conn.set_ex(id, payload, ttl_secs)).await?;
        } else {
            let _: () = self.timed(conn.set(id, payload)).await?;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let mut conn = self.connection().await?;
        let removed: u64 = self.timed(conn.del(id)).await?;
        Ok(removed)
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let found: bool = self.timed(conn.exists(id)).await?;
        Ok(found)
    }

    async fn flush(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = self
            .timed(redis::cmd("FLUSHDB").query_async(&mut *conn))
            .await?;
        Ok(())
    }

    /// Rebuilds the pool against the new database so that every pooled
    /// connection, including ones reopened later, lands on it.
    async fn select(&self, index: i64) -> Result<()> {
        if index < 0 {
            return Err(CacheError::InvalidConfig(format!(
                "database index {} is negative",
                index
            )));
        }
        let pool = Self::open_pool(&self.config, index).await?;
        *self.pool.write() = pool;
        self.database.store(index, Ordering::SeqCst);
        debug!(database = index, "redis database selected");
        Ok(())
    }

    fn name(&self) -> &str {
        "redis"
    }
}
