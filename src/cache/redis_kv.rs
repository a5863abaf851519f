//! Redis-backed `KvStore`.
//!
//! Expiry is enforced by Redis itself (`SET ... EX`), so no sweep task runs
//! for this backend.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;

use crate::cache::{CacheError, KvStore};

#[derive(Clone)]
pub struct RedisKv {
    pool: Pool,
}

impl RedisKv {
    /// Builds a connection pool. Connections are opened lazily, so an
    /// unreachable server surfaces on first use as `Unavailable`.
    pub fn connect(url: &str) -> Result<Self, CacheError> {
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Round-trips a connection checkout, for startup diagnostics.
    pub async fn ping(&self) -> Result<(), CacheError> {
        self.pool
            .get()
            .await
            .map(|_| ())
            .map_err(|e| CacheError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl KvStore for RedisKv {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        // Redis EX has whole-second resolution
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_rejects_bad_url() {
        assert!(matches!(
            RedisKv::connect("not a url"),
            Err(CacheError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        // Nothing listens on port 1
        let kv = RedisKv::connect("redis://127.0.0.1:1").unwrap();

        assert!(matches!(kv.get("1").await, Err(CacheError::Unavailable(_))));
        assert!(matches!(
            kv.set("1", "{}".to_string(), Duration::from_secs(60)).await,
            Err(CacheError::Unavailable(_))
        ));
    }
}
