//! Job Cache Module
//!
//! Typed cache of `Job` entities over any `KvStore`, stored as JSON under the
//! decimal job id.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{CacheError, KvStore};
use crate::models::Job;

/// Cache contract consumed by the job read path.
#[async_trait]
pub trait JobCache: Send + Sync {
    /// `Ok(None)` on a miss or expiry; errors only for corruption or
    /// connectivity.
    async fn fetch(&self, job_id: u64) -> Result<Option<Job>, CacheError>;

    /// Overwrites any entry for `job_id`.
    async fn add(&self, job_id: u64, job: &Job, ttl: Duration) -> Result<(), CacheError>;
}

pub struct KvJobCache<S> {
    store: S,
}

impl<S: KvStore> KvJobCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: KvStore> JobCache for KvJobCache<S> {
    async fn fetch(&self, job_id: u64) -> Result<Option<Job>, CacheError> {
        let Some(raw) = self.store.get(&job_id.to_string()).await? else {
            return Ok(None);
        };
        let job = serde_json::from_str(&raw)
            .map_err(|e| CacheError::Serialization(format!("job {job_id}: {e}")))?;
        Ok(Some(job))
    }

    async fn add(&self, job_id: u64, job: &Job, ttl: Duration) -> Result<(), CacheError> {
        let raw =
            serde_json::to_string(job).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.store.set(&job_id.to_string(), raw, ttl).await?;
        debug!(job_id, ttl_ms = ttl.as_millis() as u64, "job cached");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryKv;
    use crate::models::job::fixtures::new_job;

    const MINUTE: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_add_then_fetch() {
        let cache = KvJobCache::new(MemoryKv::new(10));
        let job = new_job("Backend Engineer").into_job(42, 1);

        cache.add(42, &job, MINUTE).await.unwrap();

        assert_eq!(cache.fetch(42).await.unwrap(), Some(job));
    }

    #[tokio::test]
    async fn test_fetch_miss() {
        let cache = KvJobCache::new(MemoryKv::new(10));
        assert_eq!(cache.fetch(42).await, Ok(None));
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_serialization_error() {
        let kv = MemoryKv::new(10);
        kv.set("42", "{not json".to_string(), MINUTE).await.unwrap();
        let cache = KvJobCache::new(kv);

        assert!(matches!(
            cache.fetch(42).await,
            Err(CacheError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_entry_expires() {
        let cache = KvJobCache::new(MemoryKv::new(10));
        let job = new_job("Backend Engineer").into_job(1, 1);
        cache
            .add(1, &job, Duration::from_millis(20))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.fetch(1).await, Ok(None));
    }
}
