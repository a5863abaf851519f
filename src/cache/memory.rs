//! In-process `KvStore` backed by the LRU/TTL `CacheStore`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheError, CacheStore, KvStore};

/// Shared handle to a `CacheStore`. Clones share the same entries.
#[derive(Debug, Clone)]
pub struct MemoryKv {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryKv {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// The underlying store, for the expiry sweep task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: reads update LRU order and drop expired entries
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.store.write().await.set(key.to_string(), value, ttl)
    }
}
