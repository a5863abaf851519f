//! Cache Module
//!
//! Time-bounded copies of job entities, keyed by job id. The key-value layer
//! (`KvStore`) is either the in-process TTL store or Redis; `JobCache` adds
//! JSON (de)serialization on top. There is no invalidation API: writers rely
//! on the entry TTL to bound staleness.

mod entry;
mod job_cache;
mod lru;
mod memory;
mod redis_kv;
mod store;


use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

// Re-export public types
pub use entry::CacheEntry;
pub use job_cache::{JobCache, KvJobCache};
pub use lru::LruTracker;
pub use memory::MemoryKv;
pub use redis_kv::RedisKv;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Job entry lifetime used when none is configured
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

// == Cache Error Enum ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Entry could not be encoded or a stored entry is corrupt
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backing store unreachable
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),

    /// Key or value outside store limits
    #[error("Invalid cache request: {0}")]
    InvalidRequest(String),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),
}

// == Key-Value Store ==
/// String key-value store with per-entry expiry.
///
/// A miss or an expired entry is `Ok(None)`, never an error.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any existing entry.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
