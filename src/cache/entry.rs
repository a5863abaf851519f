//! Cache Entry Module
//!
//! A stored value plus its absolute expiry.

use std::time::{Duration, Instant};

use crate::cache::CacheError;

// == Cache Entry ==
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized payload
    pub value: String,
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Fails with `InvalidRequest` when `ttl` puts the expiry beyond what
    /// the monotonic clock can represent.
    pub fn new(value: String, ttl: Duration) -> Result<Self, CacheError> {
        let expires_at = Instant::now().checked_add(ttl).ok_or_else(|| {
            CacheError::InvalidRequest(format!("TTL of {}s is out of range", ttl.as_secs()))
        })?;
        Ok(Self { value, expires_at })
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches `expires_at`.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}
