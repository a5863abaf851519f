//! Cache Store Module
//!
//! In-process key-value engine: HashMap storage with LRU capacity eviction
//! and per-entry expiry. Synchronous; `MemoryKv` puts it behind a lock.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheError, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores a value, replacing any existing entry and resetting its TTL.
    ///
    /// At capacity, the least recently used entry is evicted first. A TTL
    /// too large to schedule is rejected and leaves the store unchanged.
    pub fn set(&mut self, key: String, value: String, ttl: Duration) -> Result<(), CacheError> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let entry = CacheEntry::new(value, ttl)?;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                }
                None => {
                    return Err(CacheError::CacheFull(
                        "Cache is full and eviction failed".to_string(),
                    ))
                }
            }
        }

        self.lru.touch(&key);
        self.entries.insert(key, entry);
        Ok(())
    }

    // == Get ==
    /// Returns the value if present and not expired.
    ///
    /// Expired entries are dropped on read and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = self.entries.get(key)?.is_expired();
        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            return None;
        }

        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }
        expired_keys.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100);

        store.set("1".to_string(), "job-1".to_string(), MINUTE).unwrap();

        assert_eq!(store.get("1").as_deref(), Some("job-1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_missing_is_none() {
        let mut store = CacheStore::new(100);
        assert_eq!(store.get("missing"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100);

        store.set("1".to_string(), "old".to_string(), MINUTE).unwrap();
        store.set("1".to_string(), "new".to_string(), MINUTE).unwrap();

        assert_eq!(store.get("1").as_deref(), Some("new"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100);
        store
            .set("1".to_string(), "job-1".to_string(), Duration::from_millis(50))
            .unwrap();
        assert!(store.get("1").is_some());

        sleep(Duration::from_millis(80));

        assert_eq!(store.get("1"), None);
        assert!(store.is_empty(), "expired entry should be dropped on read");
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3);

        store.set("1".to_string(), "a".to_string(), MINUTE).unwrap();
        store.set("2".to_string(), "b".to_string(), MINUTE).unwrap();
        store.set("3".to_string(), "c".to_string(), MINUTE).unwrap();
        store.set("4".to_string(), "d".to_string(), MINUTE).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("1"), None);
        assert!(store.get("2").is_some());
        assert!(store.get("4").is_some());
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::new(3);

        store.set("1".to_string(), "a".to_string(), MINUTE).unwrap();
        store.set("2".to_string(), "b".to_string(), MINUTE).unwrap();
        store.set("3".to_string(), "c".to_string(), MINUTE).unwrap();
        store.get("1");
        store.set("4".to_string(), "d".to_string(), MINUTE).unwrap();

        assert!(store.get("1").is_some());
        assert_eq!(store.get("2"), None);
    }

    #[test]
    fn test_store_zero_capacity() {
        let mut store = CacheStore::new(0);
        let result = store.set("1".to_string(), "a".to_string(), MINUTE);
        assert!(matches!(result, Err(CacheError::CacheFull(_))));
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new(100);

        store
            .set("1".to_string(), "a".to_string(), Duration::from_millis(50))
            .unwrap();
        store.set("2".to_string(), "b".to_string(), MINUTE).unwrap();

        sleep(Duration::from_millis(80));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("2").is_some());
    }

    #[test]
    fn test_store_key_too_long() {
        let mut store = CacheStore::new(100);
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        let result = store.set(long_key, "value".to_string(), MINUTE);
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[test]
    fn test_store_value_too_large() {
        let mut store = CacheStore::new(100);
        let large_value = "x".repeat(MAX_VALUE_SIZE + 1);

        let result = store.set("1".to_string(), large_value, MINUTE);
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[test]
    fn test_store_unrepresentable_ttl_keeps_entry() {
        let mut store = CacheStore::new(1);
        store.set("1".to_string(), "a".to_string(), MINUTE).unwrap();

        let result = store.set("2".to_string(), "b".to_string(), Duration::from_secs(u64::MAX));
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));

        // Nothing was evicted to make room for the rejected entry
        assert_eq!(store.get("1").as_deref(), Some("a"));
        assert_eq!(store.get("2"), None);
    }
}
