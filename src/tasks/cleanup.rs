//! Expiry Sweep Task
//!
//! Periodically drops expired entries from the in-process cache store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the sweep loop; abort the returned handle on shutdown.
///
/// The write lock is held only for the sweep itself, never across a sleep.
pub fn spawn_cleanup_task(store: Arc<RwLock<CacheStore>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "cache expiry sweep started");

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.write().await.cleanup_expired();

            if removed > 0 {
                info!(removed, "cache expiry sweep removed entries");
            } else {
                debug!("cache expiry sweep found nothing to remove");
            }
        }
    })
}
