//! TTL Cleanup Task
//!
//! Reads already skip expired entries; the sweep keeps untouched ones from
//! accumulating until they are read again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::InMemoryCache;

/// Spawns a task that drops expired cache entries every `period`.
///
/// The returned handle is aborted on shutdown.
pub fn spawn_cleanup_task(cache: InMemoryCache, period: Duration) -> JoinHandle<()> {
    let store = cache.store();

    tokio::spawn(async move {
        info!(period_ms = period.as_millis() as u64, "cache sweeper started");

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing has expired yet.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = store.write().await.cleanup_expired();
            if removed > 0 {
                info!(removed, "cache sweep removed expired entries");
            } else {
                debug!("cache sweep found nothing to remove");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheClient;

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let cache = InMemoryCache::new(100);
        cache
            .set("products", "[]".to_string(), Duration::from_millis(30))
            .await;

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(150)).await;

        let stats = cache.stats().await;
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.expirations, 1);
        // The sweep did the work, not a read.
        assert_eq!(stats.misses, 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_preserves_live_entries() {
        let cache = InMemoryCache::new(100);
        cache
            .set("product_1", "{}".to_string(), Duration::from_secs(300))
            .await;

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(cache.contains("product_1").await);
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_can_be_aborted() {
        let handle = spawn_cleanup_task(InMemoryCache::new(1), Duration::from_secs(1));

        handle.abort();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(handle.is_finished());
    }
}
