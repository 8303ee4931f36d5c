//! Cache client seam consumed by the inventory service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};

/// Key-value cache with per-key expiry.
///
/// Operations never fail from the caller's point of view: a broken cache
/// behaves like one that always misses.
#[async_trait]
pub trait CacheClient: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String, ttl: Duration);
    /// Idempotent; deleting an absent key is not an error.
    async fn delete(&self, key: &str);
}

/// Process-wide cache backed by a shared [`CacheStore`].
#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl InMemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Handle on the underlying store, shared with the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Whether `key` currently holds a live entry. Does not count as a lookup.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains(key)
    }
}

#[async_trait]
impl CacheClient for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        // Write lock: reads update recency and counters.
        self.store.write().await.get(key)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) {
        if let Err(err) = self.store.write().await.set(key.to_string(), value, ttl) {
            warn!(key, error = %err, "cache write skipped");
        }
    }

    async fn delete(&self, key: &str) {
        let removed = self.store.write().await.delete(key);
        debug!(key, removed, "cache invalidate");
    }
}
