//! Cache-aside access to inventory records.
//!
//! Reads consult the cache first and populate it on a miss. Writes go to the
//! entity store and then evict every entry whose content they could change:
//! `products` on create, `products` and `product_{id}` on update and delete.
//! The list is cached as one value and evicted wholesale; individual records
//! inside it are never patched in place.
//!
//! Delete evicts before touching the store, so a failed delete leaves the cache
//! empty for that record and the next read goes to the store. Update evicts
//! only after a successful save.
//!
//! No ordering is enforced between concurrent requests. A list populated from a
//! read that raced an update can stay stale until the next write evicts it or
//! its TTL runs out.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::cache::CacheClient;
use crate::error::{ApiError, Result};
use crate::models::{Inventory, InventoryPatch, NewInventory};
use crate::store::EntityStore;

/// Cache key holding the serialized list of every record.
pub const PRODUCTS_KEY: &str = "products";

/// Lifetime of every inventory cache entry.
pub const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache key for a single record.
pub fn product_key(id: u64) -> String {
    format!("product_{id}")
}

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn EntityStore>,
    cache: Arc<dyn CacheClient>,
    ttl: Duration,
}

impl InventoryService {
    pub fn new(store: Arc<dyn EntityStore>, cache: Arc<dyn CacheClient>) -> Self {
        Self {
            store,
            cache,
            ttl: PRODUCT_CACHE_TTL,
        }
    }

    /// Overrides the entry lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    // == List ==
    /// Every record, served from `products` when present.
    pub async fn list(&self) -> Result<Vec<Inventory>> {
        if let Some(records) = self.cached::<Vec<Inventory>>(PRODUCTS_KEY).await {
            return Ok(records);
        }

        let records = self.store.list().await?;
        self.populate(PRODUCTS_KEY, &records).await;
        Ok(records)
    }

    // == Retrieve ==
    /// One record, or `None` when the store has no such id.
    ///
    /// Absence is never cached.
    pub async fn retrieve(&self, id: u64) -> Result<Option<Inventory>> {
        let key = product_key(id);
        if let Some(record) = self.cached::<Inventory>(&key).await {
            return Ok(Some(record));
        }

        let Some(record) = self.store.get(id).await? else {
            debug!(id, "inventory not found");
            return Ok(None);
        };
        self.populate(&key, &record).await;
        Ok(Some(record))
    }

    // == Create ==
    /// Persists a new record and evicts the list.
    ///
    /// The new record's own entry is left to be filled by its first retrieve.
    pub async fn create(&self, payload: NewInventory) -> Result<Inventory> {
        if let Some(msg) = payload.validate() {
            return Err(ApiError::Validation(msg));
        }

        let record = self.store.insert(payload).await?;
        self.cache.delete(PRODUCTS_KEY).await;
        info!(id = record.id, name = %record.name, "inventory created");
        Ok(record)
    }

    // == Update ==
    /// Replaces every field of record `id`.
    pub async fn update(&self, id: u64, payload: NewInventory) -> Result<Inventory> {
        if let Some(msg) = payload.validate() {
            return Err(ApiError::Validation(msg));
        }

        let record = self.store.replace(id, payload).await?;
        self.invalidate_record(id).await;
        info!(id, "inventory replaced");
        Ok(record)
    }

    /// Changes only the fields present in `patch`.
    pub async fn partial_update(&self, id: u64, patch: InventoryPatch) -> Result<Inventory> {
        if let Some(msg) = patch.validate() {
            return Err(ApiError::Validation(msg));
        }

        let record = self.store.patch(id, patch).await?;
        self.invalidate_record(id).await;
        info!(id, "inventory patched");
        Ok(record)
    }

    // == Delete ==
    /// Evicts, then deletes. Cache deletions are not rolled back on failure.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.invalidate_record(id).await;
        self.store.delete(id).await?;
        info!(id, "inventory deleted");
        Ok(())
    }

    async fn invalidate_record(&self, id: u64) {
        self.cache.delete(&product_key(id)).await;
        self.cache.delete(PRODUCTS_KEY).await;
    }

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Err(err) => {
                // Unreadable entries are dropped and recomputed.
                warn!(key, error = %err, "discarding undecodable cache entry");
                self.cache.delete(key).await;
                None
            }
        }
    }

    async fn populate<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                debug!(key, ttl_secs = self.ttl.as_secs(), "cache fill");
                self.cache.set(key, json, self.ttl).await;
            }
            Err(err) => warn!(key, error = %err, "cache fill skipped"),
        }
    }
}
