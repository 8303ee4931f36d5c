//! Instrumented entity store for service tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;

use crate::models::{Inventory, InventoryPatch, NewInventory};
use crate::store::{EntityStore, InMemoryStore, StoreError, StoreResult};

/// Wraps [`InMemoryStore`], counting reads and optionally failing every write.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryStore,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
    fail_writes: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Ground truth, bypassing the read counters.
    pub async fn inner_list(&self) -> Vec<Inventory> {
        self.inner.list().await.unwrap_or_default()
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unexpected(anyhow!("database is locked")));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore for CountingStore {
    async fn list(&self) -> StoreResult<Vec<Inventory>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list().await
    }

    async fn get(&self, id: u64) -> StoreResult<Option<Inventory>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id).await
    }

    async fn insert(&self, record: NewInventory) -> StoreResult<Inventory> {
        self.check_writable()?;
        self.inner.insert(record).await
    }

    async fn replace(&self, id: u64, record: NewInventory) -> StoreResult<Inventory> {
        self.check_writable()?;
        self.inner.replace(id, record).await
    }

    async fn patch(&self, id: u64, patch: InventoryPatch) -> StoreResult<Inventory> {
        self.check_writable()?;
        self.inner.patch(id, patch).await
    }

    async fn delete(&self, id: u64) -> StoreResult<()> {
        self.check_writable()?;
        self.inner.delete(id).await
    }

    fn backend_name(&self) -> &'static str {
        "counting"
    }
}
