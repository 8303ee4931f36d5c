//! Entity store contract for inventory records.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Inventory, InventoryPatch, NewInventory};

pub mod memory;

pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl StoreError {
    pub fn missing(id: u64) -> Self {
        StoreError::NotFound(format!("inventory {id}"))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Source of truth for inventory records.
///
/// Single-record operations are atomic; no multi-record transactions exist.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// All records ordered by id.
    async fn list(&self) -> StoreResult<Vec<Inventory>>;
    async fn get(&self, id: u64) -> StoreResult<Option<Inventory>>;
    /// Persists a new record and assigns its id.
    async fn insert(&self, record: NewInventory) -> StoreResult<Inventory>;
    async fn replace(&self, id: u64, record: NewInventory) -> StoreResult<Inventory>;
    async fn patch(&self, id: u64, patch: InventoryPatch) -> StoreResult<Inventory>;
    async fn delete(&self, id: u64) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}
