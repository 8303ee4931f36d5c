//! In-memory entity store.
//!
//! Records live in a `BTreeMap` keyed by id behind a tokio `RwLock`, so
//! listing is naturally ordered and reads proceed concurrently. Ids come from
//! a counter held under the same lock and are never reused. Nothing survives
//! a restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{EntityStore, StoreError, StoreResult};
use crate::models::{Inventory, InventoryPatch, NewInventory};

#[derive(Debug, Default)]
struct Table {
    last_id: u64,
    rows: BTreeMap<u64, Inventory>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    table: RwLock<Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn list(&self) -> StoreResult<Vec<Inventory>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: u64) -> StoreResult<Option<Inventory>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, record: NewInventory) -> StoreResult<Inventory> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let stored = record.into_record(table.last_id);
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn replace(&self, id: u64, record: NewInventory) -> StoreResult<Inventory> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or_else(|| StoreError::missing(id))?;
        *row = record.into_record(id);
        Ok(row.clone())
    }

    async fn patch(&self, id: u64, patch: InventoryPatch) -> StoreResult<Inventory> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or_else(|| StoreError::missing(id))?;
        patch.apply(row);
        Ok(row.clone())
    }

    async fn delete(&self, id: u64) -> StoreResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::missing(id))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: u32) -> NewInventory {
        NewInventory {
            name: name.to_string(),
            description: String::new(),
            quantity,
            price: 1.0,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let a = store.insert(item("a", 1)).await.unwrap();
        let b = store.insert(item("b", 2)).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.list().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryStore::new();
        let a = store.insert(item("a", 1)).await.unwrap();
        store.delete(a.id).await.unwrap();

        let b = store.insert(item("b", 1)).await.unwrap();
        assert_eq!(b.id, 2);
        assert!(store.get(a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn replace_and_patch_keep_identity() {
        let store = InMemoryStore::new();
        let a = store.insert(item("a", 1)).await.unwrap();

        let replaced = store.replace(a.id, item("z", 5)).await.unwrap();
        assert_eq!((replaced.id, replaced.name.as_str()), (a.id, "z"));

        let patched = store
            .patch(
                a.id,
                InventoryPatch {
                    quantity: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.quantity, 9);
        assert_eq!(patched.name, "z");
    }

    #[tokio::test]
    async fn missing_ids_report_not_found() {
        let store = InMemoryStore::new();

        assert!(matches!(
            store.replace(3, item("x", 1)).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.patch(3, InventoryPatch::default()).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.delete(3).await, Err(StoreError::NotFound(_))));
    }
}
