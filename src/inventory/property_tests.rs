//! Property-Based Tests for cache-aside consistency
//!
//! Random operation sequences run against the service; every read must agree
//! with the entity store as it stands once the preceding write has completed.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::InMemoryCache;
use crate::inventory::testing::CountingStore;
use crate::inventory::{product_key, InventoryService};
use crate::models::{InventoryPatch, NewInventory};

#[derive(Debug, Clone)]
enum Op {
    Create { quantity: u32, price: f64 },
    Replace { id: u64, quantity: u32, price: f64 },
    Patch { id: u64, price: f64 },
    Delete { id: u64 },
    List,
    Retrieve { id: u64 },
}

/// Finite, non-negative prices, including ones without a short decimal form.
fn price_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0f64..1e6,
        any::<f64>().prop_filter("finite and non-negative", |p| p.is_finite() && *p >= 0.0),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let id = 1u64..8;
    prop_oneof![
        (0u32..1000, price_strategy()).prop_map(|(quantity, price)| Op::Create { quantity, price }),
        (id.clone(), 0u32..1000, price_strategy())
            .prop_map(|(id, quantity, price)| Op::Replace { id, quantity, price }),
        (id.clone(), price_strategy()).prop_map(|(id, price)| Op::Patch { id, price }),
        id.clone().prop_map(|id| Op::Delete { id }),
        Just(Op::List),
        Just(Op::List),
        id.prop_map(|id| Op::Retrieve { id }),
    ]
}

fn payload(quantity: u32, price: f64) -> NewInventory {
    NewInventory {
        name: format!("item-{quantity}"),
        description: String::new(),
        quantity,
        price,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_reads_never_stale_after_writes(ops in prop::collection::vec(op_strategy(), 1..40)) {
        tokio_test::block_on(async {
            let store = Arc::new(CountingStore::new());
            let cache = InMemoryCache::new(1000);
            let service = InventoryService::new(store.clone(), Arc::new(cache.clone()));

            for op in ops {
                match op {
                    Op::Create { quantity, price } => {
                        service.create(payload(quantity, price)).await.unwrap();
                    }
                    Op::Replace { id, quantity, price } => {
                        let _ = service.update(id, payload(quantity, price)).await;
                    }
                    Op::Patch { id, price } => {
                        let patch = InventoryPatch { price: Some(price), ..Default::default() };
                        let _ = service.partial_update(id, patch).await;
                    }
                    Op::Delete { id } => {
                        let _ = service.delete(id).await;
                    }
                    Op::List => {
                        let truth = store.inner_list().await;
                        prop_assert_eq!(service.list().await.unwrap(), truth.clone());

                        // A second list with no write in between is a pure cache hit.
                        let reads = store.list_calls();
                        prop_assert_eq!(service.list().await.unwrap(), truth);
                        prop_assert_eq!(store.list_calls(), reads);
                    }
                    Op::Retrieve { id } => {
                        let truth = store.inner_list().await.into_iter().find(|r| r.id == id);
                        let exists = truth.is_some();
                        prop_assert_eq!(service.retrieve(id).await.unwrap(), truth);
                        // Absence is never cached.
                        prop_assert_eq!(cache.contains(&product_key(id)).await, exists);
                    }
                }
            }
            Ok(())
        })?;
    }
}
