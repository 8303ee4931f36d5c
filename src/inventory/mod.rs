//! Inventory Access Module
//!
//! Orchestrates the cache and the entity store for the five inventory operations.

mod service;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
pub(crate) mod testing;

pub use service::{product_key, InventoryService, PRODUCTS_KEY, PRODUCT_CACHE_TTL};
