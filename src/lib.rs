//! Inventory API - CRUD over inventory records
//!
//! Serves list/retrieve/create/update/delete behind bearer-token authentication,
//! with a cache-aside layer in front of the entity store.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
