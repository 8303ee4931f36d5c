//! Inventory record and HTTP DTOs

pub mod inventory;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use inventory::{Inventory, InventoryPatch, NewInventory};
pub use requests::{LoginRequest, RefreshRequest, RegisterRequest};
pub use responses::{AccessTokenResponse, HealthResponse, StatsResponse, TokenPairResponse};
