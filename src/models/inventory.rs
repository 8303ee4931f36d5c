//! Inventory record and its write payloads.

use serde::{Deserialize, Serialize};

/// Longest accepted product name, in bytes.
pub const MAX_NAME_LENGTH: usize = 255;

/// A stored inventory record. `id` is assigned by the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub price: f64,
}

/// Payload for create and full replace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewInventory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub price: f64,
}

impl NewInventory {
    /// Returns an error message if the payload is unacceptable.
    pub fn validate(&self) -> Option<String> {
        validate_name(&self.name).or_else(|| validate_price(self.price))
    }

    pub fn into_record(self, id: u64) -> Inventory {
        Inventory {
            id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// Payload for partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InventoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
}

impl InventoryPatch {
    pub fn validate(&self) -> Option<String> {
        self.name
            .as_deref()
            .and_then(validate_name)
            .or_else(|| self.price.and_then(validate_price))
    }

    pub fn apply(self, record: &mut Inventory) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(quantity) = self.quantity {
            record.quantity = quantity;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
    }
}

fn validate_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return Some(format!(
            "name exceeds maximum length of {} bytes",
            MAX_NAME_LENGTH
        ));
    }
    None
}

fn validate_price(price: f64) -> Option<String> {
    if !price.is_finite() || price < 0.0 {
        return Some("price must be a non-negative number".to_string());
    }
    None
}
