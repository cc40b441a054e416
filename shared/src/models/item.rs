//! Catalog item model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog item with its live stock level
///
/// `price` is the current catalog price; orders snapshot it at creation
/// and are unaffected by later changes. `stock` is the available-to-sell
/// quantity; it never goes negative - the store's conditional decrement
/// enforces the floor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Item ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Current unit price (non-negative)
    pub price: Decimal,
    /// Available quantity
    pub stock: u32,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
        }
    }

    /// Whether the item can cover the requested quantity
    pub fn has_stock(&self, requested: u32) -> bool {
        self.stock >= requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_stock() {
        let item = Item::new("item-1", "Widget", Decimal::new(999, 2), 5);
        assert!(item.has_stock(5));
        assert!(item.has_stock(1));
        assert!(!item.has_stock(6));
    }
}
