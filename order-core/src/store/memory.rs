//! In-memory store binding
//!
//! The substitutable double for tests and ephemeral runs. A write scope
//! takes the state lock and mutates a scratch copy; commit swaps the
//! scratch in, so a failed scope leaves the shared state untouched and
//! concurrent scopes stay serialized.

use parking_lot::RwLock;
use shared::models::{Item, Order, OrderStatus};
use std::collections::HashMap;

use super::{Catalog, Store, StoreError, StoreResult, StoreTx};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    orders: HashMap<String, Order>,
    items: HashMap<String, Item>,
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn find_order(&self, order_id: &str) -> StoreResult<Option<Order>> {
        Ok(self.state.read().orders.get(order_id).cloned())
    }

    fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.state.read().orders.values().cloned().collect())
    }

    fn stock_level(&self, item_id: &str) -> StoreResult<Option<u32>> {
        Ok(self.state.read().items.get(item_id).map(|item| item.stock))
    }

    fn upsert_item(&self, item: &Item) -> StoreResult<()> {
        self.state
            .write()
            .items
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    fn run_atomic<T, F>(&self, work: F) -> StoreResult<T>
    where
        F: FnOnce(&mut dyn StoreTx) -> StoreResult<T>,
    {
        let mut guard = self.state.write();
        let mut scratch = guard.clone();
        let mut tx = MemoryTx {
            state: &mut scratch,
        };
        // On failure the scratch copy is discarded and the shared state
        // never sees the partial writes.
        let value = work(&mut tx)?;
        *guard = scratch;
        Ok(value)
    }
}

impl Catalog for MemoryStore {
    fn resolve_batch(&self, item_ids: &[String]) -> StoreResult<HashMap<String, Item>> {
        let state = self.state.read();
        Ok(item_ids
            .iter()
            .filter_map(|id| state.items.get(id).map(|item| (id.clone(), item.clone())))
            .collect())
    }
}

/// Write scope over a scratch copy of the state
pub struct MemoryTx<'a> {
    state: &'a mut MemoryState,
}

impl StoreTx for MemoryTx<'_> {
    fn insert_order(&mut self, order: &Order) -> StoreResult<()> {
        self.state
            .orders
            .insert(order.order_id.clone(), order.clone());
        Ok(())
    }

    fn update_order_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
        updated_at: i64,
    ) -> StoreResult<Order> {
        let order = self
            .state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;
        order.status = status;
        order.updated_at = updated_at;
        Ok(order.clone())
    }

    fn decrement_stock(&mut self, item_id: &str, amount: u32) -> StoreResult<u32> {
        let item = self
            .state
            .items
            .get_mut(item_id)
            .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))?;
        if item.stock < amount {
            return Err(StoreError::InsufficientStock {
                item_id: item_id.to_string(),
                available: item.stock,
                requested: amount,
            });
        }
        item.stock -= amount;
        Ok(item.stock)
    }

    fn increment_stock(&mut self, item_id: &str, amount: u32) -> StoreResult<u32> {
        let item = self
            .state
            .items
            .get_mut(item_id)
            .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))?;
        item.stock = item.stock.saturating_add(amount);
        Ok(item.stock)
    }
}
