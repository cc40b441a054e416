//! redb-backed store binding
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | JSON [`Order`] | Order records |
//! | `items` | `item_id` | JSON [`Item`] | Catalog prices + stock levels |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: copy-on-write with an
//! atomic pointer swap, so the file is always in a consistent state and a
//! commit is persistent as soon as `commit()` returns. An uncommitted
//! write transaction is aborted when dropped, which is how `run_atomic`
//! rolls back on failure.
//!
//! redb allows a single write transaction at a time; concurrent
//! `run_atomic` calls queue on `begin_write`. Reads run against the last
//! committed state and never block writers.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{Item, Order, OrderStatus};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::{Catalog, Store, StoreError, StoreResult, StoreTx};

/// Table for orders: key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Table for catalog items: key = item_id, value = JSON-serialized Item
const ITEMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("items");

/// Store backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, ephemeral deployments)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    /// Create tables up front so later read transactions never see them
    /// missing
    fn init(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ITEMS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl Store for RedbStore {
    fn find_order(&self, order_id: &str) -> StoreResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        let mut orders = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    fn stock_level(&self, item_id: &str) -> StoreResult<Option<u32>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEMS_TABLE)?;
        match table.get(item_id)? {
            Some(guard) => {
                let item: Item = serde_json::from_slice(guard.value())?;
                Ok(Some(item.stock))
            }
            None => Ok(None),
        }
    }

    fn upsert_item(&self, item: &Item) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ITEMS_TABLE)?;
            let bytes = serde_json::to_vec(item)?;
            table.insert(item.id.as_str(), bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn run_atomic<T, F>(&self, work: F) -> StoreResult<T>
    where
        F: FnOnce(&mut dyn StoreTx) -> StoreResult<T>,
    {
        let txn = self.db.begin_write()?;
        let mut tx = RedbTx { txn };
        match work(&mut tx) {
            Ok(value) => {
                tx.txn.commit()?;
                Ok(value)
            }
            // Dropping the uncommitted transaction aborts it; the original
            // failure propagates unchanged.
            Err(err) => Err(err),
        }
    }
}

impl Catalog for RedbStore {
    fn resolve_batch(&self, item_ids: &[String]) -> StoreResult<HashMap<String, Item>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEMS_TABLE)?;
        let mut resolved = HashMap::with_capacity(item_ids.len());
        for id in item_ids {
            if let Some(guard) = table.get(id.as_str())? {
                let item: Item = serde_json::from_slice(guard.value())?;
                resolved.insert(id.clone(), item);
            }
        }
        Ok(resolved)
    }
}

/// Write scope over an open redb transaction
pub struct RedbTx {
    txn: WriteTransaction,
}

impl RedbTx {
    fn load_item(&self, item_id: &str) -> StoreResult<Item> {
        let table = self.txn.open_table(ITEMS_TABLE)?;
        let item = {
            let guard = table
                .get(item_id)?
                .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))?;
            serde_json::from_slice(guard.value())?
        };
        Ok(item)
    }

    fn put_item(&mut self, item: &Item) -> StoreResult<()> {
        let mut table = self.txn.open_table(ITEMS_TABLE)?;
        let bytes = serde_json::to_vec(item)?;
        table.insert(item.id.as_str(), bytes.as_slice())?;
        Ok(())
    }
}

impl StoreTx for RedbTx {
    fn insert_order(&mut self, order: &Order) -> StoreResult<()> {
        let mut table = self.txn.open_table(ORDERS_TABLE)?;
        let bytes = serde_json::to_vec(order)?;
        table.insert(order.order_id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    fn update_order_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
        updated_at: i64,
    ) -> StoreResult<Order> {
        let mut table = self.txn.open_table(ORDERS_TABLE)?;
        let mut order: Order = {
            let guard = table
                .get(order_id)?
                .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;
            serde_json::from_slice(guard.value())?
        };
        order.status = status;
        order.updated_at = updated_at;
        let bytes = serde_json::to_vec(&order)?;
        table.insert(order_id, bytes.as_slice())?;
        Ok(order)
    }

    fn decrement_stock(&mut self, item_id: &str, amount: u32) -> StoreResult<u32> {
        let mut item = self.load_item(item_id)?;
        if item.stock < amount {
            return Err(StoreError::InsufficientStock {
                item_id: item_id.to_string(),
                available: item.stock,
                requested: amount,
            });
        }
        item.stock -= amount;
        self.put_item(&item)?;
        Ok(item.stock)
    }

    fn increment_stock(&mut self, item_id: &str, amount: u32) -> StoreResult<u32> {
        let mut item = self.load_item(item_id)?;
        item.stock = item.stock.saturating_add(amount);
        self.put_item(&item)?;
        Ok(item.stock)
    }
}
