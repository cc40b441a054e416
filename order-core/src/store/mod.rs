//! Abstract transactional store
//!
//! The lifecycle manager depends on these traits, never on a storage
//! product. Two bindings ship with the crate:
//!
//! | Binding | Backing | Use |
//! |---------|---------|-----|
//! | [`redb::RedbStore`] | redb (embedded, ACID) | durable deployments |
//! | [`memory::MemoryStore`] | in-process maps | tests, ephemeral runs |
//!
//! # Atomicity
//!
//! [`Store::run_atomic`] is the transaction coordinator: every write
//! issued through the [`StoreTx`] scope commits together or not at all.
//! A failure inside the closure aborts the scope and is re-raised to the
//! caller unchanged - the coordinator never swallows or reclassifies.
//! A single lifecycle call never opens more than one scope.
//!
//! # Stock floor
//!
//! [`StoreTx::decrement_stock`] is conditional: it fails with
//! [`StoreError::InsufficientStock`] rather than drive a quantity below
//! zero. Callers may pre-check sufficiency for an early exit, but the
//! decrement itself is the guarantee under concurrent load.

mod error;
pub mod memory;
pub mod redb;

pub use error::{StoreError, StoreResult};

use shared::models::{Item, Order, OrderStatus};
use std::collections::HashMap;

/// Write contracts available inside one atomic scope
///
/// Groups the order-store and stock-store write operations; both sides of
/// a lifecycle mutation go through the same scope so they commit together.
pub trait StoreTx {
    // ========== Order writes ==========

    /// Persist a new order
    fn insert_order(&mut self, order: &Order) -> StoreResult<()>;

    /// Update an order's status, returning the updated record
    ///
    /// Fails with [`StoreError::OrderNotFound`] if the order does not
    /// exist. The store persists whatever status it is given; deciding
    /// whether a transition is legal is the lifecycle manager's job.
    fn update_order_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
        updated_at: i64,
    ) -> StoreResult<Order>;

    // ========== Stock writes ==========

    /// Conditionally decrement an item's stock, returning the new quantity
    ///
    /// Fails with [`StoreError::InsufficientStock`] instead of going below
    /// zero, and with [`StoreError::ItemNotFound`] for unknown items.
    fn decrement_stock(&mut self, item_id: &str, amount: u32) -> StoreResult<u32>;

    /// Increment an item's stock, returning the new quantity
    ///
    /// Fails with [`StoreError::ItemNotFound`] for unknown items.
    fn increment_stock(&mut self, item_id: &str, amount: u32) -> StoreResult<u32>;
}

/// Read side plus the transaction coordinator
pub trait Store: Send + Sync {
    /// Load an order by ID
    ///
    /// Returns the full record - owner, status, and embedded lines - so
    /// callers never need a second round trip.
    fn find_order(&self, order_id: &str) -> StoreResult<Option<Order>>;

    /// All orders; callers filter by owner
    fn list_orders(&self) -> StoreResult<Vec<Order>>;

    /// Current stock level for an item
    fn stock_level(&self, item_id: &str) -> StoreResult<Option<u32>>;

    /// Insert or replace a catalog item (seeding, admin tooling)
    fn upsert_item(&self, item: &Item) -> StoreResult<()>;

    /// Run `work` in one atomic scope
    ///
    /// Every write issued against the scope is durably committed, or - on
    /// any failure raised inside `work` - rolled back with the original
    /// failure re-raised unchanged.
    fn run_atomic<T, F>(&self, work: F) -> StoreResult<T>
    where
        F: FnOnce(&mut dyn StoreTx) -> StoreResult<T>;
}

/// Batch catalog resolution
///
/// Resolves a set of item identities to their current price and stock in
/// one call. Missing identities are simply absent from the result; the
/// caller decides whether absence is an error.
pub trait Catalog: Send + Sync {
    fn resolve_batch(&self, item_ids: &[String]) -> StoreResult<HashMap<String, Item>>;
}
