use super::*;
use crate::store::memory::MemoryStore;
use rust_decimal::Decimal;
use shared::models::{ActorRole, Item};

mod test_boundary;

/// Manager over a seeded in-memory store
///
/// Catalog: apple (price 500, stock 10), banana (price 2.50, stock 2).
fn create_test_manager() -> OrdersManager<MemoryStore, MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .upsert_item(&Item::new("apple", "Apple", Decimal::from(500), 10))
        .unwrap();
    store
        .upsert_item(&Item::new("banana", "Banana", Decimal::new(250, 2), 2))
        .unwrap();
    OrdersManager::new(store.clone(), store)
}

fn buyer() -> Actor {
    Actor::new("buyer-1", "Test Buyer", ActorRole::Standard)
}

fn other_buyer() -> Actor {
    Actor::new("buyer-2", "Other Buyer", ActorRole::Standard)
}

fn admin() -> Actor {
    Actor::new("admin-1", "Test Admin", ActorRole::Elevated)
}

fn line(item_id: &str, quantity: i32) -> LineItemInput {
    LineItemInput {
        item_id: item_id.to_string(),
        quantity,
    }
}

fn stock_of(manager: &OrdersManager<MemoryStore, MemoryStore>, item_id: &str) -> u32 {
    manager.store().stock_level(item_id).unwrap().unwrap()
}
