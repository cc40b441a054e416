//! End-to-end checkout flow against the redb binding

use order_core::{OrdersManager, RedbStore, Store};
use rust_decimal::Decimal;
use shared::models::{Actor, ActorRole, Item, LineItemInput, OrderStatus, TransitionOutcome};
use std::sync::Arc;

fn seed(store: &RedbStore) {
    store
        .upsert_item(&Item::new("apple", "Apple", Decimal::from(500), 10))
        .unwrap();
    store
        .upsert_item(&Item::new("banana", "Banana", Decimal::new(250, 2), 2))
        .unwrap();
}

fn buyer() -> Actor {
    Actor::new("buyer-1", "Test Buyer", ActorRole::Standard)
}

fn line(item_id: &str, quantity: i32) -> LineItemInput {
    LineItemInput {
        item_id: item_id.to_string(),
        quantity,
    }
}

#[test]
fn test_full_lifecycle_on_redb() {
    let store = Arc::new(RedbStore::open_in_memory().unwrap());
    seed(&store);
    let manager = OrdersManager::new(store.clone(), store.clone());

    let order = manager.create(&buyer(), vec![line("apple", 3)]).unwrap();
    assert_eq!(order.total, Decimal::from(1500));
    assert_eq!(store.stock_level("apple").unwrap(), Some(7));

    let paid = manager.pay(&buyer(), &order.order_id).unwrap();
    assert_eq!(paid.outcome, TransitionOutcome::Paid);
    assert_eq!(store.stock_level("apple").unwrap(), Some(7));

    let cancelled = manager.cancel(&buyer(), &order.order_id).unwrap();
    assert_eq!(cancelled.outcome, TransitionOutcome::Cancelled);
    assert_eq!(store.stock_level("apple").unwrap(), Some(10));
}

#[test]
fn test_failed_create_writes_nothing_durable() {
    let store = Arc::new(RedbStore::open_in_memory().unwrap());
    seed(&store);
    let manager = OrdersManager::new(store.clone(), store.clone());

    // Banana cannot cover the request; apple must stay untouched too
    let err = manager
        .create(&buyer(), vec![line("apple", 2), line("banana", 5)])
        .unwrap_err();
    assert_eq!(
        err.code(),
        shared::error::ErrorCode::InsufficientStock
    );

    assert_eq!(store.stock_level("apple").unwrap(), Some(10));
    assert_eq!(store.stock_level("banana").unwrap(), Some(2));
    assert!(manager.list_for(&buyer()).unwrap().is_empty());
}

#[test]
fn test_orders_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.redb");

    let order_id = {
        let store = Arc::new(RedbStore::open(&path).unwrap());
        seed(&store);
        let manager = OrdersManager::new(store.clone(), store);

        let order = manager.create(&buyer(), vec![line("apple", 3)]).unwrap();
        manager.pay(&buyer(), &order.order_id).unwrap();
        order.order_id
    };

    let store = Arc::new(RedbStore::open(&path).unwrap());
    let manager = OrdersManager::new(store.clone(), store.clone());

    let stored = manager.get(&buyer(), &order_id).unwrap();
    assert_eq!(stored.status, OrderStatus::Paid);
    assert_eq!(stored.total, Decimal::from(1500));
    assert_eq!(store.stock_level("apple").unwrap(), Some(7));
}
