//! Oversell safety under concurrent creates
//!
//! The sufficiency pre-check and the decrement are separate steps, so
//! concurrent creates can all pass the pre-check for the last units. The
//! store's conditional decrement is what guarantees the floor: losers
//! fail inside their atomic scope and roll back completely.

use order_core::store::{Catalog, Store};
use order_core::{MemoryStore, OrderError, OrdersManager, RedbStore};
use rust_decimal::Decimal;
use shared::models::{Actor, ActorRole, Item, LineItemInput};
use std::sync::Arc;

const STOCK: u32 = 5;
const BUYERS: usize = 16;

fn hammer_scarce_item<S>(store: Arc<S>)
where
    S: Store + Catalog + 'static,
{
    store
        .upsert_item(&Item::new("scarce", "Scarce", Decimal::from(100), STOCK))
        .unwrap();
    let manager = Arc::new(OrdersManager::new(store.clone(), store.clone()));

    let handles: Vec<_> = (0..BUYERS)
        .map(|i| {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || {
                let actor = Actor::new(
                    format!("buyer-{i}"),
                    format!("Buyer {i}"),
                    ActorRole::Standard,
                );
                manager.create(
                    &actor,
                    vec![LineItemInput {
                        item_id: "scarce".to_string(),
                        quantity: 1,
                    }],
                )
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let successes = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(successes, STOCK as usize);

    for result in results {
        if let Err(err) = result {
            assert!(
                matches!(err, OrderError::InsufficientStock { .. }),
                "losers must see the stock failure, got: {err}"
            );
        }
    }

    assert_eq!(store.stock_level("scarce").unwrap(), Some(0));
    assert_eq!(manager.list_for(&elevated()).unwrap().len(), STOCK as usize);
}

fn elevated() -> Actor {
    Actor::new("ops", "Operator", ActorRole::Elevated)
}

#[test]
fn test_memory_store_never_oversells() {
    hammer_scarce_item(Arc::new(MemoryStore::new()));
}

#[test]
fn test_redb_store_never_oversells() {
    hammer_scarce_item(Arc::new(RedbStore::open_in_memory().unwrap()));
}
