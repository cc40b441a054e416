//! Seed a tiny catalog, run an order through its whole lifecycle, and
//! print the audit trail.
//!
//! ```sh
//! cargo run --example checkout_walkthrough
//! ```

use order_core::{OrdersManager, RedbStore, Store};
use rust_decimal::Decimal;
use shared::models::{Actor, ActorRole, Item, LineItemInput};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = Arc::new(RedbStore::open_in_memory()?);
    store.upsert_item(&Item::new("espresso", "Espresso", Decimal::new(180, 2), 10))?;
    store.upsert_item(&Item::new("croissant", "Croissant", Decimal::new(250, 2), 4))?;

    let manager = OrdersManager::new(store.clone(), store.clone());
    let mut audit = manager.subscribe_audit();

    let buyer = Actor::new("ana", "Ana", ActorRole::Standard);
    let order = manager.create(
        &buyer,
        vec![
            LineItemInput {
                item_id: "espresso".to_string(),
                quantity: 2,
            },
            LineItemInput {
                item_id: "croissant".to_string(),
                quantity: 1,
            },
        ],
    )?;
    println!(
        "created order {} with total {} (espresso stock now {:?})",
        order.order_id,
        order.total,
        store.stock_level("espresso")?
    );

    let paid = manager.pay(&buyer, &order.order_id)?;
    println!("pay: {}", paid.outcome.message());

    let retry = manager.pay(&buyer, &order.order_id)?;
    println!("pay retry: {}", retry.outcome.message());

    let operator = Actor::new("ops", "Operator", ActorRole::Elevated);
    let cancelled = manager.cancel(&operator, &order.order_id)?;
    println!(
        "cancel: {} (espresso stock back to {:?})",
        cancelled.outcome.message(),
        store.stock_level("espresso")?
    );

    while let Ok(event) = audit.try_recv() {
        println!(
            "audit: {} order={} actor={}",
            event.action, event.order_id, event.actor_id
        );
    }

    Ok(())
}
