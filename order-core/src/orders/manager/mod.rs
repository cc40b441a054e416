//! OrdersManager - the order lifecycle state machine
//!
//! Drives every status change an order can go through and couples stock
//! movement to order mutation in a single atomic scope:
//!
//! ```text
//! create(actor, items)        pay(actor, order_id)       cancel(actor, order_id)
//!     ├─ validate shape           ├─ load + authorize        ├─ load + authorize
//!     ├─ resolve catalog          ├─ PAID → no-op            ├─ CANCELLED → no-op
//!     ├─ check stock              ├─ CANCELLED → conflict    ├─ run_atomic:
//!     ├─ snapshot prices          └─ run_atomic:             │    restore stock
//!     ├─ run_atomic:                   status → PAID         │    status → CANCELLED
//!     │    insert order                                      └─ audit (notable if paid)
//!     │    decrement stock
//!     └─ audit
//! ```
//!
//! The manager holds no locks of its own; isolation comes from the
//! store's `run_atomic`. The stock sufficiency pre-check in `create` is
//! an early exit - the store's conditional decrement is the actual floor,
//! so two concurrent creates racing for the last unit both pass the
//! pre-check but only one commits; the loser's whole scope rolls back.

mod error;
pub use error::*;

#[cfg(test)]
mod tests;

use crate::audit::{AuditAction, AuditEvent};
use crate::orders::money;
use crate::store::{Catalog, Store, StoreError};
use chrono::Utc;
use shared::models::{
    Actor, LineItemInput, Order, OrderLine, OrderStatus, TransitionOutcome, TransitionResult,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Audit broadcast channel capacity
const AUDIT_CHANNEL_CAPACITY: usize = 4096;

/// Order lifecycle manager
///
/// Constructed once with its collaborators and shared by reference across
/// concurrent callers. Store and catalog are usually the same object;
/// tests substitute doubles for either side independently.
pub struct OrdersManager<S, C> {
    store: Arc<S>,
    catalog: Arc<C>,
    audit_tx: broadcast::Sender<AuditEvent>,
}

impl<S, C> std::fmt::Debug for OrdersManager<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager").finish_non_exhaustive()
    }
}

impl<S: Store, C: Catalog> OrdersManager<S, C> {
    pub fn new(store: Arc<S>, catalog: Arc<C>) -> Self {
        let (audit_tx, _) = broadcast::channel(AUDIT_CHANNEL_CAPACITY);
        Self {
            store,
            catalog,
            audit_tx,
        }
    }

    /// Subscribe to audit events
    ///
    /// Events are emitted after the corresponding commit; a subscriber
    /// never sees an event for a rolled-back change.
    pub fn subscribe_audit(&self) -> broadcast::Receiver<AuditEvent> {
        self.audit_tx.subscribe()
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an order for `actor` from the given line items
    ///
    /// Validates shape, resolves every item against the catalog in one
    /// batch, checks stock sufficiency, then persists the new order and
    /// decrements stock for every line in one atomic scope. Unit prices
    /// and the total are frozen at this point. No partial stock is ever
    /// reserved: all checks complete before the first write, and the
    /// scope rolls back as a unit.
    pub fn create(&self, actor: &Actor, items: Vec<LineItemInput>) -> OrderResult<Order> {
        if items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        for line in &items {
            money::validate_line(line)?;
        }

        // Aggregate requested quantity per item so duplicate lines for
        // the same item are checked against stock as one demand.
        let mut requested: HashMap<String, u32> = HashMap::new();
        let mut ids: Vec<String> = Vec::new();
        for line in &items {
            match requested.get_mut(&line.item_id) {
                Some(quantity) => *quantity += line.quantity as u32,
                None => {
                    requested.insert(line.item_id.clone(), line.quantity as u32);
                    ids.push(line.item_id.clone());
                }
            }
        }

        let resolved = self.catalog.resolve_batch(&ids)?;

        let mut missing: Vec<String> = ids
            .iter()
            .filter(|id| !resolved.contains_key(*id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(OrderError::UnknownItems { item_ids: missing });
        }

        // All stock checks happen before any mutation begins
        for id in &ids {
            if let Some(item) = resolved.get(id) {
                let want = requested[id.as_str()];
                if !item.has_stock(want) {
                    return Err(OrderError::InsufficientStock {
                        item_id: id.clone(),
                        available: item.stock,
                        requested: want,
                    });
                }
            }
        }

        // Snapshot names and unit prices, freeze the total
        let mut lines = Vec::with_capacity(items.len());
        for line in &items {
            let Some(item) = resolved.get(&line.item_id) else {
                return Err(OrderError::UnknownItems {
                    item_ids: vec![line.item_id.clone()],
                });
            };
            lines.push(OrderLine {
                item_id: line.item_id.clone(),
                name: item.name.clone(),
                quantity: line.quantity as u32,
                unit_price: item.price,
            });
        }
        let total = money::order_total(&lines);

        let now = Utc::now().timestamp_millis();
        let order = Order {
            order_id: uuid::Uuid::new_v4().to_string(),
            actor_id: actor.id.clone(),
            lines,
            total,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
        };

        // One atomic unit: the order row plus every stock decrement
        self.store
            .run_atomic(|tx| {
                tx.insert_order(&order)?;
                for line in &order.lines {
                    tx.decrement_stock(&line.item_id, line.quantity)?;
                }
                Ok(())
            })
            .map_err(|err| match err {
                // The conditional decrement lost a race the pre-check
                // could not see; surface the same validation failure.
                StoreError::InsufficientStock {
                    item_id,
                    available,
                    requested,
                } => OrderError::InsufficientStock {
                    item_id,
                    available,
                    requested,
                },
                other => OrderError::Storage(other),
            })?;

        tracing::info!(
            order_id = %order.order_id,
            actor_id = %actor.id,
            total = %order.total,
            lines = order.lines.len(),
            "Order created"
        );
        self.emit(AuditEvent::new(AuditAction::OrderCreated, &order, actor));

        Ok(order)
    }

    /// Pay an order
    ///
    /// Idempotent: paying an already-paid order mutates nothing and
    /// reports [`TransitionOutcome::AlreadyPaid`]. Paying a cancelled
    /// order fails with [`OrderError::IllegalTransition`]. No stock moves
    /// on payment.
    pub fn pay(&self, actor: &Actor, order_id: &str) -> OrderResult<TransitionResult> {
        let order = self.load_authorized(actor, order_id)?;

        if order.is_paid() {
            tracing::debug!(order_id, "Pay is a no-op: already paid");
            return Ok(TransitionResult {
                order,
                outcome: TransitionOutcome::AlreadyPaid,
            });
        }
        if !order.status.can_transition_to(OrderStatus::Paid) {
            return Err(OrderError::IllegalTransition {
                order_id: order_id.to_string(),
                current: order.status,
                requested: OrderStatus::Paid,
            });
        }

        let now = Utc::now().timestamp_millis();
        let updated = self
            .store
            .run_atomic(|tx| tx.update_order_status(order_id, OrderStatus::Paid, now))?;

        tracing::info!(order_id, actor_id = %actor.id, total = %updated.total, "Order paid");
        self.emit(AuditEvent::new(AuditAction::OrderPaid, &updated, actor));

        Ok(TransitionResult {
            order: updated,
            outcome: TransitionOutcome::Paid,
        })
    }

    /// Cancel an order
    ///
    /// Idempotent: cancelling an already-cancelled order mutates nothing
    /// and reports [`TransitionOutcome::AlreadyCancelled`]. Cancelling a
    /// `created` or `paid` order restores every line's quantity in the
    /// same atomic scope as the status change. Cancelling a paid order is
    /// allowed (no refund mechanics are modelled) and is broadcast as
    /// [`AuditAction::PaidOrderCancelled`].
    pub fn cancel(&self, actor: &Actor, order_id: &str) -> OrderResult<TransitionResult> {
        let order = self.load_authorized(actor, order_id)?;

        if order.is_cancelled() {
            tracing::debug!(order_id, "Cancel is a no-op: already cancelled");
            return Ok(TransitionResult {
                order,
                outcome: TransitionOutcome::AlreadyCancelled,
            });
        }
        if !order.status.can_transition_to(OrderStatus::Cancelled) {
            return Err(OrderError::IllegalTransition {
                order_id: order_id.to_string(),
                current: order.status,
                requested: OrderStatus::Cancelled,
            });
        }

        let was_paid = order.is_paid();
        let now = Utc::now().timestamp_millis();
        let updated = self.store.run_atomic(|tx| {
            for line in &order.lines {
                tx.increment_stock(&line.item_id, line.quantity)?;
            }
            tx.update_order_status(order_id, OrderStatus::Cancelled, now)
        })?;

        if was_paid {
            tracing::warn!(
                order_id,
                actor_id = %actor.id,
                total = %updated.total,
                "Cancelled a paid order - no refund is modelled"
            );
            self.emit(AuditEvent::new(
                AuditAction::PaidOrderCancelled,
                &updated,
                actor,
            ));
        } else {
            tracing::info!(order_id, actor_id = %actor.id, "Order cancelled");
            self.emit(AuditEvent::new(AuditAction::OrderCancelled, &updated, actor));
        }

        Ok(TransitionResult {
            order: updated,
            outcome: TransitionOutcome::Cancelled,
        })
    }

    /// Fetch an order the actor is allowed to see
    pub fn get(&self, actor: &Actor, order_id: &str) -> OrderResult<Order> {
        self.load_authorized(actor, order_id)
    }

    /// List orders: own orders for a standard actor, everything for an
    /// elevated one
    pub fn list_for(&self, actor: &Actor) -> OrderResult<Vec<Order>> {
        let mut orders = self.store.list_orders()?;
        if !actor.is_elevated() {
            orders.retain(|order| order.owned_by(&actor.id));
        }
        orders.sort_by_key(|order| order.created_at);
        Ok(orders)
    }

    /// Load an order and enforce the owner-or-elevated rule
    fn load_authorized(&self, actor: &Actor, order_id: &str) -> OrderResult<Order> {
        let order = self
            .store
            .find_order(order_id)?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;

        if !actor.may_manage(&order.actor_id) {
            tracing::warn!(order_id, actor_id = %actor.id, "Rejected order access");
            return Err(OrderError::Forbidden {
                actor_id: actor.id.clone(),
                order_id: order_id.to_string(),
            });
        }
        Ok(order)
    }

    /// Broadcast an audit event; having no subscribers is fine
    fn emit(&self, event: AuditEvent) {
        let _ = self.audit_tx.send(event);
    }
}
