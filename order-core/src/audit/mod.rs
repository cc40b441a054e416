//! Audit events for operator-facing observability
//!
//! Financially notable lifecycle changes are broadcast as structured
//! events rather than buried in log lines. Subscribers (an audit log
//! writer, a metrics bridge) receive every event emitted after a
//! successful commit; see `OrdersManager::subscribe_audit`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::models::{Actor, Order};

/// Audit action types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Order created and stock reserved
    OrderCreated,
    /// Order paid
    OrderPaid,
    /// Order cancelled before payment, stock restored
    OrderCancelled,
    /// Order cancelled after payment was taken - no refund is modelled,
    /// operators are expected to review these
    PaidOrderCancelled,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Audit event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Action type
    pub action: AuditAction,
    /// Order the action applied to
    pub order_id: String,
    /// Actor who triggered the action
    pub actor_id: String,
    /// Timestamp (Unix ms)
    pub timestamp: i64,
    /// Structured context (total, status, line count)
    pub details: serde_json::Value,
}

impl AuditEvent {
    pub fn new(action: AuditAction, order: &Order, actor: &Actor) -> Self {
        Self {
            action,
            order_id: order.order_id.clone(),
            actor_id: actor.id.clone(),
            timestamp: Utc::now().timestamp_millis(),
            details: serde_json::json!({
                "total": order.total,
                "status": order.status,
                "lines": order.lines.len(),
            }),
        }
    }
}
