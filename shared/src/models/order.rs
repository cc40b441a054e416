//! Order model
//!
//! Orders are created by the lifecycle manager and never physically
//! deleted; only the status field changes after creation. Monetary amounts
//! are captured at creation time and frozen: unit prices are snapshots of
//! the catalog price, and the total is computed once and never recomputed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Created,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Legal transition graph
    ///
    /// This is the single authority on status changes; the lifecycle
    /// manager consults it before every mutation. Repeating a terminal
    /// operation (`paid → paid`, `cancelled → cancelled`) is not a
    /// transition - callers treat it as an idempotent no-op.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Created, OrderStatus::Paid)
                | (OrderStatus::Created, OrderStatus::Cancelled)
                | (OrderStatus::Paid, OrderStatus::Cancelled)
        )
    }

    /// Terminal states have no outgoing transitions
    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Cancelled
    }
}

/// Order line item
///
/// `name` and `unit_price` are snapshots taken at order creation,
/// independent of later catalog changes. Lines are immutable once the
/// order exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Item ID
    pub item_id: String,
    /// Item name snapshot
    pub name: String,
    /// Quantity (>= 1)
    pub quantity: u32,
    /// Unit price snapshot
    pub unit_price: Decimal,
}

impl OrderLine {
    /// Line total: quantity x unit-price snapshot
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order ID (UUID, assigned by the lifecycle manager)
    pub order_id: String,
    /// Owning actor ID
    pub actor_id: String,
    /// Line items (at least one)
    pub lines: Vec<OrderLine>,
    /// Total amount, computed once at creation
    pub total: Decimal,
    /// Order status
    pub status: OrderStatus,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Order {
    /// Check if the order is paid
    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }

    /// Check if the order is cancelled
    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    /// Check whether the given actor ID owns this order
    pub fn owned_by(&self, actor_id: &str) -> bool {
        self.actor_id == actor_id
    }
}

/// Line item input for order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemInput {
    /// Item ID
    pub item_id: String,
    /// Requested quantity
    pub quantity: i32,
}

/// Outcome of a pay/cancel call
///
/// Repeating pay on a paid order or cancel on a cancelled order is a
/// no-op success, not an error; the outcome tells the caller which case
/// applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionOutcome {
    Paid,
    AlreadyPaid,
    Cancelled,
    AlreadyCancelled,
}

impl TransitionOutcome {
    /// Whether this outcome mutated nothing
    pub fn is_noop(self) -> bool {
        matches!(
            self,
            TransitionOutcome::AlreadyPaid | TransitionOutcome::AlreadyCancelled
        )
    }

    /// Informational message for the caller
    pub fn message(self) -> &'static str {
        match self {
            TransitionOutcome::Paid => "order paid",
            TransitionOutcome::AlreadyPaid => "order already paid",
            TransitionOutcome::Cancelled => "order cancelled",
            TransitionOutcome::AlreadyCancelled => "order already cancelled",
        }
    }
}

/// Result of a successful pay/cancel call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResult {
    pub order: Order,
    pub outcome: TransitionOutcome,
}
