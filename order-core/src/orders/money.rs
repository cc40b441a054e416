//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary amounts in the core are `Decimal`. An order's total is
//! rounded to 2 decimal places, half-up, when the order is created, and
//! never recomputed afterwards.

use rust_decimal::prelude::*;
use shared::models::{LineItemInput, OrderLine};

use super::manager::OrderError;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Round a monetary value to 2 decimal places, half-up
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate a line item input before processing
///
/// Quantity must be in `1..=MAX_QUANTITY`.
pub fn validate_line(line: &LineItemInput) -> Result<(), OrderError> {
    if line.quantity <= 0 || line.quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidQuantity {
            item_id: line.item_id.clone(),
            quantity: line.quantity,
        });
    }
    Ok(())
}

/// Order total: sum of quantity x unit-price snapshots
pub fn order_total(lines: &[OrderLine]) -> Decimal {
    round_money(lines.iter().map(|line| line.line_total()).sum())
}
