//! Order lifecycle module
//!
//! - **manager**: `OrdersManager`, the state machine driving
//!   create / pay / cancel and coupling stock movement to order mutation
//! - **money**: decimal helpers for totals and input bounds
//!
//! # Command Flow
//!
//! ```text
//! create(actor, items)
//!     ├─ 1. Validate shape (non-empty, positive quantities)
//!     ├─ 2. Resolve items against the catalog (one batch call)
//!     ├─ 3. Check stock sufficiency (aggregated per item)
//!     ├─ 4. Snapshot unit prices, compute and freeze the total
//!     ├─ 5. run_atomic: insert order + decrement every line's stock
//!     └─ 6. Broadcast audit event
//! ```

pub mod manager;
pub mod money;

// Re-exports
pub use manager::{OrderError, OrderResult, OrdersManager};
