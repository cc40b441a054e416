//! Order lifecycle core
//!
//! The state machine coupling order mutation to stock movement. Callers
//! (a request-handling layer, a CLI, tests) hand it a verified [`Actor`]
//! and an intent; the core validates, authorizes, and applies the change
//! through an abstract transactional store so stock is never oversold and
//! totals stay frozen at purchase time.
//!
//! # Module structure
//!
//! ```text
//! order-core/src/
//! ├── orders/        # Lifecycle manager and money helpers
//! │   ├── manager/   # OrdersManager: create / pay / cancel
//! │   └── money      # Decimal totals, input bounds
//! ├── store/         # Store traits + redb and in-memory bindings
//! └── audit/         # Operator-facing audit events
//! ```
//!
//! [`Actor`]: shared::models::Actor

pub mod audit;
pub mod orders;
pub mod store;

// Re-export public surface
pub use audit::{AuditAction, AuditEvent};
pub use orders::manager::{OrderError, OrderResult, OrdersManager};
pub use store::memory::MemoryStore;
pub use store::redb::RedbStore;
pub use store::{Catalog, Store, StoreError, StoreResult, StoreTx};
