//! Unified error system
//!
//! - [`ErrorCode`]: standardized error codes for every failure the core
//!   can surface
//! - [`AppError`]: rich error type with codes, messages, and structured
//!   details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Item and stock errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::InsufficientStock, "only 2 left")
//!     .with_detail("item_id", "item-42");
//! assert_eq!(err.code, ErrorCode::InsufficientStock);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
