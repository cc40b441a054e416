//! Shared types for the order core
//!
//! Domain models and the unified error vocabulary used by the order
//! lifecycle and by any transport layer consuming it.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
