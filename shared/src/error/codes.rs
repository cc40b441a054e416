//! Unified error codes for the order core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Item and stock errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,

    // ==================== 2xxx: Permission ====================
    /// Actor is neither owner nor elevated
    PermissionDenied = 2001,

    // ==================== 4xxx: Order ====================
    /// Order does not exist
    OrderNotFound = 4001,
    /// Requested transition is illegal for the order's current status
    OrderConflict = 4002,
    /// Order has no line items
    EmptyOrder = 4003,

    // ==================== 6xxx: Item and stock ====================
    /// Item does not exist in the catalog
    ItemNotFound = 6001,
    /// Quantity is non-positive or out of bounds
    InvalidQuantity = 6002,
    /// Available stock cannot cover the requested quantity
    InsufficientStock = 6003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage/transaction failure (already rolled back)
    StorageError = 9002,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::PermissionDenied => "Permission denied",
            Self::OrderNotFound => "Order not found",
            Self::OrderConflict => "Operation conflicts with the order's current status",
            Self::EmptyOrder => "Order has no line items",
            Self::ItemNotFound => "Item not found",
            Self::InvalidQuantity => "Invalid quantity",
            Self::InsufficientStock => "Insufficient stock",
            Self::InternalError => "Internal error",
            Self::StorageError => "Storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            2001 => Ok(Self::PermissionDenied),
            4001 => Ok(Self::OrderNotFound),
            4002 => Ok(Self::OrderConflict),
            4003 => Ok(Self::EmptyOrder),
            6001 => Ok(Self::ItemNotFound),
            6002 => Ok(Self::InvalidQuantity),
            6003 => Ok(Self::InsufficientStock),
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::StorageError),
            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", *self as u16)
    }
}
