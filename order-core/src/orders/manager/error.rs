use crate::store::StoreError;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use thiserror::Error;

/// Lifecycle errors
///
/// Everything here is raised synchronously to the immediate caller with
/// enough structure to render a precise message; nothing is logged and
/// swallowed inside the core.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order must contain at least one line item")]
    EmptyOrder,

    #[error("invalid quantity {quantity} for item {item_id}")]
    InvalidQuantity { item_id: String, quantity: i32 },

    #[error("unknown items: {}", .item_ids.join(", "))]
    UnknownItems { item_ids: Vec<String> },

    #[error("insufficient stock for item {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: String,
        available: u32,
        requested: u32,
    },

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("actor {actor_id} is not allowed to manage order {order_id}")]
    Forbidden { actor_id: String, order_id: String },

    #[error("order {order_id} is {current:?} and cannot become {requested:?}")]
    IllegalTransition {
        order_id: String,
        current: OrderStatus,
        requested: OrderStatus,
    },

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl OrderError {
    /// Error code for the boundary layer
    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::EmptyOrder => ErrorCode::EmptyOrder,
            OrderError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            OrderError::UnknownItems { .. } => ErrorCode::ItemNotFound,
            OrderError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            OrderError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            OrderError::Forbidden { .. } => ErrorCode::PermissionDenied,
            OrderError::IllegalTransition { .. } => ErrorCode::OrderConflict,
            OrderError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            OrderError::InvalidQuantity { item_id, quantity } => {
                AppError::with_message(code, message)
                    .with_detail("item_id", item_id)
                    .with_detail("quantity", quantity)
            }
            OrderError::UnknownItems { item_ids } => {
                AppError::with_message(code, message).with_detail("item_ids", item_ids)
            }
            OrderError::InsufficientStock {
                item_id,
                available,
                requested,
            } => AppError::with_message(code, message)
                .with_detail("item_id", item_id)
                .with_detail("available", available)
                .with_detail("requested", requested),
            OrderError::OrderNotFound(order_id) => {
                AppError::with_message(code, message).with_detail("order_id", order_id)
            }
            OrderError::Forbidden { actor_id, order_id } => {
                AppError::with_message(code, message)
                    .with_detail("actor_id", actor_id)
                    .with_detail("order_id", order_id)
            }
            OrderError::IllegalTransition {
                order_id,
                current,
                requested,
            } => AppError::with_message(code, message)
                .with_detail("order_id", order_id)
                .with_detail("current", serde_json::json!(current))
                .with_detail("requested", serde_json::json!(requested)),
            OrderError::Storage(e) => {
                tracing::error!(error = %e, "Storage error reached the boundary");
                AppError::with_message(code, message)
            }
            OrderError::EmptyOrder => AppError::with_message(code, message),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
