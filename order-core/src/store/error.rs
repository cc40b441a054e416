//! Store errors

use redb::{CommitError, DatabaseError, StorageError, TableError, TransactionError};
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("table error: {0}")]
    Table(#[from] TableError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] CommitError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("insufficient stock for item {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: String,
        available: u32,
        requested: u32,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
