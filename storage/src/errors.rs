// storage/src/errors.rs

pub use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
    #[error("{0} was not found")]
    NotFound(String),
    #[error("insufficient stock: requested {requested}, only {available} available")]
    InsufficientStock { requested: i64, available: i64 },
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("storage operation failed: {0}")]
    Internal(String),
}

/// A type alias for a `Result` that returns a `StorageError` on failure.
pub type StorageResult<T> = Result<T, StorageError>;
