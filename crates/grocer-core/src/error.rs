//! Store error types
//!
//! Two recoverable conditions (empty name, unknown id) are reported back
//! to the caller; persistence failures are a harder class and carry the
//! underlying `StorageError`.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Errors returned by `ListStore` operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Add or update supplied an empty or whitespace-only name
    #[error("item name cannot be empty")]
    EmptyName,

    /// Operation referenced an id that is not on the list
    #[error("no item with id '{id}'")]
    NotFound { id: Uuid },

    /// The mutation could not be durably saved
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
