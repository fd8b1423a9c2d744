//! Storage layer
//!
//! Handles persistence of the shopping list document.
//!
//! ## Architecture
//!
//! - The in-memory list is the source of truth while running
//! - The JSON document on disk is a write-through mirror, replaced
//!   wholesale (atomically) after every mutation

pub mod document;
pub mod error;
pub mod persistence;

pub use document::{ListDocument, DOCUMENT_VERSION};
pub use error::{StorageError, StorageResult};
pub use persistence::ListPersistence;
