//! Grocer Core Library
//!
//! This crate provides the core functionality for grocer, a persistent
//! shopping list manager.
//!
//! # Architecture
//!
//! - **ListStore**: owns the in-memory item collection and is its only
//!   mutator; every mutation is written through to a single JSON document
//!   before the operation returns
//! - **ListService**: serializes access to the store behind an async
//!   mutex and broadcasts a change notification after every mutation
//!
//! All queries are served directly from the in-memory collection.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = ListStore::open()?;
//!
//! // Add an item
//! let item = store.add_item("Milk", 2, "the 2% kind")?;
//!
//! // Check it off
//! store.complete_item(item.id)?;
//! ```
//!
//! # Modules
//!
//! - `store`: the shopping list engine (main entry point)
//! - `models`: the `Item` data structure
//! - `service`: request/response command surface with change notifications
//! - `storage`: JSON document persistence
//! - `config`: application configuration
//! - `error`: typed store errors

pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use models::Item;
pub use service::{ErrorKind, ListEvent, ListService, Request, Response};
pub use storage::{ListDocument, ListPersistence, StorageError, DOCUMENT_VERSION};
pub use store::ListStore;
