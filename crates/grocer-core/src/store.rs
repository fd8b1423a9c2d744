//! The shopping list store
//!
//! `ListStore` is the sole owner of the item collection. Every mutating
//! operation applies its change in memory and then writes the whole
//! document through to disk before returning, so the persisted document
//! always reflects the last completed operation.
//!
//! Exclusive access is expressed through `&mut self`; hosts that need to
//! share the store across tasks wrap it in the service layer's mutex.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = ListStore::open()?;
//!
//! let item = store.add_item("Milk", 2, "")?;
//! store.complete_item(item.id)?;
//! ```

use anyhow::Context;
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::models::Item;
use crate::storage::{ListDocument, ListPersistence, StorageResult};

/// The shopping list engine
///
/// Owns the in-memory document and keeps the on-disk copy in sync.
pub struct ListStore {
    /// The current document, items in insertion order
    doc: ListDocument,
    /// Persistence handler for write-through saves
    persistence: ListPersistence,
    /// Configuration
    config: Config,
}

impl ListStore {
    /// Open the store, loading the persisted document if one exists
    ///
    /// A missing or malformed document starts the list empty; it never
    /// blocks startup.
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(config)?)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> StorageResult<Self> {
        let persistence = ListPersistence::new(config.clone());
        let doc = persistence.load_or_default()?;

        Ok(Self {
            doc,
            persistence,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Queries ====================

    /// Snapshot of all items, in insertion order
    pub fn items(&self) -> Vec<Item> {
        self.doc.items.clone()
    }

    /// Get a single item by id
    pub fn get_item(&self, id: Uuid) -> Option<Item> {
        self.position_by_id(id).map(|idx| self.doc.items[idx].clone())
    }

    /// All items matching a name, ignoring case and surrounding whitespace
    pub fn find_by_name(&self, name: &str) -> Vec<Item> {
        self.doc
            .items
            .iter()
            .filter(|item| item.matches_name(name))
            .cloned()
            .collect()
    }

    /// Total number of items, completed included
    pub fn item_count(&self) -> usize {
        self.doc.items.len()
    }

    /// Number of items still to buy
    pub fn active_count(&self) -> usize {
        self.doc.items.iter().filter(|item| !item.complete).count()
    }

    /// Number of checked-off items
    pub fn completed_count(&self) -> usize {
        self.doc.items.iter().filter(|item| item.complete).count()
    }

    // ==================== Mutations ====================

    /// Add an item with duplicate handling
    ///
    /// 1. If an active item with the same name exists, its quantity grows
    ///    by the supplied amount.
    /// 2. If a completed item with the same name exists, it is reactivated
    ///    with the supplied quantity replacing the old one.
    /// 3. Otherwise a new item is appended.
    ///
    /// In the first two cases the notes are overwritten only when the
    /// supplied notes are non-empty.
    pub fn add_item(&mut self, name: &str, quantity: i64, notes: &str) -> StoreResult<Item> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let quantity = clamp_quantity(quantity);

        // Still on the list: buy more of it
        if let Some(idx) = self.position_by_name(name, false) {
            let item = &mut self.doc.items[idx];
            item.quantity = item.quantity.saturating_add(quantity);
            if !notes.is_empty() {
                item.notes = notes.to_string();
            }
            let updated = item.clone();
            self.save()?;
            return Ok(updated);
        }

        // Bought before: back on the list with a fresh quantity
        if let Some(idx) = self.position_by_name(name, true) {
            let item = &mut self.doc.items[idx];
            item.mark_active();
            item.quantity = quantity;
            if !notes.is_empty() {
                item.notes = notes.to_string();
            }
            let updated = item.clone();
            self.save()?;
            return Ok(updated);
        }

        let item = Item::new(name, quantity, notes);
        self.doc.items.push(item.clone());
        self.save()?;
        Ok(item)
    }

    /// Mark an item as completed
    pub fn complete_item(&mut self, id: Uuid) -> StoreResult<Item> {
        let idx = self.position_by_id(id).ok_or(StoreError::NotFound { id })?;
        self.doc.items[idx].mark_complete();
        let updated = self.doc.items[idx].clone();
        self.save()?;
        Ok(updated)
    }

    /// Move a completed item back to the active list
    ///
    /// No duplicate merge happens here: if an active item with the same
    /// name was added in the meantime, both stay on the list. Identity is
    /// by id, so the merge policy belongs to `add_item` alone.
    pub fn uncomplete_item(&mut self, id: Uuid) -> StoreResult<Item> {
        let idx = self.position_by_id(id).ok_or(StoreError::NotFound { id })?;
        self.doc.items[idx].mark_active();
        let updated = self.doc.items[idx].clone();
        self.save()?;
        Ok(updated)
    }

    /// Remove an item from the list entirely
    pub fn remove_item(&mut self, id: Uuid) -> StoreResult<()> {
        let idx = self.position_by_id(id).ok_or(StoreError::NotFound { id })?;
        self.doc.items.remove(idx);
        self.save()?;
        Ok(())
    }

    /// Update an item's mutable fields
    ///
    /// Fields left as `None` are untouched. Supplying notes overwrites
    /// them even when empty, unlike `add_item`. Like `uncomplete_item`,
    /// no duplicate merge is re-run against the new name.
    pub fn update_item(
        &mut self,
        id: Uuid,
        name: Option<&str>,
        quantity: Option<i64>,
        notes: Option<&str>,
    ) -> StoreResult<Item> {
        let idx = self.position_by_id(id).ok_or(StoreError::NotFound { id })?;

        // Validate up front so a rejected update leaves the item untouched
        let name = match name {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(StoreError::EmptyName);
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        let item = &mut self.doc.items[idx];
        if let Some(name) = name {
            item.name = name;
        }
        if let Some(quantity) = quantity {
            item.quantity = clamp_quantity(quantity);
        }
        if let Some(notes) = notes {
            item.notes = notes.to_string();
        }
        let updated = item.clone();
        self.save()?;
        Ok(updated)
    }

    /// Remove all completed items, preserving the order of the rest
    ///
    /// Always persists, even when nothing matched. Returns how many items
    /// were removed.
    pub fn clear_completed(&mut self) -> StoreResult<usize> {
        let before = self.doc.items.len();
        self.doc.items.retain(|item| !item.complete);
        let removed = before - self.doc.items.len();
        self.save()?;
        Ok(removed)
    }

    // ==================== Internals ====================

    fn position_by_id(&self, id: Uuid) -> Option<usize> {
        self.doc.items.iter().position(|item| item.id == id)
    }

    /// First item with a matching normalized name and the given status
    fn position_by_name(&self, name: &str, complete: bool) -> Option<usize> {
        self.doc
            .items
            .iter()
            .position(|item| item.complete == complete && item.matches_name(name))
    }

    /// Write the whole document through to disk
    fn save(&self) -> StorageResult<()> {
        self.persistence.save(&self.doc)?;
        debug!(items = self.doc.items.len(), "saved shopping list");
        Ok(())
    }
}

/// Floor caller-supplied quantities at 1
fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(1, u32::MAX as i64) as u32
}
