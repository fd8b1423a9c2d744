//! Data models for grocer
//!
//! Defines the core data structure: the shopping list `Item`.
//! Items serialize to the persisted JSON document as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry on the shopping list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique identifier, assigned at creation and never reused
    pub id: Uuid,
    /// Display name, stored trimmed but with original casing
    pub name: String,
    /// How many to buy, always at least 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Free-text notes ("get the 2% kind")
    #[serde(default)]
    pub notes: String,
    /// Whether the item has been checked off
    #[serde(default)]
    pub complete: bool,
    /// When this item was first added
    pub added_at: DateTime<Utc>,
    /// When this item was checked off; None while active
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_quantity() -> u32 {
    1
}

impl Item {
    /// Create a new active item
    ///
    /// The caller is expected to have trimmed and validated the name.
    pub fn new(name: impl Into<String>, quantity: u32, notes: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity: quantity.max(1),
            notes: notes.into(),
            complete: false,
            added_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Whether this item's name matches `name`, ignoring case and
    /// surrounding whitespace
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }

    /// Check the item off
    pub fn mark_complete(&mut self) {
        self.complete = true;
        self.completed_at = Some(Utc::now());
    }

    /// Move the item back to the active list
    pub fn mark_active(&mut self) {
        self.complete = false;
        self.completed_at = None;
    }
}

/// Canonical form of a name for identity comparisons
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_new() {
        let item = Item::new("Milk", 2, "");
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 2);
        assert!(item.notes.is_empty());
        assert!(!item.complete);
        assert!(item.completed_at.is_none());
    }

    #[test]
    fn test_item_new_floors_quantity() {
        let item = Item::new("Milk", 0, "");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_matches_name_ignores_case_and_whitespace() {
        let item = Item::new("Milk", 1, "");
        assert!(item.matches_name("milk"));
        assert!(item.matches_name("  MILK "));
        assert!(!item.matches_name("Oat Milk"));
    }

    #[test]
    fn test_mark_complete_sets_timestamp() {
        let mut item = Item::new("Milk", 1, "");
        item.mark_complete();
        assert!(item.complete);
        assert!(item.completed_at.is_some());

        item.mark_active();
        assert!(!item.complete);
        assert!(item.completed_at.is_none());
    }

    #[test]
    fn test_item_serialization() {
        let mut item = Item::new("Eggs", 12, "free range");
        item.mark_complete();
        let json = serde_json::to_string(&item).unwrap();
        let deserialized: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }

    #[test]
    fn test_item_deserializes_with_missing_fields() {
        // Documents written before quantity/notes existed
        let json = format!(
            r#"{{"id":"{}","name":"Bread","complete":false,"added_at":"2025-01-01T00:00:00Z"}}"#,
            Uuid::new_v4()
        );
        let item: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item.quantity, 1);
        assert!(item.notes.is_empty());
        assert!(item.completed_at.is_none());
    }
}
