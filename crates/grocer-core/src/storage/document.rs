//! Persisted document schema
//!
//! The entire shopping list is stored as one JSON document:
//!
//! ```json
//! { "version": 1, "items": [ ... ] }
//! ```
//!
//! Loading is deliberately forgiving: a document that is missing, not an
//! object, or missing its item list yields an empty list instead of a
//! parse failure, so older or partial documents never block startup.
//! Documents written before the `version` field existed load the same way.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::models::Item;

/// Current document schema version
pub const DOCUMENT_VERSION: u32 = 1;

/// The persisted shopping list document
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListDocument {
    /// Schema version, for forward migrations
    pub version: u32,
    /// All items, in insertion order
    pub items: Vec<Item>,
}

impl Default for ListDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            items: Vec::new(),
        }
    }
}

impl ListDocument {
    /// Decode a document from raw JSON bytes
    ///
    /// Never fails: malformed input degrades to the empty document, and
    /// individual entries that don't validate are skipped.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(err) => {
                warn!("shopping list document is not valid JSON, starting empty: {err}");
                return Self::default();
            }
        };
        Self::from_value(value)
    }

    /// Decode a document from a parsed JSON value
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            warn!("shopping list document is not an object, starting empty");
            return Self::default();
        };

        let version = map
            .get("version")
            .and_then(Value::as_u64)
            .map(|v| v as u32)
            .unwrap_or(DOCUMENT_VERSION);

        let Some(Value::Array(entries)) = map.remove("items") else {
            warn!("shopping list document has no item list, starting empty");
            return Self::default();
        };

        let items = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Item>(entry) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!("skipping unreadable shopping list entry: {err}");
                    None
                }
            })
            .collect();

        Self { version, items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_empty_document() {
        let doc = ListDocument::default();
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let doc = ListDocument {
            version: DOCUMENT_VERSION,
            items: vec![Item::new("Milk", 2, "2%"), Item::new("Eggs", 12, "")],
        };

        let bytes = serde_json::to_vec(&doc).unwrap();
        let loaded = ListDocument::from_slice(&bytes);

        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_invalid_json_yields_empty() {
        let doc = ListDocument::from_slice(b"not json at all {{");
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_non_object_yields_empty() {
        let doc = ListDocument::from_slice(b"[1, 2, 3]");
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_missing_items_yields_empty() {
        let doc = ListDocument::from_slice(br#"{"version": 1}"#);
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_unversioned_document_loads() {
        // The shape written before the version field was introduced
        let json = format!(
            r#"{{"items": [{{"id":"{}","name":"Milk","quantity":2,"notes":"","complete":false,"added_at":"2025-01-01T00:00:00Z","completed_at":null}}]}}"#,
            Uuid::new_v4()
        );

        let doc = ListDocument::from_slice(json.as_bytes());
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items[0].name, "Milk");
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let json = format!(
            r#"{{"version":1,"items":[{{"id":"{}","name":"Milk","added_at":"2025-01-01T00:00:00Z"}},{{"name":"no id"}},42]}}"#,
            Uuid::new_v4()
        );

        let doc = ListDocument::from_slice(json.as_bytes());
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items[0].name, "Milk");
    }
}
