//! Shopping list document persistence
//!
//! Handles saving and loading the shopping list JSON document.
//! Uses atomic writes (write to temp file, then rename) to prevent
//! corruption: the document on disk is always the output of a completed
//! save, never a partial one.
//!
//! Storage location: `~/.local/share/grocer/shopping_list.json`
//! (configurable via `Config`)

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::storage::document::ListDocument;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the shopping list document
///
/// Provides atomic file operations for saving/loading the document.
pub struct ListPersistence {
    config: Config,
}

impl ListPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a document exists on disk
    pub fn exists(&self) -> bool {
        self.config.list_path().exists()
    }

    /// Load the document from disk
    ///
    /// Returns `None` if the document file doesn't exist. Returns an error
    /// only if the file exists but can't be read; unparseable content is
    /// downgraded to the empty document by `ListDocument::from_slice`.
    pub fn load(&self) -> StorageResult<Option<ListDocument>> {
        let path = self.config.list_path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|err| StorageError::ReadError {
            path: path.clone(),
            source: err,
        })?;

        Ok(Some(ListDocument::from_slice(&bytes)))
    }

    /// Load the document, falling back to an empty one
    ///
    /// Startup never fails because of a missing document.
    pub fn load_or_default(&self) -> StorageResult<ListDocument> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Save the document to disk using atomic write
    ///
    /// This writes to a temporary file first, then renames it to the
    /// target path. This ensures the file is never left in a
    /// partially-written state.
    pub fn save(&self, doc: &ListDocument) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(doc).map_err(|err| StorageError::WriteError {
            path: self.config.list_path(),
            source: err.into(),
        })?;

        atomic_write(&self.config.list_path(), &bytes)
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: err,
        })?;
    }

    // Create temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|err| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source: err,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = ListPersistence::new(test_config(&temp_dir));

        // Initially no document
        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_none());

        // Create and save a document
        let doc = ListDocument {
            items: vec![Item::new("Milk", 2, "2%")],
            ..Default::default()
        };
        persistence.save(&doc).unwrap();
        assert!(persistence.exists());

        // Load and verify
        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = ListPersistence::new(test_config(&temp_dir));

        let doc = persistence.load_or_default().unwrap();
        assert!(doc.items.is_empty());
        // Loading alone does not create the file
        assert!(!persistence.exists());
    }

    #[test]
    fn test_load_malformed_document_yields_empty() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = ListPersistence::new(test_config(&temp_dir));

        fs::write(persistence.config().list_path(), b"{ corrupted").unwrap();

        let doc = persistence.load().unwrap().unwrap();
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_save_replaces_prior_document() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = ListPersistence::new(test_config(&temp_dir));

        let first = ListDocument {
            items: vec![Item::new("Milk", 1, ""), Item::new("Eggs", 12, "")],
            ..Default::default()
        };
        persistence.save(&first).unwrap();

        let second = ListDocument {
            items: vec![Item::new("Bread", 1, "")],
            ..Default::default()
        };
        persistence.save(&second).unwrap();

        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].name, "Bread");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.txt");

        atomic_write(&nested_path, b"test data").unwrap();

        assert!(nested_path.exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = ListPersistence::new(test_config(&temp_dir));

        persistence.save(&ListDocument::default()).unwrap();

        let temp_path = persistence.config().list_path().with_extension("tmp");
        assert!(!temp_path.exists());
    }
}
