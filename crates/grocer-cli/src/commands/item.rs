//! Item command handlers

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use grocer_core::ListStore;

use crate::output::Output;

/// Add an item to the list
pub fn add(
    store: &mut ListStore,
    name: &str,
    quantity: i64,
    notes: &str,
    output: &Output,
) -> Result<()> {
    let item = store
        .add_item(name, quantity, notes)
        .context("Failed to add item")?;

    output.success(&format!("Added: {}", item.name));
    output.print_item(&item);

    Ok(())
}

/// List items, optionally filtered by completion status
pub fn list(store: &ListStore, completed: bool, active: bool, output: &Output) -> Result<()> {
    let items: Vec<_> = store
        .items()
        .into_iter()
        .filter(|item| {
            if completed {
                item.complete
            } else if active {
                !item.complete
            } else {
                true
            }
        })
        .collect();

    output.print_items(&items);
    Ok(())
}

/// Look up items by name
pub fn find(store: &ListStore, name: &str, output: &Output) -> Result<()> {
    let items = store.find_by_name(name);
    output.print_items(&items);
    Ok(())
}

/// Check an item off
pub fn complete(store: &mut ListStore, id: &str, output: &Output) -> Result<()> {
    let uuid = parse_item_id(id, store)?;
    let item = store
        .complete_item(uuid)
        .context("Failed to complete item")?;

    output.success(&format!("Checked off: {}", item.name));
    Ok(())
}

/// Move a completed item back to the active list
pub fn uncomplete(store: &mut ListStore, id: &str, output: &Output) -> Result<()> {
    let uuid = parse_item_id(id, store)?;
    let item = store
        .uncomplete_item(uuid)
        .context("Failed to uncomplete item")?;

    output.success(&format!("Back on the list: {}", item.name));
    Ok(())
}

/// Remove an item entirely
pub fn remove(store: &mut ListStore, id: &str, output: &Output) -> Result<()> {
    let uuid = parse_item_id(id, store)?;
    let name = store.get_item(uuid).map(|item| item.name);

    store.remove_item(uuid).context("Failed to remove item")?;

    match name {
        Some(name) => output.success(&format!("Removed: {}", name)),
        None => output.success("Removed"),
    }
    Ok(())
}

/// Edit an item's fields
pub fn edit(
    store: &mut ListStore,
    id: &str,
    name: Option<String>,
    quantity: Option<i64>,
    notes: Option<String>,
    output: &Output,
) -> Result<()> {
    if name.is_none() && quantity.is_none() && notes.is_none() {
        bail!("Nothing to change. Pass --name, --quantity, or --notes.");
    }

    let uuid = parse_item_id(id, store)?;
    let item = store
        .update_item(uuid, name.as_deref(), quantity, notes.as_deref())
        .context("Failed to update item")?;

    output.success("Item updated");
    output.print_item(&item);

    Ok(())
}

/// Remove all completed items
pub fn clear(store: &mut ListStore, output: &Output) -> Result<()> {
    let removed = store
        .clear_completed()
        .context("Failed to clear completed items")?;

    output.success(&format!("Cleared {} completed item(s)", removed));
    Ok(())
}

/// Resolve an item id from a full UUID or an unambiguous prefix
fn parse_item_id(id: &str, store: &ListStore) -> Result<Uuid> {
    // Try full UUID first
    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    // Try prefix match
    let items = store.items();
    let matches: Vec<_> = items
        .iter()
        .filter(|item| item.id.to_string().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No item found matching: {}", id),
        1 => Ok(matches[0].id),
        _ => {
            eprintln!("Multiple items match '{}':", id);
            for item in &matches {
                eprintln!("  {} - {}", item.id, item.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::Config;
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> ListStore {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
        };
        ListStore::open_with_config(config).unwrap()
    }

    #[test]
    fn test_parse_item_id_full_uuid() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let uuid = Uuid::new_v4();
        assert_eq!(parse_item_id(&uuid.to_string(), &store).unwrap(), uuid);
    }

    #[test]
    fn test_parse_item_id_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);

        let item = store.add_item("Milk", 1, "").unwrap();
        let prefix = &item.id.to_string()[..8];

        assert_eq!(parse_item_id(prefix, &store).unwrap(), item.id);
    }

    #[test]
    fn test_parse_item_id_no_match() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(parse_item_id("deadbeef", &store).is_err());
    }
}
