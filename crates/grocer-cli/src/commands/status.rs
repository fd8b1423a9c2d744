//! Status command handler

use anyhow::Result;

use grocer_core::ListStore;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &ListStore, output: &Output) -> Result<()> {
    let config = store.config();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "counts": {
                        "total": store.item_count(),
                        "active": store.active_count(),
                        "completed": store.completed_count()
                    },
                    "data_dir": config.data_dir,
                    "list_path": config.list_path()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.active_count());
        }
        OutputFormat::Human => {
            println!("Grocer Status");
            println!("=============");
            println!();
            println!("Items:");
            println!("  To buy:    {}", store.active_count());
            println!("  Completed: {}", store.completed_count());
            println!("  Total:     {}", store.item_count());
            println!();
            println!("Storage:");
            println!("  Data dir: {}", config.data_dir.display());
            println!("  Document: {}", config.list_path().display());
        }
    }

    Ok(())
}
