//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use grocer_core::Item;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single item in detail
    pub fn print_item(&self, item: &Item) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", item.id);
                println!("Name:      {}", item.name);
                println!("Quantity:  {}", item.quantity);
                if !item.notes.is_empty() {
                    println!("Notes:     {}", item.notes);
                }
                match item.completed_at {
                    Some(at) => println!("Status:    completed {}", at.format("%Y-%m-%d %H:%M")),
                    None => println!("Status:    to buy"),
                }
                println!("Added:     {}", item.added_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(item).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", item.id);
            }
        }
    }

    /// Print a list of items, one line each
    pub fn print_items(&self, items: &[Item]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("Nothing on the list.");
                    return;
                }
                for item in items {
                    println!("{}", format_item_line(item));
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(items).unwrap());
            }
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

}

/// One-line summary: checkbox, short id, name, quantity, notes
fn format_item_line(item: &Item) -> String {
    let check = if item.complete { "x" } else { " " };
    let id = item.id.to_string();
    let mut line = format!("[{}] {}  {}", check, &id[..8], item.name);
    if item.quantity > 1 {
        line.push_str(&format!(" x{}", item.quantity));
    }
    if !item.notes.is_empty() {
        line.push_str(&format!("  ({})", item.notes));
    }
    line
}
