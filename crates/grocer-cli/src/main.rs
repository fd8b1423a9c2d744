//! Grocer CLI
//!
//! Command-line interface for grocer - persistent shopping list management.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grocer_core::ListStore;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "grocer")]
#[command(about = "Grocer - persistent shopping list management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item (merges with an existing entry of the same name)
    Add {
        /// Item name
        name: String,
        /// How many to buy
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
        /// Free-text notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// List items
    #[command(alias = "ls")]
    List {
        /// Only completed items
        #[arg(long, conflicts_with = "active")]
        completed: bool,
        /// Only items still to buy
        #[arg(long)]
        active: bool,
    },
    /// Look up items by name (case-insensitive)
    Find {
        /// Name to look up
        name: String,
    },
    /// Check an item off
    Done {
        /// Item ID (full UUID or prefix)
        id: String,
    },
    /// Move a completed item back to the active list
    Undone {
        /// Item ID (full UUID or prefix)
        id: String,
    },
    /// Remove an item entirely
    #[command(alias = "rm")]
    Remove {
        /// Item ID (full UUID or prefix)
        id: String,
    },
    /// Edit an item's fields
    Edit {
        /// Item ID (full UUID or prefix)
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New quantity
        #[arg(short, long)]
        quantity: Option<i64>,
        /// New notes (pass an empty string to clear them)
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Remove all completed items
    Clear,
    /// Show status (item counts, storage paths)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Serve newline-delimited JSON requests on stdin
    Serve,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config doesn't need the store
    if let Commands::Config { command } = &cli.command {
        return commands::config::handle(command.clone(), &output);
    }

    let mut store = ListStore::open()?;

    match cli.command {
        Commands::Add {
            name,
            quantity,
            notes,
        } => commands::item::add(&mut store, &name, quantity, &notes, &output),
        Commands::List { completed, active } => {
            commands::item::list(&store, completed, active, &output)
        }
        Commands::Find { name } => commands::item::find(&store, &name, &output),
        Commands::Done { id } => commands::item::complete(&mut store, &id, &output),
        Commands::Undone { id } => commands::item::uncomplete(&mut store, &id, &output),
        Commands::Remove { id } => commands::item::remove(&mut store, &id, &output),
        Commands::Edit {
            id,
            name,
            quantity,
            notes,
        } => commands::item::edit(&mut store, &id, name, quantity, notes, &output),
        Commands::Clear => commands::item::clear(&mut store, &output),
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Serve => commands::serve::run(store).await,
    }
}

/// Initialize logging to stderr, filtered by RUST_LOG
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("grocer_core=warn,grocer=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
