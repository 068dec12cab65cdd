//! Stockroom CLI - Command-line interface for the SKU-keyed inventory tracker

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::Context;
use stockroom::config::{self, StockroomConfig};
use stockroom::output::{render_error, OutputMode};
use stockroom::ui::{self, Icons};
use stockroom::{MemoryStore, SqliteStore, StockRepository};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(version)]
#[command(about = "Stockroom - SKU-keyed inventory tracker")]
#[command(long_about = r#"
Stockroom keeps a flat list of stock items keyed by SKU, in memory or in a
SQLite database, and reports their value (quantity x price).

Example usage:
  stockroom add --name EGG --sku SKU001 --quantity 12 --price 6
  stockroom list --low-stock
  stockroom value --sku sku001
  stockroom export --output stock.csv
  stockroom            (interactive menu)
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use a throwaway in-memory store seeded with demo items
    #[arg(long, global = true, conflicts_with = "database")]
    memory: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Run the interactive numbered menu (default)
    Menu,

    /// Show every stock item
    List {
        /// Only items below the low-stock threshold
        #[arg(long)]
        low_stock: bool,
    },

    /// Add a new stock item
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        sku: String,

        #[arg(short, long, allow_hyphen_values = true)]
        quantity: String,

        #[arg(short, long, allow_hyphen_values = true)]
        price: String,
    },

    /// Change name, quantity or price of an item (SKU must match exactly)
    Update {
        #[arg(short, long)]
        sku: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long, allow_hyphen_values = true)]
        quantity: Option<String>,

        #[arg(short, long, allow_hyphen_values = true)]
        price: Option<String>,
    },

    /// Remove an item (SKU must match exactly)
    Remove {
        #[arg(short, long)]
        sku: String,
    },

    /// Look up an item by SKU, ignoring case
    Find {
        #[arg(short, long)]
        sku: String,
    },

    /// Stock value of one item, or of the whole stock with --all
    Value {
        #[arg(short, long, required_unless_present = "all", conflicts_with = "all")]
        sku: Option<String>,

        #[arg(short, long)]
        all: bool,
    },

    /// Export every item to CSV
    Export {
        /// Output file (defaults to the configured export path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show record count, units, total value and low-stock count
    Stats,

    /// Write a starter stockroom.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Menu => "menu",
            Commands::List { .. } => "list",
            Commands::Add { .. } => "add",
            Commands::Update { .. } => "update",
            Commands::Remove { .. } => "remove",
            Commands::Find { .. } => "find",
            Commands::Value { .. } => "value",
            Commands::Export { .. } => "export",
            Commands::Stats => "stats",
            Commands::Init { .. } => "init",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps the menu and JSON output clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = OutputMode::from_flag(cli.json);
    let command = cli.command.clone().unwrap_or(Commands::Menu);
    let name = command.name();

    match run(&cli, command, output_mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("{} failed: {:?}", name, err);
            let message = format!("{:#}", err);
            if output_mode.is_human() {
                ui::error(&message);
            } else {
                match render_error(name, &message) {
                    Ok(json) => println!("{}", json),
                    Err(_) => ui::error(&message),
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, command: Commands, output_mode: OutputMode) -> anyhow::Result<()> {
    if let Commands::Init { force } = command {
        let path = cli.config.clone().unwrap_or_else(config::default_config_path);
        return commands::run_init(output_mode, &path, force);
    }

    let config = config::load_config(cli.config.as_deref())
        .context("reading config")?
        .unwrap_or_default();
    let threshold = config.low_stock_threshold();

    let (mut repo, location) = open_repository(cli, &config)?;
    let repo = repo.as_mut();

    match command {
        Commands::Menu => {
            if output_mode.is_human() {
                ui::info("Store", &location);
            }
            commands::run_menu(repo, threshold)
        }
        Commands::List { low_stock } => commands::run_list(repo, output_mode, threshold, low_stock),
        Commands::Add { name, sku, quantity, price } => {
            commands::run_add(repo, output_mode, &name, &sku, &quantity, &price)
        }
        Commands::Update { sku, name, quantity, price } => commands::run_update(
            repo,
            output_mode,
            &sku,
            name.as_deref(),
            quantity.as_deref(),
            price.as_deref(),
        ),
        Commands::Remove { sku } => commands::run_remove(repo, output_mode, &sku),
        Commands::Find { sku } => commands::run_find(repo, output_mode, threshold, &sku),
        Commands::Value { sku, all: _ } => commands::run_value(repo, output_mode, sku.as_deref()),
        Commands::Export { output } => {
            let path = config.export_path(output.as_deref());
            commands::run_export(repo, output_mode, &path)
        }
        Commands::Stats => commands::run_stats(repo, output_mode, threshold, &location),
        Commands::Init { .. } => unreachable!("handled before opening the store"),
    }
}

/// Build the repository the commands operate on, plus a label for it
fn open_repository(
    cli: &Cli,
    config: &StockroomConfig,
) -> anyhow::Result<(Box<dyn StockRepository>, String)> {
    if cli.memory {
        tracing::info!("Using in-memory store with demo items");
        return Ok((Box::new(MemoryStore::with_demo_items()), "in-memory".to_string()));
    }

    let path = config.database_path(cli.database.as_deref());
    config::ensure_db_dir(&path)?;
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening database {}", path.display()))?;
    tracing::info!("{} Using database {}", Icons::DATABASE, path.display());

    Ok((Box::new(store), path.display().to_string()))
}
