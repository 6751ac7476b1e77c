//! Clinic Inventory CLI - medicines and equipment in a local SQLite file

mod commands;
mod shell;

use clap::{Parser, Subcommand};
use clinic_inventory::config;
use clinic_inventory::storage::InventoryStore;
use clinic_inventory::ui;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "clinic-inventory")]
#[command(version)]
#[command(about = "Clinic inventory - medicines and equipment with low-stock highlighting")]
#[command(long_about = r#"
Tracks medicines (packs, items per pack, expiry) and equipment (quantity,
location) for a small clinic in a local SQLite file.

Example usage:
  clinic-inventory medicine add --name Paracetamol --packs 5 --items 10 --expiry 2025-01-01
  clinic-inventory medicine search para
  clinic-inventory equipment list
  clinic-inventory shell
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database tables
    Init {
        /// Also write a config file pointing at the database
        #[arg(long)]
        write_config: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Manage medicines
    #[command(alias = "med")]
    Medicine {
        #[command(subcommand)]
        action: MedicineAction,
    },

    /// Manage equipment
    #[command(alias = "eq")]
    Equipment {
        #[command(subcommand)]
        action: EquipmentAction,
    },

    /// Preview the total quantity for a number of packs
    Total {
        /// Number of packs
        #[arg(long, default_value = "")]
        packs: String,

        /// Items per pack
        #[arg(long, default_value = "")]
        items: String,
    },

    /// Show inventory statistics
    Stats,

    /// Interactive session with selection and forms
    Shell,
}

#[derive(Subcommand)]
pub enum MedicineAction {
    /// List all medicines
    List,

    /// Add a medicine
    Add {
        #[arg(short, long)]
        name: String,
        /// Number of packs
        #[arg(short, long)]
        packs: String,
        /// Items per pack
        #[arg(short, long)]
        items: String,
        /// Expiry date (YYYY-MM-DD)
        #[arg(short, long)]
        expiry: String,
    },

    /// Replace every field of a medicine
    Update {
        /// Id of the medicine to update
        #[arg(long)]
        id: i64,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        packs: String,
        #[arg(short, long)]
        items: String,
        #[arg(short, long)]
        expiry: String,
    },

    /// Delete a medicine
    Delete {
        #[arg(long)]
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Search medicines by name
    Search {
        query: String,
    },
}

#[derive(Subcommand)]
pub enum EquipmentAction {
    /// List all equipment
    List,

    /// Add equipment
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        quantity: String,
        /// Location or notes
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Replace every field of an equipment row
    Update {
        #[arg(long)]
        id: i64,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        quantity: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete equipment
    Delete {
        #[arg(long)]
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },

    /// Search equipment by name or description
    Search {
        query: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "ok": true,
            "command": command,
            "data": data,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

fn emit_error(output_mode: OutputMode, err: &anyhow::Error) {
    match output_mode {
        OutputMode::Human => ui::error(&err.to_string()),
        OutputMode::Json => {
            let envelope = serde_json::json!({
                "ok": false,
                "error": err.to_string(),
            });
            println!("{envelope}");
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; keep stdout free for tables and JSON
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    if let Err(err) = run(cli, output_mode) {
        let user_error = err
            .downcast_ref::<clinic_inventory::Error>()
            .is_some_and(clinic_inventory::Error::is_user_error);
        if !user_error {
            tracing::error!("{:#}", err);
        }
        emit_error(output_mode, &err);
        std::process::exit(1);
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let loaded = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database(cli.database.as_deref(), loaded.as_ref());
    config::ensure_db_dir(&database)?;

    let store = InventoryStore::open(&database);
    store.init_schema()?;
    tracing::debug!("Using database {}", database.display());

    match cli.command {
        Commands::Init { write_config, force } => {
            let config_path = cli.config.unwrap_or_else(config::default_config_path);
            commands::run_init(&store, output_mode, write_config.then_some(config_path.as_path()), force)
        }
        Commands::Medicine { action } => commands::run_medicine(&store, output_mode, action),
        Commands::Equipment { action } => commands::run_equipment(&store, output_mode, action),
        Commands::Total { packs, items } => commands::run_total(output_mode, &packs, &items),
        Commands::Stats => commands::run_stats(&store, output_mode),
        Commands::Shell => {
            if !output_mode.is_human() {
                anyhow::bail!("The shell is only available in human mode.");
            }
            let stdin = std::io::stdin();
            shell::Shell::new(&store, stdin.lock()).run()
        }
    }
}
