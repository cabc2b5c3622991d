//! # ghx-cli
//!
//! Command-line interface for the GHX token distribution.
//!
//! ## Usage
//!
//! ```bash
//! # Check a plan
//! ghx validate params.json
//! ghx validate --preset mainnet
//!
//! # Dry-run the whole deployment on an in-memory ledger
//! ghx simulate --preset mainnet
//! ghx simulate params.toml --secrets secrets.json --release-after 2592000
//!
//! # Unlock timeline of one pool
//! ghx schedule --preset mainnet --pool Team
//! ```

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
use output::Report;

/// GHX distribution CLI
#[derive(Parser, Debug)]
#[command(name = "ghx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Config file (defaults to ~/.ghx/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a distribution plan
    Validate(commands::ParamsSource),
    /// Run a deployment against an in-memory ledger
    Simulate(commands::simulate::SimulateArgs),
    /// Print the unlock timeline of lock pools
    Schedule(commands::schedule::ScheduleArgs),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set default gas price
        #[arg(long)]
        set_gas_price: Option<u64>,
        /// Set default gas limit
        #[arg(long)]
        set_gas_limit: Option<u64>,
        /// Set simulation start time
        #[arg(long)]
        set_start_time: Option<u64>,
        /// Set simulated block time in seconds
        #[arg(long)]
        set_block_time: Option<u64>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs on stderr so --json stdout stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = run(cli.command, cli.config.as_deref(), cli.json);

    if let Err(e) = result {
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn run(command: Commands, config_path: Option<&Path>, json: bool) -> Result<(), CliError> {
    let mut config = Config::load(config_path)?;

    match command {
        Commands::Validate(source) => commands::validate::execute(&source, json),
        Commands::Simulate(args) => args.execute(&config, json),
        Commands::Schedule(args) => args.execute(json),
        Commands::Config {
            show,
            set_gas_price,
            set_gas_limit,
            set_start_time,
            set_block_time,
        } => {
            let updates = ConfigUpdates {
                gas_price: set_gas_price,
                gas_limit: set_gas_limit,
                start_time: set_start_time,
                block_time: set_block_time,
            };
            handle_config(&mut config, config_path, show, updates, json)
        }
    }
}

struct ConfigUpdates {
    gas_price: Option<u64>,
    gas_limit: Option<u64>,
    start_time: Option<u64>,
    block_time: Option<u64>,
}

fn handle_config(
    config: &mut Config,
    path: Option<&Path>,
    show: bool,
    updates: ConfigUpdates,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(gas_price) = updates.gas_price {
        config.gas_price = Some(gas_price);
        modified = true;
    }

    if let Some(gas_limit) = updates.gas_limit {
        config.gas_limit = Some(gas_limit);
        modified = true;
    }

    if let Some(start_time) = updates.start_time {
        config.start_time = Some(start_time);
        modified = true;
    }

    if let Some(block_time) = updates.block_time {
        if block_time == 0 {
            return Err(CliError::InvalidInput("block time must be positive".to_string()));
        }
        config.block_time = block_time;
        modified = true;
    }

    if modified {
        let path = config.save(path)?.display().to_string();
        output::emit(&ConfigSaved { status: "saved", path }, json)
    } else if show {
        output::emit(&*config, json)
    } else {
        output::emit(&ConfigUsage { usage: CONFIG_USAGE }, json)
    }
}

const CONFIG_USAGE: &str = concat!(
    "Use --show to display config, or ",
    "--set-gas-price/--set-gas-limit/--set-start-time/--set-block-time to modify"
);

#[derive(Serialize)]
struct ConfigSaved {
    status: &'static str,
    path: String,
}

impl Report for ConfigSaved {
    fn render(&self) -> String {
        format!("Configuration saved to {}", self.path)
    }
}

#[derive(Serialize)]
struct ConfigUsage {
    usage: &'static str,
}

impl Report for ConfigUsage {
    fn render(&self) -> String {
        self.usage.to_string()
    }
}
