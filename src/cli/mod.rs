//! CLI module — command parsing and dispatch
//!
//! All CLI logic lives here. `main.rs` calls `cli::run()`.

pub mod config;
pub mod verify;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "depverify")]
#[command(version)]
#[command(about = "Dependency smoke test: HTTP, dates and core utilities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every check once and print the report
    Verify {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Print the bare report instead of the [{"json": ...}] envelope
        #[arg(long)]
        unwrapped: bool,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
        /// Seed the random source for a reproducible stdlib section
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Check the config file and print the effective settings
    Check,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

pub async fn run() -> Result<()> {
    // Logging settings come from the config file; fall back to defaults if
    // it is missing or unreadable. `config check` reports the actual error.
    let logging_cfg = depverify::config::Config::load()
        .map(|c| c.logging)
        .unwrap_or_default();
    if let Err(e) = depverify::utils::logging::init_logging(&logging_cfg) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
        }
        Some(Commands::Verify {
            format,
            unwrapped,
            compact,
            seed,
        }) => {
            verify::cmd_verify(format, unwrapped, compact, seed).await?;
        }
        Some(Commands::Config { action }) => {
            config::cmd_config(action).await?;
        }
        Some(Commands::Version) => {
            cmd_version();
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("depverify {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Dependency smoke test: HTTP client, date library and core utilities");
}
