// ReqLog - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Dispatch to health / analyze / export
//
// Results go to stdout; diagnostics go to stderr via tracing.

use clap::{Parser, Subcommand};
use reqlog::app::service::{self, Analyzer};
use reqlog::platform::config::{load_config, PlatformPaths};
use reqlog::util;
use std::path::PathBuf;

/// ReqLog - per-day client request log analyser.
///
/// Reads `client-requests.<date>.log` from the log directory, counts
/// requests by IP, URI and method, and exports everything to xlsx.
#[derive(Parser, Debug)]
#[command(name = "ReqLog", version, about)]
struct Cli {
    /// Log directory (overrides [logs] directory in config.toml).
    #[arg(short = 'l', long = "log-dir", global = true)]
    log_dir: Option<PathBuf>,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the fixed health signal.
    Health,

    /// Print request statistics for a day as JSON.
    Analyze {
        /// Day to analyse, yyyy-MM-dd.
        date: String,
    },

    /// Write the day's xlsx export and print its path.
    Export {
        /// Day to export, yyyy-MM-dd.
        date: String,
    },
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli
        .config
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (config, warnings) = load_config(&config_path);

    util::logging::init(cli.debug, config.log_level.as_deref());
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let log_dir = cli.log_dir.unwrap_or(config.log_dir);
    tracing::debug!(
        version = util::constants::APP_VERSION,
        log_dir = %log_dir.display(),
        "ReqLog starting"
    );

    let analyzer = Analyzer::new(log_dir);

    match cli.command {
        Command::Health => println!("{}", service::health()),
        Command::Analyze { date } => {
            let analysis = analyzer.analyze(&date)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Command::Export { date } => {
            let artifact = analyzer.export_artifact(&date)?;
            println!("{}", artifact.path.display());
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
