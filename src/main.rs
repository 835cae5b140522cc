//! Rosette CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "rosette")]
#[command(about = "Radial track-map layout engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a mutation script and print the resulting layout as JSON
    Run {
        /// Path to the JSON mutation script
        script: PathBuf,

        /// Layout configuration overrides (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the snapshot JSON
        #[arg(short, long)]
        pretty: bool,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for snapshot JSON.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "rosette={0},rosette_core={0},rosette_layout={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Rosette v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Run {
            script,
            config,
            pretty,
        } => commands::run(script, config, pretty),
        Commands::Version => {
            println!("Rosette v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
