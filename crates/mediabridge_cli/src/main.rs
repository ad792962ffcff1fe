//! mediabridge CLI
//!
//! Developer tooling for the native media bridge: scaffold and validate
//! `mediabridge.toml`, and replay recorded intents off-device.

mod config;
mod replay;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mediabridge")]
#[command(author, version, about = "Native media bridge tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default mediabridge.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a configuration and print the resolved values
    Check {
        /// Config file or directory containing mediabridge.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Replay a JSON array of intents through the receiver
    Replay {
        /// Recorded intents
        intents: PathBuf,

        /// Config file or directory containing mediabridge.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip the registered filter and hand every intent to the receiver
        #[arg(long)]
        direct: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { path, force } => {
            let written = config::write_default_config(&path, force)?;
            tracing::info!("Wrote {}", written.display());
        }
        Commands::Check { config } => {
            let config = config::load_config(config.as_deref())?;
            let filter = mediabridge_core::media_filter(&config);
            println!("{}", config.to_toml()?);
            println!("# filter rules: {:?}", filter.rules());
        }
        Commands::Replay {
            intents,
            config,
            direct,
            json,
        } => {
            let config = config::load_config(config.as_deref())?;
            let intents = replay::read_intents(&intents)?;
            let summary = replay::replay(&config, &intents, direct)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{} intents: {} mounted, {} generic, {} ignored, {} filtered",
                    summary.total,
                    summary.mounted,
                    summary.generic,
                    summary.ignored,
                    summary.filtered
                );
            }
        }
    }

    Ok(())
}
