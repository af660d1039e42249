//! Civic CLI - issue reporting with near-duplicate evidence detection.
//!
//! Every photo attached to a report is fingerprinted and compared against the
//! photos already attached to the same report; a batch that resubmits a photo
//! is refused as a whole.
//!
//! # Usage
//!
//! ```bash
//! # Fingerprint photos
//! civic fingerprint ./photos/
//!
//! # Screen selection batches as one report would
//! civic check first.jpg ./second-batch/
//!
//! # File a report
//! civic report --title "Pothole" --description "Near the bus stop" \
//!     --category road --evidence pothole.jpg
//!
//! # View configuration
//! civic config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Civic - issue reporting with duplicate evidence detection.
#[derive(Parser, Debug)]
#[command(name = "civic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "CIVIC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the perceptual fingerprint of images
    Fingerprint(cli::fingerprint::FingerprintArgs),

    /// Compare two images or fingerprints
    Compare(cli::compare::CompareArgs),

    /// Screen batches of evidence for duplicates, as one report would
    Check(cli::check::CheckArgs),

    /// File a new issue report
    Report(cli::report::ReportArgs),

    /// List recently reported issues
    Recent(cli::recent::RecentArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `civic config path`."
            );
            civic_core::Config::default()
        }
    };
    logging::init(&logging::LogSettings::resolve(
        &config.logging,
        cli.verbose,
        cli.json_logs,
    ));

    tracing::debug!("Civic v{}", civic_core::VERSION);

    match cli.command {
        Commands::Fingerprint(args) => cli::fingerprint::execute(&config, args).await,
        Commands::Compare(args) => cli::compare::execute(&config, args).await,
        Commands::Check(args) => cli::check::execute(&config, args).await,
        Commands::Report(args) => cli::report::execute(&config, args).await,
        Commands::Recent(args) => cli::recent::execute(&config, args).await,
        Commands::Config(args) => cli::config::execute(&config, cli.config, args).await,
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<civic_core::Config, civic_core::ConfigError> {
    match path {
        Some(path) => civic_core::Config::load_from(path),
        None => civic_core::Config::load(),
    }
}
