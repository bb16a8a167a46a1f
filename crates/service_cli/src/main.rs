//! optcalc - European option pricing from the command line
//!
//! Operational entry point for the Black-Scholes engine.
//!
//! # Commands
//!
//! - `optcalc price` - Price one option and report delta, vega, theta, rho
//! - `optcalc vol --history <file>` - Annualised historical volatility
//! - `optcalc batch --input <file>` - Price every row of a CSV file
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires configuration and
//! logging around the pricing crates and renders their results.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod history;
mod output;

pub use error::{CliError, Result};

use commands::batch::BatchArgs;
use commands::price::PriceArgs;
use commands::vol::VolArgs;
use config::{build_config, CliArgs};

/// European option pricer with AD Greeks
#[derive(Parser)]
#[command(name = "optcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            format: cli.format.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option and compute its Greeks
    Price(PriceArgs),

    /// Estimate annualised volatility from daily closes
    Vol(VolArgs),

    /// Price a CSV batch of options
    Batch(BatchArgs),
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli))?;

    init_tracing(config.log_level.as_filter_str());
    info!(
        log_level = %config.log_level,
        format = %config.output_format,
        rate_pct = config.risk_free_rate_pct,
        "optcalc v{}",
        env!("CARGO_PKG_VERSION")
    );

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config),
        Commands::Vol(args) => commands::vol::run(args, &config),
        Commands::Batch(args) => commands::batch::run(args, &config),
    }
}
