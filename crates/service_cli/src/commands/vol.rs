//! Vol command implementation
//!
//! Estimates annualised historical volatility from a CSV of daily closes.

use clap::Args;
use pricer_core::market_data::{HistoricalVolatility, PriceHistorySource, StdDevConvention};
use std::path::PathBuf;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::history::CsvHistory;
use crate::output::{render_labelled, Labelled};
use crate::Result;

/// Arguments for `optcalc vol`
#[derive(Debug, Clone, Args)]
pub struct VolArgs {
    /// History CSV file, or directory of <UNDERLYING>.csv files
    #[arg(long, value_name = "PATH")]
    pub history: PathBuf,

    /// Underlying name (file stem of --history when omitted)
    #[arg(long)]
    pub underlying: Option<String>,

    /// Divide by n instead of n - 1
    #[arg(long)]
    pub population: bool,
}

impl VolArgs {
    fn underlying_name(&self) -> String {
        self.underlying.clone().unwrap_or_else(|| {
            self.history
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "underlying".to_string())
        })
    }
}

/// Estimates volatility and renders the result.
pub fn execute(args: &VolArgs, config: &CliConfig) -> Result<String> {
    let underlying = args.underlying_name();
    let convention = if args.population {
        StdDevConvention::Population
    } else {
        StdDevConvention::Sample
    };
    let estimator = HistoricalVolatility::new().with_convention(convention);
    let source = CsvHistory::new(&args.history, config.history_window_days);

    let closes = source.daily_closes(&underlying)?;
    let daily = estimator.daily(&closes)?;
    let annual = estimator.annualised(&closes)?;
    info!(underlying = %underlying, closes = closes.len(), annual, "Estimated volatility");

    let rows = Labelled(vec![
        ("closes".to_string(), closes.len() as f64),
        ("daily_volatility".to_string(), daily),
        ("annual_volatility".to_string(), annual),
        ("annual_volatility_pct".to_string(), annual * 100.0),
    ]);

    match config.output_format {
        OutputFormat::Table => Ok(render_labelled(&rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
    }
}

/// Run the vol command
pub fn run(args: &VolArgs, config: &CliConfig) -> Result<()> {
    let rendered = execute(args, config)?;
    println!("{}", rendered);
    Ok(())
}
