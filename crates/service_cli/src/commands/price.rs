//! Price command implementation
//!
//! Prices a single European option and reports its Greeks.

use clap::{Args, ValueEnum};
use pricer_models::engine::evaluate;
use pricer_models::instruments::params::{DAYS_PER_YEAR, PERCENT};
use pricer_models::instruments::{OptionParameters, OptionType};
use std::path::PathBuf;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::history::CsvHistory;
use crate::output::{render_labelled, Labelled};
use crate::Result;

/// Which option types to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KindArg {
    /// Call only
    Call,
    /// Put only
    Put,
    /// Call then put
    #[default]
    Both,
}

impl KindArg {
    fn option_types(self) -> &'static [OptionType] {
        match self {
            KindArg::Call => &[OptionType::Call],
            KindArg::Put => &[OptionType::Put],
            KindArg::Both => &OptionType::ALL,
        }
    }
}

/// Arguments for `optcalc price`
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Calendar days to expiration
    #[arg(long)]
    pub days: f64,

    /// Annualised volatility in percent
    #[arg(long, conflicts_with = "underlying")]
    pub vol_pct: Option<f64>,

    /// Underlying whose history supplies the volatility
    #[arg(long, requires = "history")]
    pub underlying: Option<String>,

    /// History CSV file, or directory of <UNDERLYING>.csv files
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Risk-free rate in percent (defaults to the configured rate)
    #[arg(long)]
    pub rate_pct: Option<f64>,

    /// Option type to report
    #[arg(long, value_enum, default_value_t = KindArg::Both)]
    pub kind: KindArg,
}

/// Builds validated parameters, estimating volatility from history if needed.
pub fn build_params(args: &PriceArgs, config: &CliConfig) -> Result<OptionParameters> {
    let rate_pct = args.rate_pct.unwrap_or(config.risk_free_rate_pct);
    let mut builder = OptionParameters::builder(
        args.spot,
        args.strike,
        args.days / DAYS_PER_YEAR,
        rate_pct / PERCENT,
    );
    if let Some(vol_pct) = args.vol_pct {
        builder = builder.volatility(vol_pct / PERCENT);
    }
    if let Some(underlying) = &args.underlying {
        builder = builder.underlying(underlying.as_str());
    }

    let params = match &args.history {
        Some(path) => builder.build_with(&CsvHistory::new(path, config.history_window_days))?,
        None => builder.build()?,
    };
    Ok(params)
}

/// Prices the option and renders the result.
pub fn execute(args: &PriceArgs, config: &CliConfig) -> Result<String> {
    let params = build_params(args, config)?;
    info!(
        spot = params.spot(),
        volatility = params.volatility(),
        strike = params.strike(),
        time_to_expiration = params.time_to_expiration(),
        rate = params.risk_free_rate(),
        "Pricing option"
    );

    let rows = Labelled(
        args.kind
            .option_types()
            .iter()
            .flat_map(|&kind| evaluate(kind, &params).labelled(kind))
            .collect(),
    );

    match config.output_format {
        OutputFormat::Table => Ok(render_labelled(&rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
    }
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<()> {
    let rendered = execute(args, config)?;
    println!("{}", rendered);
    Ok(())
}
