//! Batch command implementation
//!
//! Prices every row of a CSV file. Rows that fail validation are reported
//! alongside the successful ones; they do not stop the batch.

use clap::Args;
use pricer_models::greeks::PriceResult;
use pricer_risk::batch::{BatchEvaluator, BatchItem, BatchOutcome};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{CliConfig, OutputFormat};
use crate::output::{format_value, render_table};
use crate::{CliError, Result};

/// Arguments for `optcalc batch`
#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// CSV with columns kind,spot,volatility,strike,time_to_expiration,rate
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,
}

/// Reads batch items from CSV.
pub fn read_items<R: Read>(reader: R) -> Result<Vec<BatchItem>> {
    let items = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect::<std::result::Result<Vec<BatchItem>, csv::Error>>()?;
    Ok(items)
}

#[derive(Serialize)]
struct Row<'a> {
    index: usize,
    #[serde(flatten)]
    item: &'a BatchItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a PriceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Renders a batch outcome in the configured format.
pub fn render(
    items: &[BatchItem],
    outcome: &BatchOutcome,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<Row<'_>> = items
                .iter()
                .zip(&outcome.results)
                .enumerate()
                .map(|(index, (item, result))| Row {
                    index,
                    item,
                    result: result.as_ref().ok(),
                    error: result.as_ref().err().map(|e| e.to_string()),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&rows)?)
        }
        OutputFormat::Table => {
            let mut headers = vec!["#", "kind"];
            headers.extend(PriceResult::FIELDS);
            let rows: Vec<Vec<String>> = items
                .iter()
                .zip(&outcome.results)
                .enumerate()
                .map(|(index, (item, result))| {
                    let mut row = vec![index.to_string(), item.option_type.to_string()];
                    match result {
                        Ok(r) => row.extend(r.values().iter().map(|v| format_value(*v))),
                        Err(e) => row.push(e.to_string()),
                    }
                    row
                })
                .collect();
            Ok(render_table(&headers, &rows))
        }
    }
}

/// Evaluates the batch file and renders the results.
pub fn execute(args: &BatchArgs, config: &CliConfig) -> Result<String> {
    if !args.input.exists() {
        return Err(CliError::FileNotFound(args.input.display().to_string()));
    }
    let items = read_items(std::fs::File::open(&args.input)?)?;
    let outcome = BatchEvaluator::with_config(config.parallel_config()).evaluate(&items);

    for error in outcome.errors() {
        warn!("{}", error);
    }
    info!(
        items = outcome.stats.items,
        succeeded = outcome.stats.succeeded,
        failed = outcome.stats.failed,
        parallel = outcome.stats.used_parallel,
        elapsed_ms = outcome.stats.elapsed_ms(),
        "Batch complete"
    );

    render(&items, &outcome, config.output_format)
}

/// Run the batch command
pub fn run(args: &BatchArgs, config: &CliConfig) -> Result<()> {
    let rendered = execute(args, config)?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::OptionType;

    const SAMPLE: &str = "kind,spot,volatility,strike,time_to_expiration,rate
call,100,0.2,100,1,0.05
put,100,0.2,100,1,0.05
call,100,0.2,100,0,0.05
";

    #[test]
    fn test_read_items() {
        let items = read_items(SAMPLE.as_bytes()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].option_type, OptionType::Put);
        assert_eq!(items[2].time_to_expiration, 0.0);
    }

    #[test]
    fn test_read_items_unknown_kind() {
        let csv = "kind,spot,volatility,strike,time_to_expiration,rate\nstraddle,1,1,1,1,1\n";
        let err = read_items(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CliError::Csv(_)));
    }

    #[test]
    fn test_render_json_mixes_results_and_errors() {
        let items = read_items(SAMPLE.as_bytes()).unwrap();
        let outcome = BatchEvaluator::new().evaluate(&items);
        let out = render(&items, &outcome, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["result"]["delta"], 0.637);
        assert_eq!(value[1]["kind"], "put");
        assert_eq!(value[1]["result"]["delta"], -0.363);
        assert!(value[2]["result"].is_null());
        assert!(value[2]["error"].as_str().unwrap().contains("time_to_expiration"));
    }

    #[test]
    fn test_render_table() {
        let items = read_items(SAMPLE.as_bytes()).unwrap();
        let outcome = BatchEvaluator::new().evaluate(&items);
        let out = render(&items, &outcome, OutputFormat::Table).unwrap();

        assert!(out.contains("theta"));
        assert!(out.contains("0.637"));
        assert!(out.contains("Invalid parameter"));
    }

    #[test]
    fn test_missing_input_file() {
        let args = BatchArgs {
            input: PathBuf::from("/nonexistent/batch.csv"),
        };
        assert!(matches!(
            execute(&args, &CliConfig::default()),
            Err(CliError::FileNotFound(_))
        ));
    }
}
