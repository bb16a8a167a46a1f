//! Batch evaluation of many options.
//!
//! [`BatchEvaluator`] prices a slice of [`BatchItem`]s and returns one
//! result per item in input order. Items are independent, so a failure in
//! one never affects another.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::OptionType;
//! use pricer_risk::batch::{BatchEvaluator, BatchItem};
//!
//! let items = vec![
//!     BatchItem::new(OptionType::Call, 100.0, 0.2, 100.0, 1.0, 0.05),
//!     BatchItem::new(OptionType::Put, 100.0, 0.0, 100.0, 1.0, 0.05),
//! ];
//! let outcome = BatchEvaluator::new().evaluate(&items);
//!
//! assert_eq!(outcome.stats.succeeded, 1);
//! assert_eq!(outcome.stats.failed, 1);
//! assert_eq!(outcome.errors().next().unwrap().index(), 1);
//! ```

use std::time::Instant;

use pricer_core::types::PricingError;
use pricer_models::engine::evaluate;
use pricer_models::greeks::PriceResult;
use pricer_models::instruments::{OptionParameters, OptionType};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::parallel::{process_in_batches, ParallelConfig};

/// Error for one failed item, tagged with its position in the batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchError {
    /// The item's inputs were rejected.
    #[error("Item {index} failed: {source}")]
    Item {
        /// Zero-based index of the item.
        index: usize,
        /// Underlying pricing error.
        #[source]
        source: PricingError,
    },
}

impl BatchError {
    /// Zero-based index of the failed item.
    pub fn index(&self) -> usize {
        match self {
            BatchError::Item { index, .. } => *index,
        }
    }
}

/// One option to price: type plus unvalidated inputs.
///
/// Field names match the batch CSV header, with `kind` for the option type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    /// Call or put.
    #[serde(rename = "kind")]
    pub option_type: OptionType,
    /// Spot price.
    pub spot: f64,
    /// Annualised volatility, decimal.
    pub volatility: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiration in years.
    pub time_to_expiration: f64,
    /// Risk-free rate, decimal.
    pub rate: f64,
}

impl BatchItem {
    /// Creates an item in positional parameter order.
    pub fn new(
        option_type: OptionType,
        spot: f64,
        volatility: f64,
        strike: f64,
        time_to_expiration: f64,
        rate: f64,
    ) -> Self {
        Self {
            option_type,
            spot,
            volatility,
            strike,
            time_to_expiration,
            rate,
        }
    }

    /// Validates and prices this item.
    pub fn evaluate(&self) -> Result<PriceResult, PricingError> {
        let params = OptionParameters::new(
            self.spot,
            self.volatility,
            self.strike,
            self.time_to_expiration,
            self.rate,
        )?;
        Ok(evaluate(self.option_type, &params))
    }
}

/// Statistics for one batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    /// Number of items evaluated.
    pub items: usize,
    /// Items that produced a result.
    pub succeeded: usize,
    /// Items rejected by validation.
    pub failed: usize,
    /// Wall-clock time in nanoseconds.
    pub elapsed_ns: u64,
    /// Whether the batch ran on the Rayon pool.
    pub used_parallel: bool,
}

impl BatchStats {
    /// Wall-clock time in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ns as f64 / 1_000_000.0
    }
}

/// Per-item results plus statistics.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// One entry per input item, in input order.
    pub results: Vec<Result<PriceResult, PricingError>>,
    /// Run statistics.
    pub stats: BatchStats,
}

impl BatchOutcome {
    /// Failed items with their indices.
    pub fn errors(&self) -> impl Iterator<Item = BatchError> + '_ {
        self.results.iter().enumerate().filter_map(|(index, r)| {
            r.as_ref().err().map(|e| BatchError::Item {
                index,
                source: e.clone(),
            })
        })
    }

    /// All results, or the first failure.
    pub fn into_results(self) -> Result<Vec<PriceResult>, BatchError> {
        self.results
            .into_iter()
            .enumerate()
            .map(|(index, r)| r.map_err(|source| BatchError::Item { index, source }))
            .collect()
    }
}

/// Evaluates batches of options, in parallel above a size threshold.
#[derive(Debug, Clone, Default)]
pub struct BatchEvaluator {
    config: ParallelConfig,
}

impl BatchEvaluator {
    /// Creates an evaluator with the default parallel configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with the given parallel configuration.
    pub fn with_config(config: ParallelConfig) -> Self {
        Self { config }
    }

    /// Returns the parallel configuration.
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Evaluates every item.
    pub fn evaluate(&self, items: &[BatchItem]) -> BatchOutcome {
        let start = Instant::now();
        let used_parallel = self.config.should_parallelize(items.len());

        let results: Vec<Result<PriceResult, PricingError>> = if used_parallel {
            process_in_batches(items, self.config.batch_size, |chunk| {
                chunk.iter().map(BatchItem::evaluate).collect()
            })
        } else {
            items.iter().map(BatchItem::evaluate).collect()
        };

        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        let stats = BatchStats {
            items: items.len(),
            succeeded,
            failed: items.len() - succeeded,
            elapsed_ns: start.elapsed().as_nanos() as u64,
            used_parallel,
        };
        debug!(
            items = stats.items,
            failed = stats.failed,
            parallel = used_parallel,
            elapsed_ms = stats.elapsed_ms(),
            "Batch evaluated"
        );

        BatchOutcome { results, stats }
    }
}
