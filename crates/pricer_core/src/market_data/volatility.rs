//! Historical volatility estimation from daily closes.
//!
//! The estimator turns a trailing series of daily closes into an annualised
//! volatility:
//!
//! 1. log-returns `r_i = ln(p_{i+1} / p_i)` of consecutive closes,
//! 2. standard deviation of the returns (daily volatility),
//! 3. annualisation by `sqrt(252)`.
//!
//! Fetching the series is not this module's concern. Callers implement
//! [`PriceHistorySource`] for whatever provider they use and hand the
//! estimator a ready-made `&[f64]`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::PricingError;

/// Trading days per year used for annualisation.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Minimum number of closes needed to form one log-return.
pub const MIN_HISTORY_LEN: usize = 2;

/// Divisor used for the standard deviation of log-returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdDevConvention {
    /// Divide by `n - 1` (unbiased sample estimator).
    #[default]
    Sample,
    /// Divide by `n`.
    Population,
}

/// Supplier of daily closes for a named underlying.
///
/// Implementations own retrieval, caching and calendar handling. The series
/// they return is oldest first.
pub trait PriceHistorySource {
    /// Returns the trailing daily closes for `underlying`, oldest first.
    fn daily_closes(&self, underlying: &str) -> Result<Vec<f64>, PricingError>;
}

/// Computes log-returns of consecutive closes.
///
/// # Errors
/// - `PricingError::InsufficientHistory` for fewer than two closes
/// - `PricingError::InvalidHistory` for a non-positive or non-finite close
///
/// # Examples
/// ```
/// use pricer_core::market_data::volatility::log_returns;
///
/// let r = log_returns(&[100.0, 110.0]).unwrap();
/// assert!((r[0] - 1.1_f64.ln()).abs() < 1e-15);
/// ```
pub fn log_returns(closes: &[f64]) -> Result<Vec<f64>, PricingError> {
    if closes.len() < MIN_HISTORY_LEN {
        return Err(PricingError::InsufficientHistory {
            got: closes.len(),
            need: MIN_HISTORY_LEN,
        });
    }

    if let Some((index, &price)) = closes
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0))
    {
        return Err(PricingError::InvalidHistory { index, price });
    }

    Ok(closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Standard deviation of `values` about their mean.
///
/// A single observation has no spread about its own mean, so it is measured
/// about zero instead and the result is `|x|`. An empty slice yields `0.0`.
pub fn std_dev(values: &[f64], convention: StdDevConvention) -> f64 {
    match values.len() {
        0 => 0.0,
        1 => values[0].abs(),
        n => {
            let mean = values.iter().sum::<f64>() / n as f64;
            let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            let divisor = match convention {
                StdDevConvention::Sample => (n - 1) as f64,
                StdDevConvention::Population => n as f64,
            };
            (sum_sq / divisor).sqrt()
        }
    }
}

/// Close-to-close historical volatility estimator.
///
/// # Examples
/// ```
/// use pricer_core::market_data::volatility::HistoricalVolatility;
///
/// let estimator = HistoricalVolatility::new();
/// let vol = estimator.annualised(&[100.0, 101.0]).unwrap();
/// assert_eq!(vol, (101.0_f64 / 100.0).ln().abs() * 252.0_f64.sqrt());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalVolatility {
    convention: StdDevConvention,
    trading_days: f64,
}

impl Default for HistoricalVolatility {
    fn default() -> Self {
        Self {
            convention: StdDevConvention::Sample,
            trading_days: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl HistoricalVolatility {
    /// Creates an estimator with the sample convention and 252 trading days.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the standard deviation convention.
    pub fn with_convention(mut self, convention: StdDevConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Returns the standard deviation convention.
    #[inline]
    pub fn convention(&self) -> StdDevConvention {
        self.convention
    }

    /// Daily volatility: standard deviation of the log-returns.
    pub fn daily(&self, closes: &[f64]) -> Result<f64, PricingError> {
        let returns = log_returns(closes)?;
        Ok(std_dev(&returns, self.convention))
    }

    /// Annualised volatility: daily volatility times `sqrt(252)`.
    pub fn annualised(&self, closes: &[f64]) -> Result<f64, PricingError> {
        let daily = self.daily(closes)?;
        let annual = daily * self.trading_days.sqrt();
        debug!(
            closes = closes.len(),
            convention = ?self.convention,
            daily,
            annual,
            "Estimated historical volatility"
        );
        Ok(annual)
    }

    /// Fetches the closes for `underlying` from `source` and annualises them.
    pub fn estimate<S>(&self, source: &S, underlying: &str) -> Result<f64, PricingError>
    where
        S: PriceHistorySource + ?Sized,
    {
        let closes = source.daily_closes(underlying)?;
        debug!(underlying, closes = closes.len(), "Fetched price history");
        self.annualised(&closes)
    }
}
