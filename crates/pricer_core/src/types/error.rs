//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from parameter validation, pricing and
//!   volatility estimation

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every variant is a deterministic input failure. Nothing here is retried
/// and no variant is ever replaced by a default value.
///
/// # Variants
/// - `InvalidParameter`: A pricing input is outside its valid domain
/// - `MissingVolatilityInput`: Neither a volatility nor an underlying was given
/// - `InsufficientHistory`: Too few closes to compute a log-return
/// - `InvalidHistory`: A close price is non-positive or non-finite
/// - `HistoryUnavailable`: The price history source could not supply a series
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("volatility", 0.0, "must be positive");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter: volatility = 0 (must be positive)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A pricing input is outside its valid domain.
    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// Neither an explicit volatility nor an underlying to estimate it from.
    #[error("Missing volatility input: supply a volatility or an underlying to estimate it from")]
    MissingVolatilityInput,

    /// Fewer closes than needed to form a single log-return.
    #[error("Insufficient history: got {got} closes, need at least {need}")]
    InsufficientHistory {
        /// Number of closes supplied
        got: usize,
        /// Minimum number of closes required
        need: usize,
    },

    /// A close price that cannot enter a log-return.
    #[error("Invalid close price at index {index}: {price}")]
    InvalidHistory {
        /// Position of the close in the series
        index: usize,
        /// The rejected close
        price: f64,
    },

    /// The history source failed to produce a series.
    #[error("Price history unavailable for {underlying}: {reason}")]
    HistoryUnavailable {
        /// Underlying identifier that was requested
        underlying: String,
        /// Source-specific description of the failure
        reason: String,
    },
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        PricingError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Returns true for failures caused by a bad pricing input.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, PricingError::InvalidParameter { .. })
    }
}
