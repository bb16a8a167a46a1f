//! Greeks result types.
//!
//! [`Sensitivities`] holds raw partial derivatives straight from the
//! differentiation pass. [`PriceResult`] is what callers see: the same
//! numbers converted to market quoting conventions and rounded.

use serde::{Deserialize, Serialize};

use crate::instruments::OptionType;
use pricer_core::math::round_to;

/// Vega is quoted per 1 percentage point of volatility.
pub const VEGA_SCALE: f64 = 100.0;

/// Theta is quoted per calendar day of time decay; the sign flips because
/// time to expiration shrinks as the calendar advances.
pub const THETA_SCALE: f64 = -365.0;

/// Rho is quoted per 1 percentage point of rate.
pub const RHO_SCALE: f64 = 100.0;

/// Decimal places kept in a [`PriceResult`].
pub const RESULT_DECIMALS: i32 = 3;

/// Price and raw first-order partial derivatives.
///
/// - `d_spot`: ∂V/∂S
/// - `d_volatility`: ∂V/∂σ
/// - `d_time`: ∂V/∂T (T = time to expiration)
/// - `d_rate`: ∂V/∂r
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensitivities {
    /// Present value.
    pub price: f64,
    /// ∂V/∂S
    pub d_spot: f64,
    /// ∂V/∂σ
    pub d_volatility: f64,
    /// ∂V/∂T
    pub d_time: f64,
    /// ∂V/∂r
    pub d_rate: f64,
}

/// Price and Greeks in market conventions, rounded to three decimals.
///
/// | Field | Definition |
/// |-------|------------|
/// | `price` | V |
/// | `delta` | ∂V/∂S |
/// | `vega` | (∂V/∂σ) / 100 |
/// | `theta` | (∂V/∂T) / -365 |
/// | `rho` | (∂V/∂r) / 100 |
///
/// # Examples
/// ```
/// use pricer_models::greeks::{PriceResult, Sensitivities};
/// use pricer_models::instruments::OptionType;
///
/// let raw = Sensitivities {
///     price: 10.45058,
///     d_spot: 0.63683,
///     d_volatility: 37.524,
///     d_time: 6.414,
///     d_rate: 53.232,
/// };
/// let result = PriceResult::from_sensitivities(&raw);
/// assert_eq!(result.price, 10.451);
/// assert_eq!(result.vega, 0.375);
/// assert_eq!(result.theta, -0.018);
///
/// let keys: Vec<String> = result.labelled(OptionType::Call).into_iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, ["call_price", "call_delta", "call_vega", "call_theta", "call_rho"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Present value.
    pub price: f64,
    /// Delta: ∂V/∂S.
    pub delta: f64,
    /// Vega per volatility point.
    pub vega: f64,
    /// Theta per calendar day.
    pub theta: f64,
    /// Rho per rate point.
    pub rho: f64,
}

impl PriceResult {
    /// Field names in output order.
    pub const FIELDS: [&'static str; 5] = ["price", "delta", "vega", "theta", "rho"];

    /// Applies the market rescaling and rounds every field.
    pub fn from_sensitivities(raw: &Sensitivities) -> Self {
        let round = |x: f64| round_to(x, RESULT_DECIMALS);
        Self {
            price: round(raw.price),
            delta: round(raw.d_spot),
            vega: round(raw.d_volatility / VEGA_SCALE),
            theta: round(raw.d_time / THETA_SCALE),
            rho: round(raw.d_rate / RHO_SCALE),
        }
    }

    /// Values in [`Self::FIELDS`] order.
    #[inline]
    pub fn values(&self) -> [f64; 5] {
        [self.price, self.delta, self.vega, self.theta, self.rho]
    }

    /// Key/value pairs prefixed with the option type, e.g. `put_theta`.
    pub fn labelled(&self, option_type: OptionType) -> Vec<(String, f64)> {
        Self::FIELDS
            .iter()
            .zip(self.values())
            .map(|(name, value)| (format!("{}_{}", option_type.label(), name), value))
            .collect()
    }
}

impl From<Sensitivities> for PriceResult {
    fn from(raw: Sensitivities) -> Self {
        Self::from_sensitivities(&raw)
    }
}
