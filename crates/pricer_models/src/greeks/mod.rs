//! Greeks by forward-mode automatic differentiation.
//!
//! Any pricing function written against positional dual inputs
//! `[S, σ, K, T, r]` can be handed to [`sensitivities`] or [`greeks`]. The
//! function is differentiated with respect to spot, volatility, time to
//! expiration and rate; strike is held constant. All four partials and the
//! price come from one evaluation over a four-direction [`GreeksDual`].

mod result;

pub use result::{
    PriceResult, Sensitivities, RESULT_DECIMALS, RHO_SCALE, THETA_SCALE, VEGA_SCALE,
};

use pricer_core::math::value_and_grad;
use pricer_core::types::DualVector;
use tracing::trace;

use crate::instruments::params::{RISK_FREE_RATE, SPOT, TIME_TO_EXPIRATION, VOLATILITY};
use crate::instruments::OptionParameters;

/// Inputs differentiated by the Greeks engine, in result order.
pub const GREEK_INPUTS: [usize; 4] = [SPOT, VOLATILITY, TIME_TO_EXPIRATION, RISK_FREE_RATE];

/// Dual number carrying one derivative direction per entry of [`GREEK_INPUTS`].
pub type GreeksDual = DualVector<4>;

/// Raw price and partial derivatives of `pricing_fn` at `params`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_scholes::call_price;
/// use pricer_models::greeks::sensitivities;
/// use pricer_models::instruments::OptionParameters;
///
/// let params = OptionParameters::new(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();
/// let raw = sensitivities(call_price, &params);
/// assert!(raw.d_spot > 0.5 && raw.d_spot < 0.7);
/// ```
pub fn sensitivities<F>(pricing_fn: F, params: &OptionParameters) -> Sensitivities
where
    F: FnOnce([GreeksDual; 5]) -> GreeksDual,
{
    let out = value_and_grad(pricing_fn, params.to_array(), GREEK_INPUTS);
    let [d_spot, d_volatility, d_time, d_rate] = out.grad;
    trace!(
        price = out.value,
        d_spot,
        d_volatility,
        d_time,
        d_rate,
        "Differentiated pricing function"
    );

    Sensitivities {
        price: out.value,
        d_spot,
        d_volatility,
        d_time,
        d_rate,
    }
}

/// Price and rounded market-convention Greeks of `pricing_fn` at `params`.
pub fn greeks<F>(pricing_fn: F, params: &OptionParameters) -> PriceResult
where
    F: FnOnce([GreeksDual; 5]) -> GreeksDual,
{
    PriceResult::from_sensitivities(&sensitivities(pricing_fn, params))
}
