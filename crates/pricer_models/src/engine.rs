//! Pricing entry points.
//!
//! Every function here validates its inputs before any formula runs. Price
//! and Greeks come from a single differentiation pass, so the reported
//! price is exactly the point at which the Greeks were taken.

use pricer_core::types::PricingError;
use tracing::debug;

use crate::analytical::black_scholes::{call_price, put_price};
use crate::greeks::{greeks, PriceResult};
use crate::instruments::{OptionParameters, OptionType};

/// Price and Greeks for one option type at validated parameters.
///
/// # Examples
/// ```
/// use pricer_models::engine::evaluate;
/// use pricer_models::instruments::{OptionParameters, OptionType};
///
/// let params = OptionParameters::new(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();
/// let put = evaluate(OptionType::Put, &params);
/// assert_eq!(put.delta, -0.363);
/// ```
pub fn evaluate(option_type: OptionType, params: &OptionParameters) -> PriceResult {
    let result = match option_type {
        OptionType::Call => greeks(call_price, params),
        OptionType::Put => greeks(put_price, params),
    };
    debug!(
        kind = %option_type,
        spot = params.spot(),
        strike = params.strike(),
        price = result.price,
        "Evaluated option"
    );
    result
}

/// Unrounded price for one option type at validated parameters.
pub fn price(option_type: OptionType, params: &OptionParameters) -> f64 {
    let inputs = params.to_array();
    match option_type {
        OptionType::Call => call_price(inputs),
        OptionType::Put => put_price(inputs),
    }
}

/// European call price.
///
/// # Errors
/// `PricingError::InvalidParameter` if any input is out of domain.
///
/// # Examples
/// ```
/// use pricer_models::engine::price_call;
///
/// let c = price_call(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();
/// assert!((c - 10.4506).abs() < 1e-3);
/// assert!(price_call(100.0, 0.2, 100.0, 0.0, 0.05).is_err());
/// ```
pub fn price_call(
    spot: f64,
    volatility: f64,
    strike: f64,
    time_to_expiration: f64,
    risk_free_rate: f64,
) -> Result<f64, PricingError> {
    let params =
        OptionParameters::new(spot, volatility, strike, time_to_expiration, risk_free_rate)?;
    Ok(price(OptionType::Call, &params))
}

/// European put price.
///
/// # Errors
/// `PricingError::InvalidParameter` if any input is out of domain.
pub fn price_put(
    spot: f64,
    volatility: f64,
    strike: f64,
    time_to_expiration: f64,
    risk_free_rate: f64,
) -> Result<f64, PricingError> {
    let params =
        OptionParameters::new(spot, volatility, strike, time_to_expiration, risk_free_rate)?;
    Ok(price(OptionType::Put, &params))
}

/// Call price and Greeks, rounded to three decimals.
///
/// # Errors
/// `PricingError::InvalidParameter` if any input is out of domain.
pub fn call_greeks(
    spot: f64,
    volatility: f64,
    strike: f64,
    time_to_expiration: f64,
    risk_free_rate: f64,
) -> Result<PriceResult, PricingError> {
    let params =
        OptionParameters::new(spot, volatility, strike, time_to_expiration, risk_free_rate)?;
    Ok(evaluate(OptionType::Call, &params))
}

/// Put price and Greeks, rounded to three decimals.
///
/// # Errors
/// `PricingError::InvalidParameter` if any input is out of domain.
pub fn put_greeks(
    spot: f64,
    volatility: f64,
    strike: f64,
    time_to_expiration: f64,
    risk_free_rate: f64,
) -> Result<PriceResult, PricingError> {
    let params =
        OptionParameters::new(spot, volatility, strike, time_to_expiration, risk_free_rate)?;
    Ok(evaluate(OptionType::Put, &params))
}
