//! Integration tests for prices and Greeks through the public entry points.
//!
//! Covers the worked ATM scenario, put-call parity, limiting behaviour near
//! expiry, monotonicity and the sign and range of each Greek.

use approx::assert_relative_eq;
use pricer_core::market_data::PriceHistorySource;
use pricer_core::types::PricingError;
use pricer_models::engine::{call_greeks, evaluate, price_call, price_put, put_greeks};
use pricer_models::instruments::{OptionParameters, OptionType};
use proptest::prelude::*;

// ==========================================================
// Worked scenario
// ==========================================================

#[test]
fn test_atm_one_year_scenario() {
    let call = call_greeks(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();
    let put = put_greeks(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();

    assert_relative_eq!(call.price, 10.451, epsilon = 1e-2);
    assert_relative_eq!(put.price, 5.574, epsilon = 1e-2);
    assert_eq!(call.delta, 0.637);
    assert_eq!(put.delta, -0.363);

    // Vega is shared by call and put
    assert_eq!(call.vega, put.vega);
    assert_relative_eq!(call.vega, 0.375, epsilon = 1e-3);

    assert!(call.theta < 0.0);
    assert!(call.rho > 0.0);
    assert!(put.rho < 0.0);
}

#[test]
fn test_market_units_scenario() {
    // 20% vol, 365 days, 5% rate expressed in quote units
    let params = OptionParameters::from_market_units(100.0, 20.0, 100.0, 365.0, 5.0).unwrap();
    let direct = call_greeks(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();
    assert_eq!(evaluate(OptionType::Call, &params), direct);
}

#[test]
fn test_history_driven_scenario() {
    struct Closes;
    impl PriceHistorySource for Closes {
        fn daily_closes(&self, underlying: &str) -> Result<Vec<f64>, PricingError> {
            match underlying {
                "ACME" => Ok(vec![100.0, 101.5, 100.8, 102.2, 101.9, 103.0]),
                other => Err(PricingError::HistoryUnavailable {
                    underlying: other.to_string(),
                    reason: "not found".to_string(),
                }),
            }
        }
    }

    let params = OptionParameters::builder(103.0, 100.0, 0.5, 0.02)
        .underlying("ACME")
        .build_with(&Closes)
        .unwrap();
    let result = evaluate(OptionType::Call, &params);
    assert!(result.price > OptionType::Call.intrinsic(103.0, 100.0));

    let err = OptionParameters::builder(103.0, 100.0, 0.5, 0.02)
        .underlying("NOPE")
        .build_with(&Closes)
        .unwrap_err();
    assert!(matches!(err, PricingError::HistoryUnavailable { .. }));
}

// ==========================================================
// Limiting behaviour
// ==========================================================

#[test]
fn test_near_expiry_converges_to_intrinsic() {
    // Time value shrinks like S σ √T, largest at the money
    let (sigma, t) = (0.25, 1e-9_f64);
    for (spot, strike) in [(120.0, 100.0), (80.0, 100.0), (100.0, 100.0)] {
        let bound = spot * sigma * t.sqrt();
        let call = price_call(spot, sigma, strike, t, 0.03).unwrap();
        let put = price_put(spot, sigma, strike, t, 0.03).unwrap();
        assert!((call - OptionType::Call.intrinsic(spot, strike)).abs() <= bound);
        assert!((put - OptionType::Put.intrinsic(spot, strike)).abs() <= bound);
    }

    // At the money the time value itself is S σ √(T / 2π) to leading order
    let atm = price_call(100.0, sigma, 100.0, t, 0.0).unwrap();
    let leading = 100.0 * sigma * (t / (2.0 * std::f64::consts::PI)).sqrt();
    assert_relative_eq!(atm, leading, max_relative = 1e-3);
}

#[test]
fn test_low_volatility_converges_to_discounted_intrinsic() {
    // σ → 0: C → max(S - K e^(-rT), 0)
    let (s, k, t, r) = (100.0, 95.0, 1.0, 0.05_f64);
    let call = price_call(s, 1e-6, k, t, r).unwrap();
    assert_relative_eq!(call, s - k * (-r * t).exp(), epsilon = 1e-6);
}

#[test]
fn test_far_otm_greeks_vanish() {
    let call = call_greeks(10.0, 0.1, 100.0, 0.1, 0.01).unwrap();
    assert_eq!(call.price, 0.0);
    assert_eq!(call.delta, 0.0);
    assert_eq!(call.vega, 0.0);
    assert_eq!(call.theta, 0.0);
    assert_eq!(call.rho, 0.0);
}

// ==========================================================
// Validation
// ==========================================================

#[test]
fn test_invalid_inputs_never_price() {
    let cases = [
        (0.0, 0.2, 100.0, 1.0, 0.05),
        (100.0, 0.0, 100.0, 1.0, 0.05),
        (100.0, 0.2, -1.0, 1.0, 0.05),
        (100.0, 0.2, 100.0, 0.0, 0.05),
        (100.0, 0.2, 100.0, 1.0, -0.05),
        (100.0, f64::NAN, 100.0, 1.0, 0.05),
    ];
    for (s, v, k, t, r) in cases {
        assert!(call_greeks(s, v, k, t, r).unwrap_err().is_invalid_parameter());
        assert!(put_greeks(s, v, k, t, r).unwrap_err().is_invalid_parameter());
    }
}

// ==========================================================
// Property-based tests
// ==========================================================

fn market() -> impl Strategy<Value = (f64, f64, f64, f64, f64)> {
    (
        10.0f64..500.0,
        0.05f64..1.0,
        10.0f64..500.0,
        0.01f64..5.0,
        0.0f64..0.1,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_put_call_parity((s, v, k, t, r) in market()) {
        let call = price_call(s, v, k, t, r).unwrap();
        let put = price_put(s, v, k, t, r).unwrap();
        let parity = call - put - (s - k * (-r * t).exp());
        prop_assert!(parity.abs() < 1e-6 * s.max(k), "parity residual {}", parity);
    }

    #[test]
    fn test_prices_within_no_arbitrage_bounds((s, v, k, t, r) in market()) {
        let call = price_call(s, v, k, t, r).unwrap();
        let put = price_put(s, v, k, t, r).unwrap();
        let df = (-r * t).exp();
        let tol = 1e-6 * s.max(k);

        prop_assert!(call >= (s - k * df).max(0.0) - tol);
        prop_assert!(call <= s + tol);
        prop_assert!(put >= (k * df - s).max(0.0) - tol);
        prop_assert!(put <= k * df + tol);
    }

    #[test]
    fn test_call_increases_with_spot((s, v, k, t, r) in market()) {
        let lower = price_call(s, v, k, t, r).unwrap();
        let higher = price_call(s + 1.0, v, k, t, r).unwrap();
        prop_assert!(higher >= lower - 1e-6);
    }

    #[test]
    fn test_put_decreases_with_spot((s, v, k, t, r) in market()) {
        let lower = price_put(s, v, k, t, r).unwrap();
        let higher = price_put(s + 1.0, v, k, t, r).unwrap();
        prop_assert!(higher <= lower + 1e-6);
    }

    #[test]
    fn test_prices_increase_with_volatility((s, v, k, t, r) in market()) {
        prop_assert!(price_call(s, v + 0.05, k, t, r).unwrap() >= price_call(s, v, k, t, r).unwrap() - 1e-6);
        prop_assert!(price_put(s, v + 0.05, k, t, r).unwrap() >= price_put(s, v, k, t, r).unwrap() - 1e-6);
    }

    #[test]
    fn test_greek_ranges((s, v, k, t, r) in market()) {
        let call = call_greeks(s, v, k, t, r).unwrap();
        let put = put_greeks(s, v, k, t, r).unwrap();

        prop_assert!((0.0..=1.0).contains(&call.delta), "call delta {}", call.delta);
        prop_assert!((-1.0..=0.0).contains(&put.delta), "put delta {}", put.delta);
        prop_assert!(call.vega >= 0.0);
        prop_assert!(put.vega >= 0.0);
        prop_assert!(call.rho >= 0.0);
        prop_assert!(put.rho <= 0.0);
        // Non-dividend call always loses value with time
        prop_assert!(call.theta <= 0.0);
    }

    #[test]
    fn test_delta_call_put_relationship((s, v, k, t, r) in market()) {
        // Δc - Δp = 1, up to rounding of each to three decimals
        let call = call_greeks(s, v, k, t, r).unwrap();
        let put = put_greeks(s, v, k, t, r).unwrap();
        prop_assert!((call.delta - put.delta - 1.0).abs() <= 1.5e-3);
    }

    #[test]
    fn test_results_are_rounded((s, v, k, t, r) in market()) {
        let call = call_greeks(s, v, k, t, r).unwrap();
        for value in [call.price, call.delta, call.vega, call.theta, call.rho] {
            prop_assert_eq!((value * 1000.0).round() / 1000.0, value);
        }
    }
}
