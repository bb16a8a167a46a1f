//! Black-Scholes pricing for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The formulas are generic over [`Scalar`], so the same code prices with
//! `f64` and differentiates with dual numbers. Inputs are taken in
//! positional order (S, σ, K, T, r) and are assumed to come from validated
//! [`OptionParameters`]; there is no branching on the input values.

use pricer_core::traits::Scalar;

use super::distributions::norm_cdf;
use crate::instruments::{OptionParameters, OptionType};

/// Black-Scholes model evaluated at one parameter point.
///
/// # Type Parameters
/// * `T` - Scalar type (`f64` for prices, `GreeksDual` for sensitivities)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionParameters;
///
/// let params = OptionParameters::new(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();
/// let bs = BlackScholes::from_params(&params);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = bs.call() - bs.put() - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Scalar> {
    spot: T,
    volatility: T,
    strike: T,
    time_to_expiration: T,
    rate: T,
}

impl BlackScholes<f64> {
    /// Creates a model from validated parameters.
    pub fn from_params(params: &OptionParameters) -> Self {
        Self::from_array(params.to_array())
    }
}

impl<T: Scalar> BlackScholes<T> {
    /// Creates a model from positional inputs `[S, σ, K, T, r]`.
    ///
    /// No validation is performed.
    #[inline]
    pub fn from_array([spot, volatility, strike, time_to_expiration, rate]: [T; 5]) -> Self {
        Self {
            spot,
            volatility,
            strike,
            time_to_expiration,
            rate,
        }
    }

    /// σ√T
    #[inline]
    fn vol_sqrt_t(&self) -> T {
        self.volatility * self.time_to_expiration.sqrt()
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self) -> T {
        let half = T::from_f64(0.5);
        let drift = self.rate + half * self.volatility * self.volatility;
        ((self.spot / self.strike).ln() + drift * self.time_to_expiration) / self.vol_sqrt_t()
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self) -> T {
        self.d1() - self.vol_sqrt_t()
    }

    /// e^(-rT)
    #[inline]
    pub fn discount_factor(&self) -> T {
        (-(self.rate * self.time_to_expiration)).exp()
    }

    /// European call price.
    #[inline]
    pub fn call(&self) -> T {
        let d1 = self.d1();
        let d2 = d1 - self.vol_sqrt_t();
        self.spot * norm_cdf(d1) - self.strike * self.discount_factor() * norm_cdf(d2)
    }

    /// European put price.
    #[inline]
    pub fn put(&self) -> T {
        let d1 = self.d1();
        let d2 = d1 - self.vol_sqrt_t();
        self.strike * self.discount_factor() * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }

    /// Price of the given option type.
    #[inline]
    pub fn price(&self, option_type: OptionType) -> T {
        match option_type {
            OptionType::Call => self.call(),
            OptionType::Put => self.put(),
        }
    }
}

/// European call price from positional inputs `[S, σ, K, T, r]`.
///
/// This is the pricing function handed to the Greeks engine.
#[inline]
pub fn call_price<T: Scalar>(inputs: [T; 5]) -> T {
    BlackScholes::from_array(inputs).call()
}

/// European put price from positional inputs `[S, σ, K, T, r]`.
#[inline]
pub fn put_price<T: Scalar>(inputs: [T; 5]) -> T {
    BlackScholes::from_array(inputs).put()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::DualNumber;

    fn bs(s: f64, sigma: f64, k: f64, t: f64, r: f64) -> BlackScholes<f64> {
        BlackScholes::from_array([s, sigma, k, t, r])
    }

    // ==========================================================
    // d1 / d2
    // ==========================================================

    #[test]
    fn test_d1_atm() {
        // ATM: d1 = (r + σ²/2)√T / σ
        let model = bs(100.0, 0.2, 100.0, 1.0, 0.05);
        assert_relative_eq!(model.d1(), (0.05 + 0.02) / 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let model = bs(105.0, 0.3, 95.0, 0.75, 0.02);
        assert_relative_eq!(
            model.d1() - model.d2(),
            0.3 * 0.75_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_d1_sign_follows_moneyness() {
        assert!(bs(150.0, 0.2, 100.0, 0.1, 0.0).d1() > 0.0);
        assert!(bs(50.0, 0.2, 100.0, 0.1, 0.0).d1() < 0.0);
    }

    // ==========================================================
    // Prices
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        // S=100, K=100, r=5%, σ=20%, T=1
        let model = bs(100.0, 0.2, 100.0, 1.0, 0.05);
        assert_relative_eq!(model.call(), 10.450583572185565, epsilon = 1e-5);
    }

    #[test]
    fn test_put_price_reference_value() {
        let model = bs(100.0, 0.2, 100.0, 1.0, 0.05);
        assert_relative_eq!(model.put(), 5.573526022256971, epsilon = 1e-5);
    }

    #[test]
    fn test_reference_values_itm() {
        // S=300, K=250, r=3%, σ=15%, T=1
        let model = bs(300.0, 0.15, 250.0, 1.0, 0.03);
        assert_relative_eq!(model.call(), 58.8197, epsilon = 1e-3);
        assert_relative_eq!(model.put(), 1.4311, epsilon = 1e-3);
    }

    #[test]
    fn test_price_dispatch() {
        let model = bs(100.0, 0.2, 110.0, 0.5, 0.01);
        assert_eq!(model.price(OptionType::Call), model.call());
        assert_eq!(model.price(OptionType::Put), model.put());
    }

    #[test]
    fn test_positional_functions_match_model() {
        let inputs = [90.0, 0.25, 100.0, 0.5, 0.03];
        let model = BlackScholes::from_array(inputs);
        assert_eq!(call_price(inputs), model.call());
        assert_eq!(put_price(inputs), model.put());
    }

    #[test]
    fn test_near_expiry_approaches_intrinsic() {
        let t = 1e-8;
        assert_relative_eq!(bs(110.0, 0.2, 100.0, t, 0.05).call(), 10.0, epsilon = 1e-5);
        assert_relative_eq!(bs(90.0, 0.2, 100.0, t, 0.05).call(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(bs(90.0, 0.2, 100.0, t, 0.05).put(), 10.0, epsilon = 1e-5);
        assert_relative_eq!(bs(110.0, 0.2, 100.0, t, 0.05).put(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_deep_itm_call() {
        // ≈ S - K e^(-rT)
        let model = bs(200.0, 0.2, 100.0, 1.0, 0.05);
        let expected = 200.0 - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(model.call(), expected, epsilon = 0.01);
    }

    #[test]
    fn test_deep_otm_call() {
        let model = bs(50.0, 0.2, 100.0, 1.0, 0.05);
        assert!(model.call() < 0.01);
    }

    // ==========================================================
    // Put-call parity
    // ==========================================================

    #[test]
    fn test_put_call_parity_various_strikes() {
        let (s, sigma, t, r) = (100.0, 0.25, 0.5, 0.04);
        for k in [60.0, 80.0, 95.0, 105.0, 120.0, 150.0] {
            let model = bs(s, sigma, k, t, r);
            let parity = model.call() - model.put() - (s - k * model.discount_factor());
            assert!(parity.abs() < 1e-9, "parity violated at K = {}: {}", k, parity);
        }
    }

    #[test]
    fn test_put_call_parity_zero_rate() {
        let model = bs(100.0, 0.3, 90.0, 2.0, 0.0);
        assert_relative_eq!(model.call() - model.put(), 10.0, epsilon = 1e-9);
    }

    // ==========================================================
    // Dual evaluation
    // ==========================================================

    #[test]
    fn test_dual_value_matches_f64() {
        let inputs = [100.0, 0.2, 100.0, 1.0, 0.05];
        let dual = call_price(inputs.map(DualNumber::from));
        assert_eq!(dual.re, call_price(inputs));
        assert_eq!(dual.eps, 0.0);
    }

    #[test]
    fn test_dual_spot_derivative_is_n_d1() {
        let model = bs(100.0, 0.2, 100.0, 1.0, 0.05);
        let seeded = [
            DualNumber::new(100.0, 1.0),
            DualNumber::from(0.2),
            DualNumber::from(100.0),
            DualNumber::from(1.0),
            DualNumber::from(0.05),
        ];
        let delta = call_price(seeded).eps;
        assert_relative_eq!(delta, norm_cdf(model.d1()), epsilon = 1e-12);
    }
}
