//! Standard normal distribution functions.
//!
//! This module provides AD-compatible implementations of:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! Both are generic over [`Scalar`]. The CDF value is computed in `f64` and
//! its derivative is the exact density, applied through [`Scalar::chain`];
//! the dual part therefore does not inherit the error of the erfc
//! approximation.

use pricer_core::traits::Scalar;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function approximation using Horner's method.
///
/// Abramowitz and Stegun formula 7.1.26, maximum error 1.5e-7. Negative
/// arguments use erfc(-x) = 2 - erfc(x), so Φ(x) + Φ(-x) = 1 holds to
/// rounding error for every x except 0.
#[inline]
fn erfc_approx(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let abs_x = x.abs();
    let t = 1.0 / (1.0 + P * abs_x);
    let poly = A1 + t * (A2 + t * (A3 + t * (A4 + t * A5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    if x < 0.0 {
        2.0 - erfc_abs
    } else {
        erfc_abs
    }
}

#[inline]
fn cdf_f64(x: f64) -> f64 {
    0.5 * erfc_approx(-x / SQRT_2)
}

#[inline]
fn pdf_f64(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution function Φ(x).
///
/// Accurate to about 1e-7. The derivative carried by dual inputs is φ(x).
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Scalar>(x: T) -> T {
    let v = x.value();
    x.chain(cdf_f64(v), pdf_f64(v))
}

/// Standard normal probability density function φ(x) = exp(-x²/2) / sqrt(2π).
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Scalar>(x: T) -> T {
    let half = T::from_f64(0.5);
    T::from_f64(FRAC_1_SQRT_2PI) * (-(half * x * x)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::DualNumber;

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(3.0_f64), 0.9986501019683699, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_bounds() {
        for i in -100..=100 {
            let x = i as f64 * 0.1;
            let result = norm_cdf(x);
            assert!((0.0..=1.0).contains(&result), "CDF out of [0, 1] at x = {}", x);
        }
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let values: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for w in values.windows(2) {
            assert!(norm_cdf(w[1]) > norm_cdf(w[0]), "not monotonic at x = {}", w[0]);
        }
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(2.0_f64), 0.05399096651318806, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_cdf_dual_derivative_is_pdf() {
        for x in [-2.0, -0.3, 0.0, 0.8, 2.5] {
            let y = norm_cdf(DualNumber::new(x, 1.0));
            assert_relative_eq!(y.re, norm_cdf(x), epsilon = 1e-15);
            assert_relative_eq!(y.eps, norm_pdf(x), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_pdf_dual_derivative() {
        // φ'(x) = -x φ(x)
        let x = 0.7;
        let y = norm_pdf(DualNumber::new(x, 1.0));
        assert_relative_eq!(y.eps, -x * norm_pdf(x), epsilon = 1e-14);
    }

    #[test]
    fn test_cdf_pdf_relationship() {
        let h = 1e-4;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numerical = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical, norm_pdf(x), epsilon = 1e-4);
        }
    }
}
