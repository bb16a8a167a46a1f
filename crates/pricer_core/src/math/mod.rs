//! Numerical helpers.
//!
//! - `ad`: Forward-mode gradient driver over [`DualVector`](crate::types::DualVector)
//! - [`round_to`]: Half-away-from-zero rounding to a fixed number of decimals

pub mod ad;

pub use ad::{value_and_grad, ValueAndGrad};

/// Rounds `x` to `decimals` places, half away from zero.
///
/// Negative zero is normalised to `0.0` so that a tiny negative sensitivity
/// does not print as `-0`.
///
/// # Examples
/// ```
/// use pricer_core::math::round_to;
///
/// assert_eq!(round_to(10.45058, 3), 10.451);
/// assert_eq!(round_to(-0.36317, 3), -0.363);
/// assert_eq!(round_to(-0.0001, 3).to_string(), "0");
/// ```
#[inline]
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (x * factor).round() / factor + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_three_decimals() {
        assert_eq!(round_to(5.57352, 3), 5.574);
        assert_eq!(round_to(0.63683, 3), 0.637);
    }

    #[test]
    fn test_round_to_zero_decimals() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn test_round_to_negative_zero_normalised() {
        let r = round_to(-0.0004, 3);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn test_round_to_passes_nan_through() {
        assert!(round_to(f64::NAN, 3).is_nan());
    }
}
