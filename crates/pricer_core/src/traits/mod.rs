//! Core traits for AD-compatible numeric code.
//!
//! Pricing formulas are written once, generic over [`Scalar`], and evaluated
//! either with plain `f64` or with [`DualNumber`](crate::types::dual::DualNumber)
//! to obtain exact first derivatives.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Numeric type a pricing formula can be evaluated with.
///
/// `num_traits::Float` is too wide for dual numbers, so this trait lists only
/// the operations the closed-form formulas need: field arithmetic, `ln`,
/// `exp`, `sqrt`, and [`Scalar::chain`] for elementary functions whose value
/// and derivative are computed in `f64` (the normal CDF, for instance).
///
/// # Examples
/// ```
/// use pricer_core::traits::Scalar;
///
/// fn discount<T: Scalar>(rate: T, time: T) -> T {
///     (-(rate * time)).exp()
/// }
///
/// let df: f64 = discount(0.05, 1.0);
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
pub trait Scalar:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lifts a constant into the scalar type (zero derivative).
    fn from_f64(value: f64) -> Self;

    /// Returns the real part.
    fn value(&self) -> f64;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Exponential.
    fn exp(self) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Applies a unary function given its value `f` and derivative `df`
    /// at [`Scalar::value`].
    fn chain(self, f: f64, df: f64) -> Self;
}

impl Scalar for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }

    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }

    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn chain(self, f: f64, _df: f64) -> Self {
        f
    }
}
