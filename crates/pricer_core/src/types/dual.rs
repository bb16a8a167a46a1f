//! Dual number type integration for automatic differentiation.
//!
//! This module provides type aliases for num-dual's `Dual64` and its
//! statically sized vector dual, and implements [`Scalar`] for both, so every
//! formula written against `Scalar` can be differentiated in forward mode.
//! [`DualVector`] carries several partials through a single evaluation.
//!
//! ## Usage
//!
//! ```
//! use pricer_core::traits::Scalar;
//! use pricer_core::types::dual::DualNumber;
//!
//! // d/dx (x * ln x) at x = 2 is ln 2 + 1
//! let x = DualNumber::new(2.0, 1.0);
//! let y = x * x.ln();
//!
//! assert!((y.re - 2.0 * 2.0_f64.ln()).abs() < 1e-12);
//! assert!((y.eps - (2.0_f64.ln() + 1.0)).abs() < 1e-12);
//! ```

use crate::traits::Scalar;

/// Type alias for num-dual's Dual64 (f64-based dual numbers).
///
/// - `re`: Real part (function value)
/// - `eps`: Dual part (derivative along the seeded direction)
pub type DualNumber = num_dual::Dual64;

/// Vector dual number with `M` derivative directions.
///
/// - `re`: Real part (function value)
/// - `eps`: Gradient along the `M` seeded directions
pub type DualVector<const M: usize> = num_dual::DualSVec64<M>;

mod elementary {
    use super::{DualNumber, DualVector};
    use num_dual::DualNum;

    #[inline]
    pub(super) fn ln(x: DualNumber) -> DualNumber {
        x.ln()
    }

    #[inline]
    pub(super) fn exp(x: DualNumber) -> DualNumber {
        x.exp()
    }

    #[inline]
    pub(super) fn sqrt(x: DualNumber) -> DualNumber {
        x.sqrt()
    }

    #[inline]
    pub(super) fn ln_vec<const M: usize>(x: DualVector<M>) -> DualVector<M> {
        x.ln()
    }

    #[inline]
    pub(super) fn exp_vec<const M: usize>(x: DualVector<M>) -> DualVector<M> {
        x.exp()
    }

    #[inline]
    pub(super) fn sqrt_vec<const M: usize>(x: DualVector<M>) -> DualVector<M> {
        x.sqrt()
    }
}

impl Scalar for DualNumber {
    #[inline]
    fn from_f64(value: f64) -> Self {
        DualNumber::from(value)
    }

    #[inline]
    fn value(&self) -> f64 {
        self.re
    }

    #[inline]
    fn ln(self) -> Self {
        elementary::ln(self)
    }

    #[inline]
    fn exp(self) -> Self {
        elementary::exp(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        elementary::sqrt(self)
    }

    #[inline]
    fn chain(self, f: f64, df: f64) -> Self {
        DualNumber::new(f, df * self.eps)
    }
}

impl<const M: usize> Scalar for DualVector<M> {
    #[inline]
    fn from_f64(value: f64) -> Self {
        Self::from_re(value)
    }

    #[inline]
    fn value(&self) -> f64 {
        self.re
    }

    #[inline]
    fn ln(self) -> Self {
        elementary::ln_vec(self)
    }

    #[inline]
    fn exp(self) -> Self {
        elementary::exp_vec(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        elementary::sqrt_vec(self)
    }

    #[inline]
    fn chain(self, f: f64, df: f64) -> Self {
        Self::new(f, self.eps * df)
    }
}
