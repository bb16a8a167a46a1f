//! Forward-mode gradient driver.
//!
//! [`value_and_grad`] seeds one derivative direction per requested input of
//! a [`DualVector`] and evaluates the function once. The value and every
//! partial come out of that single pass.

use nalgebra::{Const, SVector, U1};
use num_dual::Derivative;

use crate::types::DualVector;

/// Forward value and partial derivatives from one combined evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAndGrad<const M: usize> {
    /// Function value at the evaluation point.
    pub value: f64,
    /// Partial derivatives, in the order the inputs were requested.
    pub grad: [f64; M],
}

/// Evaluates `f` at `point` and differentiates it with respect to the
/// inputs listed in `wrt`.
///
/// `f` is called exactly once. Inputs not listed in `wrt` are held constant.
/// An index listed twice gets the same partial in both slots.
///
/// # Panics
/// In debug builds, if an index in `wrt` is `>= N`. Release builds report a
/// zero partial for such an index.
///
/// # Examples
/// ```
/// use pricer_core::math::value_and_grad;
/// use pricer_core::types::DualVector;
///
/// // f(x, y, z) = x * y + z, differentiate w.r.t. x and z
/// let f = |[x, y, z]: [DualVector<2>; 3]| x * y + z;
/// let out = value_and_grad(f, [2.0, 3.0, 1.0], [0, 2]);
///
/// assert_eq!(out.value, 7.0);
/// assert_eq!(out.grad, [3.0, 1.0]);
/// ```
pub fn value_and_grad<F, const N: usize, const M: usize>(
    f: F,
    point: [f64; N],
    wrt: [usize; M],
) -> ValueAndGrad<M>
where
    F: FnOnce([DualVector<M>; N]) -> DualVector<M>,
{
    debug_assert!(
        wrt.iter().all(|&input| input < N),
        "input index out of range for {} inputs: {:?}",
        N,
        wrt
    );

    let inputs: [DualVector<M>; N] = std::array::from_fn(|j| {
        if wrt.contains(&j) {
            let seed =
                SVector::<f64, M>::from_fn(|slot, _| if wrt[slot] == j { 1.0 } else { 0.0 });
            DualVector::new(point[j], Derivative::some(seed))
        } else {
            DualVector::from_re(point[j])
        }
    });

    let out = f(inputs);
    let grad = out.eps.unwrap_generic(Const::<M>, U1);

    ValueAndGrad {
        value: out.re,
        grad: std::array::from_fn(|slot| grad[slot]),
    }
}
