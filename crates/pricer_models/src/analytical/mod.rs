//! Analytical pricing formulas for European options.
//!
//! - Black-Scholes model for lognormal dynamics
//! - Standard normal CDF and PDF
//!
//! ## Design Principles
//!
//! - **Generic over `T: Scalar`**: Supports `f64` and the dual number types for AD
//! - **AD Compatibility**: No branching on input values, so one code path
//!   serves pricing and differentiation

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::{call_price, put_price, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
