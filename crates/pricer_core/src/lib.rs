//! # pricer_core: Numerical Foundation for the Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - The [`Scalar`](traits::Scalar) trait pricing formulas are written against
//! - Dual number integration and a single-pass forward-mode gradient driver (`types::dual`, `math::ad`)
//! - The error taxonomy shared by every layer (`types::error`)
//! - Historical volatility estimation from daily closes (`market_data::volatility`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::HistoricalVolatility;
//! use pricer_core::math::value_and_grad;
//! use pricer_core::traits::Scalar;
//! use pricer_core::types::DualVector;
//!
//! // Value and derivative of x * exp(x) at x = 1
//! let out = value_and_grad(|[x]: [DualVector<1>; 1]| x * x.exp(), [1.0], [0]);
//! assert!((out.value - std::f64::consts::E).abs() < 1e-12);
//! assert!((out.grad[0] - 2.0 * std::f64::consts::E).abs() < 1e-12);
//!
//! // Annualised volatility from two closes
//! let vol = HistoricalVolatility::new().annualised(&[100.0, 101.0]).unwrap();
//! assert!(vol > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod traits;
pub mod types;
