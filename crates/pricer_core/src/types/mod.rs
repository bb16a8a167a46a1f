//! Core numeric and error types.
//!
//! This module provides:
//! - `dual`: Dual number type integration with num-dual for automatic differentiation
//! - `error`: Structured error type for pricing and volatility estimation
//!
//! # Re-exports
//!
//! - [`DualNumber`], [`DualVector`] from `dual`
//! - [`PricingError`] from `error`

pub mod dual;
pub mod error;

pub use dual::{DualNumber, DualVector};
pub use error::PricingError;
