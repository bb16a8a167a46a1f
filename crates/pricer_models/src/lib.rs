//! # Pricer Models (L2: Business Logic)
//!
//! European option pricing under Black-Scholes, with Greeks from forward-mode
//! automatic differentiation.
//!
//! This crate provides:
//! - Validated option parameters and a builder that estimates volatility
//!   from price history ([`instruments`])
//! - Black-Scholes formulas generic over the scalar type ([`analytical`])
//! - A Greeks engine that differentiates any positional pricing function
//!   ([`greeks`])
//! - Validating entry points for prices and Greeks ([`engine`])
//!
//! ## Quick Start
//!
//! ```
//! use pricer_models::engine::{call_greeks, put_greeks};
//!
//! let call = call_greeks(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();
//! let put = put_greeks(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();
//!
//! assert_eq!(call.delta, 0.637);
//! assert_eq!(put.delta, -0.363);
//! assert!(call.theta < 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod engine;
pub mod greeks;
pub mod instruments;
