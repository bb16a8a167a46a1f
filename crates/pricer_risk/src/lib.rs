//! # Pricer Risk (L4: Application)
//!
//! Batch evaluation of many options with Rayon parallelisation.
//!
//! This crate provides:
//! - [`batch::BatchEvaluator`]: per-item prices and Greeks for a slice of
//!   options, in input order, with run statistics
//! - [`parallel`]: chunked Rayon helpers and their configuration
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! │  batch/     - BatchEvaluator, stats     │
//! │  parallel/  - Rayon utilities           │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Black-Scholes + AD Greeks              │
//! └─────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod batch;
pub mod parallel;

pub use batch::{BatchError, BatchEvaluator, BatchItem, BatchOutcome, BatchStats};
pub use parallel::ParallelConfig;
