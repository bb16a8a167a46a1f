//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands return the
//! rendered output; `main` prints it.

pub mod batch;
pub mod price;
pub mod vol;
