//! Option instrument definitions.
//!
//! - [`OptionParameters`]: validated Black-Scholes inputs
//! - [`OptionParametersBuilder`]: parameters with volatility from history
//! - [`OptionType`]: call or put
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{OptionParameters, OptionType};
//!
//! let params = OptionParameters::from_market_units(100.0, 20.0, 100.0, 365.0, 5.0).unwrap();
//! assert_eq!(params.time_to_expiration(), 1.0);
//! assert_eq!(OptionType::Put.intrinsic(params.spot(), 110.0), 10.0);
//! ```

mod option_type;
pub mod params;

pub use option_type::{OptionType, ParseOptionTypeError};
pub use params::{OptionParameters, OptionParametersBuilder};
