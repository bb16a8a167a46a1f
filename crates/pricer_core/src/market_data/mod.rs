//! Market data consumed by the pricer.
//!
//! - `volatility`: Historical volatility estimated from daily closes, and the
//!   [`PriceHistorySource`](volatility::PriceHistorySource) seam through which
//!   callers supply those closes

pub mod volatility;

pub use volatility::{HistoricalVolatility, PriceHistorySource, StdDevConvention};
