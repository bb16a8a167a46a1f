//! European option type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an option type string is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown option type '{0}' (expected 'call' or 'put')")]
pub struct ParseOptionTypeError(pub String);

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// let kind: OptionType = "put".parse().unwrap();
/// assert_eq!(kind, OptionType::Put);
/// assert_eq!(kind.label(), "put");
/// assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at the strike: payoff max(S - K, 0)
    Call,
    /// Right to sell at the strike: payoff max(K - S, 0)
    Put,
}

impl OptionType {
    /// Both option types, call first.
    pub const ALL: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    /// Lowercase label used as an output key prefix.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }

    /// Payoff at expiry for the given spot and strike.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OptionType {
    type Err = ParseOptionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(ParseOptionTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("PUT".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!(" c ".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert_eq!(err, ParseOptionTypeError("straddle".to_string()));
        assert!(err.to_string().contains("straddle"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in OptionType::ALL {
            assert_eq!(kind.to_string().parse::<OptionType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_intrinsic() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_is_call() {
        assert!(OptionType::Call.is_call());
        assert!(!OptionType::Put.is_call());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&OptionType::Put).unwrap();
        assert_eq!(json, "\"put\"");
        let parsed: OptionType = serde_json::from_str("\"call\"").unwrap();
        assert_eq!(parsed, OptionType::Call);
    }
}
