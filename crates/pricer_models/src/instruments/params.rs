//! Option pricing parameters.
//!
//! [`OptionParameters`] is the validated five-tuple every pricing call takes.
//! It is built fresh for each evaluation and never mutated afterwards.
//! [`OptionParametersBuilder`] covers the case where volatility is not known
//! up front and must be estimated from an underlying's price history.

use pricer_core::market_data::{HistoricalVolatility, PriceHistorySource};
use pricer_core::types::PricingError;
use serde::Serialize;
use tracing::debug;

/// Calendar days per year, for converting days to expiration into years.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Percent-to-fraction divisor.
pub const PERCENT: f64 = 100.0;

/// Positional index of spot in [`OptionParameters::to_array`].
pub const SPOT: usize = 0;
/// Positional index of volatility in [`OptionParameters::to_array`].
pub const VOLATILITY: usize = 1;
/// Positional index of strike in [`OptionParameters::to_array`].
pub const STRIKE: usize = 2;
/// Positional index of time to expiration in [`OptionParameters::to_array`].
pub const TIME_TO_EXPIRATION: usize = 3;
/// Positional index of the risk-free rate in [`OptionParameters::to_array`].
pub const RISK_FREE_RATE: usize = 4;

fn require_positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            value,
            "must be a positive finite number",
        ))
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            value,
            "must be a non-negative finite number",
        ))
    }
}

/// Validated Black-Scholes inputs.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionParameters;
///
/// let params = OptionParameters::new(100.0, 0.2, 100.0, 1.0, 0.05).unwrap();
/// assert_eq!(params.spot(), 100.0);
/// assert_eq!(params.to_array(), [100.0, 0.2, 100.0, 1.0, 0.05]);
///
/// // Zero volatility is rejected before any formula runs
/// assert!(OptionParameters::new(100.0, 0.0, 100.0, 1.0, 0.05).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionParameters {
    spot: f64,
    volatility: f64,
    strike: f64,
    time_to_expiration: f64,
    risk_free_rate: f64,
}

impl OptionParameters {
    /// Creates parameters in positional order (spot, volatility, strike,
    /// time to expiration, rate).
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if spot, volatility, strike or time
    /// to expiration is not a positive finite number, or if the rate is
    /// negative or non-finite.
    pub fn new(
        spot: f64,
        volatility: f64,
        strike: f64,
        time_to_expiration: f64,
        risk_free_rate: f64,
    ) -> Result<Self, PricingError> {
        require_positive("spot", spot)?;
        require_positive("volatility", volatility)?;
        require_positive("strike", strike)?;
        require_positive("time_to_expiration", time_to_expiration)?;
        require_non_negative("risk_free_rate", risk_free_rate)?;

        Ok(Self {
            spot,
            volatility,
            strike,
            time_to_expiration,
            risk_free_rate,
        })
    }

    /// Creates parameters from quote-screen units: volatility and rate in
    /// percent, time to expiration in calendar days.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::OptionParameters;
    ///
    /// let params = OptionParameters::from_market_units(100.0, 20.0, 105.0, 73.0, 10.0).unwrap();
    /// assert_eq!(params.volatility(), 0.2);
    /// assert_eq!(params.time_to_expiration(), 0.2);
    /// assert_eq!(params.risk_free_rate(), 0.1);
    /// ```
    pub fn from_market_units(
        spot: f64,
        volatility_pct: f64,
        strike: f64,
        days_to_expiration: f64,
        rate_pct: f64,
    ) -> Result<Self, PricingError> {
        Self::new(
            spot,
            volatility_pct / PERCENT,
            strike,
            days_to_expiration / DAYS_PER_YEAR,
            rate_pct / PERCENT,
        )
    }

    /// Starts a builder for parameters whose volatility may come from history.
    pub fn builder(
        spot: f64,
        strike: f64,
        time_to_expiration: f64,
        risk_free_rate: f64,
    ) -> OptionParametersBuilder {
        OptionParametersBuilder::new(spot, strike, time_to_expiration, risk_free_rate)
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiration in years.
    #[inline]
    pub fn time_to_expiration(&self) -> f64 {
        self.time_to_expiration
    }

    /// Returns the continuously compounded risk-free rate.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Returns the inputs in positional order, indexed by [`SPOT`],
    /// [`VOLATILITY`], [`STRIKE`], [`TIME_TO_EXPIRATION`], [`RISK_FREE_RATE`].
    #[inline]
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.spot,
            self.volatility,
            self.strike,
            self.time_to_expiration,
            self.risk_free_rate,
        ]
    }
}

/// Builder for [`OptionParameters`] with an optional volatility source.
///
/// Either an explicit volatility or an underlying identifier must be given.
/// An explicit volatility always wins; otherwise the volatility is estimated
/// from the underlying's daily closes.
///
/// # Examples
/// ```
/// use pricer_core::market_data::PriceHistorySource;
/// use pricer_core::types::PricingError;
/// use pricer_models::instruments::OptionParameters;
///
/// struct Fixed;
/// impl PriceHistorySource for Fixed {
///     fn daily_closes(&self, _: &str) -> Result<Vec<f64>, PricingError> {
///         Ok(vec![100.0, 101.0, 100.5, 102.0])
///     }
/// }
///
/// let params = OptionParameters::builder(100.0, 100.0, 0.5, 0.03)
///     .underlying("ACME")
///     .build_with(&Fixed)
///     .unwrap();
/// assert!(params.volatility() > 0.0);
///
/// let err = OptionParameters::builder(100.0, 100.0, 0.5, 0.03).build().unwrap_err();
/// assert_eq!(err, PricingError::MissingVolatilityInput);
/// ```
#[derive(Debug, Clone)]
pub struct OptionParametersBuilder {
    spot: f64,
    strike: f64,
    time_to_expiration: f64,
    risk_free_rate: f64,
    volatility: Option<f64>,
    underlying: Option<String>,
    estimator: HistoricalVolatility,
}

impl OptionParametersBuilder {
    /// Creates a builder with the four inputs that are always required.
    pub fn new(spot: f64, strike: f64, time_to_expiration: f64, risk_free_rate: f64) -> Self {
        Self {
            spot,
            strike,
            time_to_expiration,
            risk_free_rate,
            volatility: None,
            underlying: None,
            estimator: HistoricalVolatility::default(),
        }
    }

    /// Sets an explicit annualised volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the underlying whose history is used when no volatility is given.
    pub fn underlying(mut self, underlying: impl Into<String>) -> Self {
        self.underlying = Some(underlying.into());
        self
    }

    /// Replaces the historical volatility estimator.
    pub fn estimator(mut self, estimator: HistoricalVolatility) -> Self {
        self.estimator = estimator;
        self
    }

    /// Builds the parameters from an explicit volatility only.
    ///
    /// # Errors
    /// - `PricingError::MissingVolatilityInput` if neither a volatility nor
    ///   an underlying was set
    /// - `PricingError::HistoryUnavailable` if only an underlying was set,
    ///   since there is no source to estimate from
    /// - `PricingError::InvalidParameter` for out-of-domain inputs
    pub fn build(self) -> Result<OptionParameters, PricingError> {
        match (self.volatility, self.underlying) {
            (Some(volatility), _) => OptionParameters::new(
                self.spot,
                volatility,
                self.strike,
                self.time_to_expiration,
                self.risk_free_rate,
            ),
            (None, Some(underlying)) => Err(PricingError::HistoryUnavailable {
                underlying,
                reason: "no price history source configured".to_string(),
            }),
            (None, None) => Err(PricingError::MissingVolatilityInput),
        }
    }

    /// Builds the parameters, estimating volatility from `source` when no
    /// explicit volatility was set.
    ///
    /// The other inputs are validated before the source is queried.
    pub fn build_with<S>(self, source: &S) -> Result<OptionParameters, PricingError>
    where
        S: PriceHistorySource + ?Sized,
    {
        if self.volatility.is_some() {
            return self.build();
        }
        let Some(underlying) = self.underlying.as_deref() else {
            return Err(PricingError::MissingVolatilityInput);
        };

        require_positive("spot", self.spot)?;
        require_positive("strike", self.strike)?;
        require_positive("time_to_expiration", self.time_to_expiration)?;
        require_non_negative("risk_free_rate", self.risk_free_rate)?;

        let volatility = self.estimator.estimate(source, underlying)?;
        debug!(underlying, volatility, "Volatility estimated from history");

        OptionParameters::new(
            self.spot,
            volatility,
            self.strike,
            self.time_to_expiration,
            self.risk_free_rate,
        )
    }
}
