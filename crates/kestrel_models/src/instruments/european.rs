//! European vanilla option.

use kestrel_core::types::Date;

use super::error::InstrumentError;
use super::payoff::OptionType;
use super::traits::{Instrument, TreeProduct};

/// A European option on a spot underlying, valued on the lattice.
///
/// Exercise only at expiry: the node value is always the continuation
/// value, so the lattice reduces to discounted expectation of the
/// terminal payoff.
///
/// # Examples
///
/// ```
/// use kestrel_core::types::Date;
/// use kestrel_models::instruments::{EuropeanOption, Instrument, OptionType, TreeProduct};
///
/// let option = EuropeanOption::new(
///     "EC-1",
///     OptionType::Call,
///     100.0,
///     Date::from_ymd(2025, 6, 1).unwrap(),
///     "AAPL",
///     "USD-SOFR",
///     "EQ-VOL",
/// )
/// .unwrap();
///
/// assert_eq!(option.payoff(110.0), 10.0);
/// // European: node value is the continuation, exercise is ignored
/// assert_eq!(option.value_at_node(150.0, 0.5, 7.0), 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct EuropeanOption {
    id: String,
    option_type: OptionType,
    strike: f64,
    expiry: Date,
    underlying: String,
    rate_curve: String,
    vol_curve: String,
}

impl EuropeanOption {
    /// Creates a European option.
    ///
    /// # Errors
    ///
    /// * `InstrumentError::InvalidStrike` - `strike <= 0`
    pub fn new(
        id: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        expiry: Date,
        underlying: impl Into<String>,
        rate_curve: impl Into<String>,
        vol_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        if strike <= 0.0 {
            return Err(InstrumentError::InvalidStrike { value: strike });
        }
        Ok(Self {
            id: id.into(),
            option_type,
            strike,
            expiry,
            underlying: underlying.into(),
            rate_curve: rate_curve.into(),
            vol_curve: vol_curve.into(),
        })
    }

    /// The option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// The strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }
}

impl Instrument for EuropeanOption {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "EuropeanOption"
    }

    fn payoff(&self, reference_price: f64) -> f64 {
        self.option_type.intrinsic(self.strike, reference_price)
    }

    fn maturity_date(&self) -> Date {
        self.expiry
    }

    fn underlying_name(&self) -> Option<&str> {
        Some(&self.underlying)
    }

    fn rate_curve_name(&self) -> Option<&str> {
        Some(&self.rate_curve)
    }

    fn vol_curve_name(&self) -> Option<&str> {
        Some(&self.vol_curve)
    }
}

impl TreeProduct for EuropeanOption {
    fn expiry(&self) -> Date {
        self.expiry
    }

    fn value_at_node(&self, _spot: f64, _t: f64, continuation: f64) -> f64 {
        continuation
    }
}
