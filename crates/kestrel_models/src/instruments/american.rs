//! American vanilla option.

use kestrel_core::types::Date;

use super::error::InstrumentError;
use super::payoff::OptionType;
use super::traits::{Instrument, TreeProduct};

/// An American option on a spot underlying, valued on the lattice.
///
/// Exercisable at any node: the node value is the greater of the
/// intrinsic payoff and the continuation value, which is the only place
/// American and European valuation differ.
#[derive(Debug, Clone)]
pub struct AmericanOption {
    id: String,
    option_type: OptionType,
    strike: f64,
    expiry: Date,
    underlying: String,
    rate_curve: String,
    vol_curve: String,
}

impl AmericanOption {
    /// Creates an American option.
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

impl Instrument for AmericanOption {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "AmericanOption"
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

impl TreeProduct for AmericanOption {
    fn expiry(&self) -> Date {
        self.expiry
    }

    fn value_at_node(&self, spot: f64, _t: f64, continuation: f64) -> f64 {
        self.payoff(spot).max(continuation)
    }
}
