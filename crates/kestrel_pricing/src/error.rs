//! Pricing error types.

use kestrel_core::market_data::MarketDataError;
use thiserror::Error;

/// Errors raised by the valuation engines.
///
/// Missing or empty market data is fatal at this level: without a curve
/// the lattice cannot calibrate and cashflows cannot be discounted. The
/// risk engine distinguishes these from the recoverable "curve not
/// applicable" condition, which never reaches the pricer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Market data lookup failed (curve absent or empty).
    #[error(transparent)]
    Market(#[from] MarketDataError),

    /// A lattice instrument is missing a market-data binding.
    #[error("Instrument '{id}' has no {binding} binding required for lattice pricing")]
    MissingBinding {
        /// Instrument identifier
        id: String,
        /// Which binding is missing ("underlying", "rate curve", "vol curve")
        binding: &'static str,
    },

    /// Spot price for the underlying is negative.
    #[error("Negative spot price {spot} for lattice pricing")]
    NegativeSpot {
        /// The offending spot
        spot: f64,
    },

    /// Closed-form model parameter out of range.
    #[error("Invalid {name} for closed-form pricing: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
    },
}
