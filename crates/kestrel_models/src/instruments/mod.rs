//! Instrument definitions and the valuation capability contract.

mod american;
mod bond;
mod error;
mod european;
mod payoff;
mod swap;
mod trade;
mod traits;

pub use american::AmericanOption;
pub use bond::Bond;
pub use error::InstrumentError;
pub use european::EuropeanOption;
pub use payoff::OptionType;
pub use swap::Swap;
pub use trade::Trade;
pub use traits::{Instrument, TreeProduct};
