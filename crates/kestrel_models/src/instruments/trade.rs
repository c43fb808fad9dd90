//! Enum dispatch over the instrument variants.

use kestrel_core::types::Date;

use super::american::AmericanOption;
use super::bond::Bond;
use super::european::EuropeanOption;
use super::swap::Swap;
use super::traits::Instrument;

/// A portfolio position: one of the supported instrument kinds.
///
/// Static enum dispatch (the pattern used for curve and model variants in
/// the pricing kernel) keeps pricing monomorphic; the pricing facade
/// matches on the variant to route cashflow instruments to direct PV and
/// option instruments to the lattice.
#[derive(Debug, Clone)]
pub enum Trade {
    /// Fixed-coupon bond.
    Bond(Bond),
    /// Fixed-for-floating interest rate swap.
    Swap(Swap),
    /// European option.
    European(EuropeanOption),
    /// American option.
    American(AmericanOption),
}

impl Trade {
    /// The underlying instrument viewed through the common capability
    /// contract.
    fn as_instrument(&self) -> &dyn Instrument {
        match self {
            Trade::Bond(b) => b,
            Trade::Swap(s) => s,
            Trade::European(o) => o,
            Trade::American(o) => o,
        }
    }

    /// Report identifier.
    pub fn id(&self) -> &str {
        self.as_instrument().id()
    }

    /// Instrument kind label.
    pub fn kind(&self) -> &'static str {
        self.as_instrument().kind()
    }

    /// Final maturity date.
    pub fn maturity_date(&self) -> Date {
        self.as_instrument().maturity_date()
    }

    /// Underlying name, when there is one.
    pub fn underlying_name(&self) -> Option<&str> {
        self.as_instrument().underlying_name()
    }

    /// Rate curve binding, when the instrument has rate sensitivity.
    pub fn rate_curve_name(&self) -> Option<&str> {
        self.as_instrument().rate_curve_name()
    }

    /// Vol curve binding, when the instrument has vol sensitivity.
    pub fn vol_curve_name(&self) -> Option<&str> {
        self.as_instrument().vol_curve_name()
    }

    /// Intrinsic payoff against a reference price.
    pub fn payoff(&self, reference_price: f64) -> f64 {
        self.as_instrument().payoff(reference_price)
    }
}

impl From<Bond> for Trade {
    fn from(bond: Bond) -> Self {
        Trade::Bond(bond)
    }
}

impl From<Swap> for Trade {
    fn from(swap: Swap) -> Self {
        Trade::Swap(swap)
    }
}

impl From<EuropeanOption> for Trade {
    fn from(option: EuropeanOption) -> Self {
        Trade::European(option)
    }
}

impl From<AmericanOption> for Trade {
    fn from(option: AmericanOption) -> Self {
        Trade::American(option)
    }
}
