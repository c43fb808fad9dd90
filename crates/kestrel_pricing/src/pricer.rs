//! Pricing facade.

use kestrel_core::market_data::Market;
use kestrel_models::instruments::Trade;

use crate::error::PricingError;
use crate::tree::CrrTreePricer;

/// Routes each instrument kind to its valuation strategy.
///
/// Cashflow instruments (bond, swap) discount their own schedules; option
/// instruments are valued on the binomial lattice. The risk engine prices
/// every bumped snapshot through this single entry point so repricing
/// covers every instrument kind uniformly.
///
/// # Examples
///
/// ```
/// use kestrel_core::market_data::{Market, RateCurve};
/// use kestrel_core::types::Date;
/// use kestrel_models::instruments::{Bond, Trade};
/// use kestrel_models::schedules::Frequency;
/// use kestrel_pricing::Pricer;
///
/// let as_of = Date::from_ymd(2024, 1, 1).unwrap();
/// let mut market = Market::new(as_of);
/// let mut curve = RateCurve::new("USD-SOFR");
/// curve.add_rate(Date::from_ymd(2026, 1, 1).unwrap(), 0.04);
/// market.add_curve("USD-SOFR", curve);
///
/// let bond = Bond::new(
///     "UST-2Y",
///     as_of,
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     100.0,
///     0.05,
///     Frequency::SemiAnnual,
///     "USD-SOFR",
/// )
/// .unwrap();
///
/// let pricer = Pricer::new(50);
/// let pv = pricer.price(&market, &Trade::Bond(bond)).unwrap();
/// assert!(pv > 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct Pricer {
    tree: CrrTreePricer,
}

impl Pricer {
    /// Creates a pricer whose lattice uses `steps` time steps.
    pub fn new(steps: usize) -> Self {
        Self {
            tree: CrrTreePricer::new(steps),
        }
    }

    /// The underlying lattice pricer.
    #[inline]
    pub fn tree(&self) -> &CrrTreePricer {
        &self.tree
    }

    /// Present value of a trade against the snapshot.
    pub fn price(&self, market: &Market, trade: &Trade) -> Result<f64, PricingError> {
        match trade {
            Trade::Bond(bond) => Ok(bond.pv(market)?),
            Trade::Swap(swap) => Ok(swap.pv(market)?),
            Trade::European(option) => self.tree.price(market, option),
            Trade::American(option) => self.tree.price(market, option),
        }
    }
}
