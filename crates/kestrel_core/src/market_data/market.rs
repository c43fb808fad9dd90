//! The market snapshot.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use super::curve::{RateCurve, VolCurve};
use super::error::MarketDataError;
use crate::types::Date;

/// A value-typed snapshot of market data as of one valuation date.
///
/// Holds named rate curves, named volatility curves, spot prices and
/// quoted bond prices. The snapshot is built once per valuation run and
/// read-only during pricing; risk computations work on clones.
///
/// # Copy semantics
///
/// `Clone` performs a deep copy of every curve and price map. After
/// cloning there is no aliasing with the source, so shocking a clone can
/// never perturb the original. The finite-difference risk engine depends
/// on this invariant.
///
/// # Examples
///
/// ```
/// use kestrel_core::market_data::{Market, RateCurve};
/// use kestrel_core::types::Date;
///
/// let as_of = Date::from_ymd(2024, 6, 3).unwrap();
/// let mut market = Market::new(as_of);
///
/// let mut curve = RateCurve::new("USD-SOFR");
/// curve.add_rate(Date::from_ymd(2025, 6, 3).unwrap(), 0.04);
/// market.add_curve("USD-SOFR", curve);
/// market.add_spot_price("AAPL", 185.0);
///
/// assert!(market.curve("USD-SOFR").is_some());
/// assert_eq!(market.spot_price("AAPL"), 185.0);
///
/// // A clone is fully isolated from the source
/// let clone = market.clone();
/// drop(clone);
/// assert!(market.curve("USD-SOFR").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    as_of: Date,
    curves: BTreeMap<String, RateCurve>,
    vol_curves: BTreeMap<String, VolCurve>,
    spot_prices: BTreeMap<String, f64>,
    bond_prices: BTreeMap<String, f64>,
}

impl Market {
    /// Creates an empty snapshot for the given valuation date.
    pub fn new(as_of: Date) -> Self {
        Self {
            as_of,
            curves: BTreeMap::new(),
            vol_curves: BTreeMap::new(),
            spot_prices: BTreeMap::new(),
            bond_prices: BTreeMap::new(),
        }
    }

    /// The valuation date.
    #[inline]
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Adds or replaces a rate curve under `name`.
    pub fn add_curve(&mut self, name: impl Into<String>, curve: RateCurve) {
        self.curves.insert(name.into(), curve);
    }

    /// Adds or replaces a volatility curve under `name`.
    pub fn add_vol_curve(&mut self, name: impl Into<String>, curve: VolCurve) {
        self.vol_curves.insert(name.into(), curve);
    }

    /// Adds or replaces a spot price.
    pub fn add_spot_price(&mut self, name: impl Into<String>, price: f64) {
        self.spot_prices.insert(name.into(), price);
    }

    /// Adds or replaces a quoted bond price.
    pub fn add_bond_price(&mut self, name: impl Into<String>, price: f64) {
        self.bond_prices.insert(name.into(), price);
    }

    /// Shared read-only handle to the named rate curve.
    #[inline]
    pub fn curve(&self, name: &str) -> Option<&RateCurve> {
        self.curves.get(name)
    }

    /// Shared read-only handle to the named volatility curve.
    #[inline]
    pub fn vol_curve(&self, name: &str) -> Option<&VolCurve> {
        self.vol_curves.get(name)
    }

    /// The named rate curve, or a hard error when pricing cannot proceed
    /// without it.
    pub fn curve_or_err(&self, name: &str) -> Result<&RateCurve, MarketDataError> {
        self.curves
            .get(name)
            .ok_or_else(|| MarketDataError::CurveNotFound {
                name: name.to_string(),
            })
    }

    /// The named volatility curve, or a hard error.
    pub fn vol_curve_or_err(&self, name: &str) -> Result<&VolCurve, MarketDataError> {
        self.vol_curves
            .get(name)
            .ok_or_else(|| MarketDataError::VolCurveNotFound {
                name: name.to_string(),
            })
    }

    /// The spot price for `name`. Warns and returns 0.0 when absent.
    pub fn spot_price(&self, name: &str) -> f64 {
        match self.spot_prices.get(name) {
            Some(&price) => price,
            None => {
                warn!(instrument = %name, "spot price not found, returning 0.0");
                0.0
            }
        }
    }

    /// The quoted market price for a bond, when one was loaded.
    #[inline]
    pub fn bond_price(&self, name: &str) -> Option<f64> {
        self.bond_prices.get(name).copied()
    }

    /// Names of the rate curves in the snapshot.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    /// Names of the volatility curves in the snapshot.
    pub fn vol_curve_names(&self) -> impl Iterator<Item = &str> {
        self.vol_curves.keys().map(String::as_str)
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "market as of: {}", self.as_of)?;
        for curve in self.curves.values() {
            write!(f, "{}", curve)?;
        }
        for curve in self.vol_curves.values() {
            write!(f, "{}", curve)?;
        }
        if !self.spot_prices.is_empty() {
            writeln!(f, "spot prices:")?;
            for (name, price) in &self.spot_prices {
                writeln!(f, "  {}: {:.4}", name, price)?;
            }
        }
        if !self.bond_prices.is_empty() {
            writeln!(f, "bond prices:")?;
            for (name, price) in &self.bond_prices {
                writeln!(f, "  {}: {:.4}", name, price)?;
            }
        }
        Ok(())
    }
}
