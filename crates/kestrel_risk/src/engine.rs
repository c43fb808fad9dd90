//! Finite-difference sensitivity engine.

use std::collections::BTreeMap;

use kestrel_core::market_data::Market;
use kestrel_models::instruments::Trade;
use kestrel_pricing::{Pricer, PricingError};
use tracing::warn;

use crate::perturbation::{perturb_rate_curve, perturb_vol_curve, CurveShock};

/// Default rate curve bump: 1 basis point.
pub const DEFAULT_CURVE_BUMP: f64 = 0.0001;

/// Default vol curve bump: 1 vol point.
pub const DEFAULT_VOL_BUMP: f64 = 0.01;

/// Sensitivities keyed by the curve that was bumped.
pub type SensitivityMap = BTreeMap<String, f64>;

/// Central-difference sensitivity engine.
///
/// For each risk factor the engine perturbs the instrument's named curve
/// by the configured bump in both directions, reprices under both
/// snapshots with the supplied pricer, and reports
/// `(PV_up - PV_down) / 2`. The central difference cancels the
/// first-order bias of a one-sided bump and halves its truncation error,
/// at the cost of two full repricings per factor.
///
/// An instrument that exposes no curve binding gets an EMPTY result
/// ("sensitivity not applicable"), not a zero entry; a binding to a curve
/// the market does not carry also yields an empty result, with a warning.
///
/// # Examples
///
/// ```
/// use kestrel_risk::RiskEngine;
///
/// let engine = RiskEngine::default();
/// assert_eq!(engine.curve_bump(), 0.0001);
/// assert_eq!(engine.vol_bump(), 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct RiskEngine {
    curve_bump: f64,
    vol_bump: f64,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CURVE_BUMP, DEFAULT_VOL_BUMP)
    }
}

impl RiskEngine {
    /// Creates an engine with explicit bump sizes.
    pub fn new(curve_bump: f64, vol_bump: f64) -> Self {
        Self {
            curve_bump,
            vol_bump,
        }
    }

    /// Configured rate curve bump.
    #[inline]
    pub fn curve_bump(&self) -> f64 {
        self.curve_bump
    }

    /// Configured vol curve bump.
    #[inline]
    pub fn vol_bump(&self) -> f64 {
        self.vol_bump
    }

    /// DV01: central-difference sensitivity of PV to a parallel shift of
    /// the trade's rate curve, keyed by curve name.
    ///
    /// The base market is never mutated; both repricings run against
    /// independent deep copies. Pricing failures under the bumped
    /// snapshots propagate.
    pub fn dv01(
        &self,
        trade: &Trade,
        market: &Market,
        pricer: &Pricer,
    ) -> Result<SensitivityMap, PricingError> {
        let mut results = SensitivityMap::new();

        let curve_name = match trade.rate_curve_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Ok(results),
        };

        if market.curve(&curve_name).is_none() {
            warn!(
                trade = trade.id(),
                curve = %curve_name,
                "rate curve not in market, skipping DV01"
            );
            return Ok(results);
        }

        let shock = CurveShock::new(&curve_name, self.curve_bump);
        let (up, down) = perturb_rate_curve(market, &shock);

        let pv_up = pricer.price(&up, trade)?;
        let pv_down = pricer.price(&down, trade)?;

        results.insert(curve_name, (pv_up - pv_down) / 2.0);
        Ok(results)
    }

    /// Vega: central-difference sensitivity of PV to a parallel shift of
    /// the trade's vol curve, keyed by curve name. Mirrors
    /// [`RiskEngine::dv01`].
    pub fn vega(
        &self,
        trade: &Trade,
        market: &Market,
        pricer: &Pricer,
    ) -> Result<SensitivityMap, PricingError> {
        let mut results = SensitivityMap::new();

        let curve_name = match trade.vol_curve_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Ok(results),
        };

        if market.vol_curve(&curve_name).is_none() {
            warn!(
                trade = trade.id(),
                curve = %curve_name,
                "vol curve not in market, skipping vega"
            );
            return Ok(results);
        }

        let shock = CurveShock::new(&curve_name, self.vol_bump);
        let (up, down) = perturb_vol_curve(market, &shock);

        let pv_up = pricer.price(&up, trade)?;
        let pv_down = pricer.price(&down, trade)?;

        results.insert(curve_name, (pv_up - pv_down) / 2.0);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::market_data::{RateCurve, VolCurve};
    use kestrel_core::types::Date;
    use kestrel_models::instruments::{
        AmericanOption, Bond, EuropeanOption, OptionType, Swap,
    };
    use kestrel_models::schedules::Frequency;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn full_market() -> Market {
        let mut market = Market::new(date(2024, 1, 1));
        let mut curve = RateCurve::new("USD-SOFR");
        curve.add_rate(date(2025, 1, 1), 0.04);
        curve.add_rate(date(2030, 1, 1), 0.045);
        market.add_curve("USD-SOFR", curve);
        let mut vols = VolCurve::new("EQ-VOL");
        vols.add_vol(date(2025, 1, 1), 0.2);
        market.add_vol_curve("EQ-VOL", vols);
        market.add_spot_price("AAPL", 100.0);
        market
    }

    fn receiver_swap() -> Trade {
        Trade::Swap(
            Swap::new(
                "IRS-2Y",
                date(2024, 1, 1),
                date(2026, 1, 1),
                1_000_000.0,
                0.05,
                Frequency::SemiAnnual,
                "USD-SOFR",
                "USD-SOFR",
            )
            .unwrap(),
        )
    }

    fn bond_trade() -> Trade {
        Trade::Bond(
            Bond::new(
                "UST-2Y",
                date(2024, 1, 1),
                date(2026, 1, 1),
                100.0,
                0.05,
                Frequency::SemiAnnual,
                "USD-SOFR",
            )
            .unwrap(),
        )
    }

    fn call_trade() -> Trade {
        Trade::European(
            EuropeanOption::new(
                "EC",
                OptionType::Call,
                100.0,
                date(2025, 1, 1),
                "AAPL",
                "USD-SOFR",
                "EQ-VOL",
            )
            .unwrap(),
        )
    }

    // ========================================
    // DV01
    // ========================================

    #[test]
    fn test_dv01_sign_for_receiver() {
        // Receive fixed: rates up means PV down, so the central
        // difference is negative.
        let engine = RiskEngine::default();
        let pricer = Pricer::new(50);
        let market = full_market();

        let dv01 = engine.dv01(&receiver_swap(), &market, &pricer).unwrap();
        let value = dv01["USD-SOFR"];
        assert!(value < 0.0, "receiver DV01 should be negative, got {}", value);
    }

    #[test]
    fn test_dv01_sign_for_bond_holder() {
        let engine = RiskEngine::default();
        let pricer = Pricer::new(50);
        let market = full_market();

        let dv01 = engine.dv01(&bond_trade(), &market, &pricer).unwrap();
        assert!(dv01["USD-SOFR"] < 0.0);
    }

    #[test]
    fn test_dv01_matches_manual_central_difference() {
        let engine = RiskEngine::default();
        let pricer = Pricer::new(50);
        let market = full_market();
        let trade = bond_trade();

        let shock = CurveShock::new("USD-SOFR", DEFAULT_CURVE_BUMP);
        let (up, down) = perturb_rate_curve(&market, &shock);
        let expected =
            (pricer.price(&up, &trade).unwrap() - pricer.price(&down, &trade).unwrap()) / 2.0;

        let dv01 = engine.dv01(&trade, &market, &pricer).unwrap();
        assert_eq!(dv01["USD-SOFR"], expected);
    }

    #[test]
    fn test_dv01_missing_curve_is_empty_not_error() {
        let engine = RiskEngine::default();
        let pricer = Pricer::new(50);
        // Market without the swap's discount curve.
        let market = Market::new(date(2024, 1, 1));

        let dv01 = engine.dv01(&receiver_swap(), &market, &pricer).unwrap();
        assert!(dv01.is_empty());
    }

    #[test]
    fn test_base_market_unchanged_by_risk_run() {
        let engine = RiskEngine::default();
        let pricer = Pricer::new(50);
        let market = full_market();
        let before = market.clone();

        let _ = engine.dv01(&receiver_swap(), &market, &pricer).unwrap();
        let _ = engine.vega(&call_trade(), &market, &pricer).unwrap();
        assert_eq!(market, before);
    }

    // ========================================
    // Vega
    // ========================================

    #[test]
    fn test_vega_positive_for_long_option() {
        let engine = RiskEngine::default();
        let pricer = Pricer::new(50);
        let market = full_market();

        let vega = engine.vega(&call_trade(), &market, &pricer).unwrap();
        assert!(vega["EQ-VOL"] > 0.0);
    }

    #[test]
    fn test_vega_not_applicable_for_swap() {
        // Swaps expose no vol curve: the result is absent, not zero.
        let engine = RiskEngine::default();
        let pricer = Pricer::new(50);
        let market = full_market();

        let vega = engine.vega(&receiver_swap(), &market, &pricer).unwrap();
        assert!(vega.is_empty());
    }

    #[test]
    fn test_vega_for_american_option() {
        let engine = RiskEngine::default();
        let pricer = Pricer::new(50);
        let market = full_market();

        let trade = Trade::American(
            AmericanOption::new(
                "AP",
                OptionType::Put,
                100.0,
                date(2025, 1, 1),
                "AAPL",
                "USD-SOFR",
                "EQ-VOL",
            )
            .unwrap(),
        );
        let vega = engine.vega(&trade, &market, &pricer).unwrap();
        assert!(vega["EQ-VOL"] > 0.0);
    }
}
