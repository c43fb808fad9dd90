//! Market snapshot perturbation.
//!
//! Builds the paired up/down-shocked snapshots consumed by the
//! central-difference engine. Perturbation is a pure function over value
//! snapshots: both outputs are deep copies with exactly one named curve
//! bumped, and the input market is untouched.

use kestrel_core::market_data::Market;
use tracing::warn;

/// Specification of a parallel shock to one named curve.
///
/// `amount` is the absolute bump applied to every pillar (0.0001 = 1bp
/// for rate curves, 0.01 = 1 vol point for vol curves).
#[derive(Debug, Clone, PartialEq)]
pub struct CurveShock {
    /// Name of the curve to shock.
    pub curve_id: String,
    /// Absolute bump size.
    pub amount: f64,
}

impl CurveShock {
    /// Creates a shock specification.
    pub fn new(curve_id: impl Into<String>, amount: f64) -> Self {
        Self {
            curve_id: curve_id.into(),
            amount,
        }
    }
}

/// Builds `(up, down)` snapshots with the named rate curve shocked by
/// `+amount` / `-amount`.
///
/// All other curves, prices and the valuation date are identical to the
/// input. When the named curve does not exist the outputs are plain
/// copies and a warning is emitted; the resulting sensitivity is
/// numerically zero and the caller treats the condition as "not
/// applicable" rather than an error.
pub fn perturb_rate_curve(market: &Market, shock: &CurveShock) -> (Market, Market) {
    let mut up = market.clone();
    let mut down = market.clone();

    match market.curve(&shock.curve_id) {
        Some(curve) => {
            up.add_curve(&shock.curve_id, curve.shock(shock.amount));
            down.add_curve(&shock.curve_id, curve.shock(-shock.amount));
        }
        None => {
            warn!(
                curve = %shock.curve_id,
                "rate curve not found, perturbation is a no-op"
            );
        }
    }
    (up, down)
}

/// Builds `(up, down)` snapshots with the named vol curve shocked by
/// `+amount` / `-amount`. Mirrors [`perturb_rate_curve`].
pub fn perturb_vol_curve(market: &Market, shock: &CurveShock) -> (Market, Market) {
    let mut up = market.clone();
    let mut down = market.clone();

    match market.vol_curve(&shock.curve_id) {
        Some(curve) => {
            up.add_vol_curve(&shock.curve_id, curve.shock(shock.amount));
            down.add_vol_curve(&shock.curve_id, curve.shock(-shock.amount));
        }
        None => {
            warn!(
                curve = %shock.curve_id,
                "vol curve not found, perturbation is a no-op"
            );
        }
    }
    (up, down)
}
