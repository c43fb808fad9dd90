//! Cox-Ross-Rubinstein binomial lattice pricer.
//!
//! References: Hull Ch. 13, Cox-Ross-Rubinstein (1979).
//!
//! One pricing call runs SETUP (calibrate tree parameters from curve
//! data), FORWARD-INIT (terminal payoffs), BACKWARD-INDUCTION (apply the
//! instrument's node-value rule at every node) and returns the root
//! value. The pricer carries no per-call state: every derived quantity
//! lives in a [`TreeParams`] value threaded through the calculation.

use kestrel_core::market_data::{Market, MarketDataError};
use kestrel_core::types::DayCount;
use kestrel_models::instruments::TreeProduct;
use tracing::warn;

use crate::error::PricingError;

/// Year-fraction tolerance: below this an option is at expiry.
const EXPIRY_TOL: f64 = 1e-9;

/// Volatilities below this collapse the tree to a deterministic forward.
const SIGMA_EPS: f64 = 1e-9;

/// Probability excursions beyond this are reported before clamping.
const PROB_TOL: f64 = 1e-6;

/// Per-call CRR tree parameters.
///
/// Computed once in setup and threaded explicitly through forward
/// initialization and backward induction; nothing is cached on the
/// pricer, so pricing is re-entrant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    /// Time step in years.
    pub dt: f64,
    /// Up factor `exp(sigma * sqrt(dt))`.
    pub u: f64,
    /// Down factor `1 / u`.
    pub d: f64,
    /// Risk-neutral probability of an up move, clamped into [0, 1].
    pub p_up: f64,
    /// `1 - p_up`.
    pub p_down: f64,
    /// Discount factor per step `exp(-r * dt)`.
    pub df_step: f64,
}

/// Binomial lattice pricer with CRR parameterization.
///
/// The pricer is exercise-style-agnostic: early exercise lives entirely
/// in the instrument's [`TreeProduct::value_at_node`] rule.
///
/// # Failure semantics
///
/// - already-expired product: intrinsic payoff at the current spot, not
///   an error
/// - zero steps or zero time-to-expiry: intrinsic payoff at spot
/// - missing or empty required curve: [`PricingError`], fatal for this
///   instrument
#[derive(Debug, Clone)]
pub struct CrrTreePricer {
    steps: usize,
}

impl CrrTreePricer {
    /// Creates a pricer with the given number of time steps.
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Calibrates per-call tree parameters from rate, volatility and
    /// time to expiry. Requires `steps > 0` and `t > 0`.
    ///
    /// Degenerate volatility collapses the tree (`u = d = 1`); the
    /// probability is then fixed by the limiting convention: 0.5 when the
    /// drift is also degenerate, else 1 for non-negative drift and 0
    /// otherwise.
    fn setup(&self, r: f64, sigma: f64, t: f64) -> TreeParams {
        let dt = t / self.steps as f64;
        let growth = (r * dt).exp();
        let df_step = (-r * dt).exp();

        if sigma.abs() < SIGMA_EPS {
            let p_up = if r.abs() < SIGMA_EPS {
                0.5
            } else if growth >= 1.0 {
                1.0
            } else {
                0.0
            };
            return TreeParams {
                dt,
                u: 1.0,
                d: 1.0,
                p_up,
                p_down: 1.0 - p_up,
                df_step,
            };
        }

        let u = (sigma * dt.sqrt()).exp();
        let d = 1.0 / u;
        let raw_p = (growth - d) / (u - d);
        if !(-PROB_TOL..=1.0 + PROB_TOL).contains(&raw_p) {
            warn!(
                p_up = raw_p,
                r, sigma, dt, "risk-neutral probability outside [0, 1], clamping"
            );
        }
        let p_up = raw_p.clamp(0.0, 1.0);
        TreeParams {
            dt,
            u,
            d,
            p_up,
            p_down: 1.0 - p_up,
            df_step,
        }
    }

    /// Prices a tree product against the market snapshot.
    ///
    /// Reads the risk-free rate and volatility from the product's named
    /// curves at the expiry date, builds the recombining tree from the
    /// spot of the named underlying, and runs backward induction through
    /// the product's node-value rule.
    pub fn price<P: TreeProduct + ?Sized>(
        &self,
        market: &Market,
        product: &P,
    ) -> Result<f64, PricingError> {
        let underlying = product
            .underlying_name()
            .ok_or_else(|| PricingError::MissingBinding {
                id: product.id().to_string(),
                binding: "underlying",
            })?;
        let spot = market.spot_price(underlying);
        if spot < 0.0 {
            return Err(PricingError::NegativeSpot { spot });
        }

        let t_raw = DayCount::Act365F.year_fraction(market.as_of(), product.expiry());
        if t_raw < -EXPIRY_TOL {
            warn!(
                id = product.id(),
                expiry = %product.expiry(),
                "product already expired, returning intrinsic value"
            );
            return Ok(product.payoff(spot));
        }
        let t = t_raw.max(0.0);

        let rate_name = product
            .rate_curve_name()
            .ok_or_else(|| PricingError::MissingBinding {
                id: product.id().to_string(),
                binding: "rate curve",
            })?;
        let vol_name = product
            .vol_curve_name()
            .ok_or_else(|| PricingError::MissingBinding {
                id: product.id().to_string(),
                binding: "vol curve",
            })?;

        let rate_curve = market.curve_or_err(rate_name)?;
        if rate_curve.is_empty() {
            return Err(MarketDataError::EmptyCurve {
                name: rate_name.to_string(),
            }
            .into());
        }
        let vol_curve = market.vol_curve_or_err(vol_name)?;
        if vol_curve.is_empty() {
            return Err(MarketDataError::EmptyCurve {
                name: vol_name.to_string(),
            }
            .into());
        }

        let r = rate_curve.rate(product.expiry());
        let sigma = vol_curve.vol(product.expiry());

        // Terminal cases: no tree to build.
        if self.steps == 0 || t <= EXPIRY_TOL {
            return Ok(product.payoff(spot));
        }

        let params = self.setup(r, sigma, t);
        Ok(self.backward_induction(spot, product, &params))
    }

    /// Forward-initializes the leaves and folds the tree back to the
    /// root.
    fn backward_induction<P: TreeProduct + ?Sized>(
        &self,
        spot: f64,
        product: &P,
        params: &TreeParams,
    ) -> f64 {
        let n = self.steps;
        // spot * u^j * d^(n-j) = spot * d^n * (u/d)^j; the multiplicative
        // recurrence avoids per-node powf calls.
        let ratio = params.u / params.d;
        let disc_up = params.df_step * params.p_up;
        let disc_down = params.df_step * params.p_down;

        let mut values = vec![0.0_f64; n + 1];
        let mut leaf_spot = spot * params.d.powi(n as i32);
        for value in values.iter_mut() {
            *value = product.payoff(leaf_spot);
            leaf_spot *= ratio;
        }

        for i in (0..n).rev() {
            let mut node_spot = spot * params.d.powi(i as i32);
            for j in 0..=i {
                let continuation = disc_up * values[j + 1] + disc_down * values[j];
                values[j] = product.value_at_node(node_spot, i as f64 * params.dt, continuation);
                node_spot *= ratio;
            }
        }
        values[0]
    }
}
