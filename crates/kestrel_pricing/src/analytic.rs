//! Black-Scholes closed-form pricing.
//!
//! Used for analysis output alongside the lattice and as the convergence
//! reference in tests. Lattice pricing remains the production path for
//! option instruments.
//!
//! ## Formulas
//!
//! Call: `C = S * N(d1) - K * exp(-rT) * N(d2)`
//! Put:  `P = K * exp(-rT) * N(-d2) - S * N(-d1)`
//!
//! with `d1 = (ln(S/K) + (r + sigma^2/2) T) / (sigma sqrt(T))` and
//! `d2 = d1 - sigma sqrt(T)`.

use kestrel_core::math::norm_cdf;
use kestrel_models::instruments::OptionType;

use crate::error::PricingError;

/// Black-Scholes model under lognormal spot dynamics.
///
/// # Examples
///
/// ```
/// use kestrel_models::instruments::OptionType;
/// use kestrel_pricing::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call = bs.price(OptionType::Call, 100.0, 1.0);
/// let put = bs.price(OptionType::Put, 100.0, 1.0);
///
/// // Put-call parity: C - P = S - K * exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a model instance.
    ///
    /// # Errors
    ///
    /// * `PricingError::InvalidParameter` - `spot <= 0` or
    ///   `volatility <= 0`
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, PricingError> {
        if spot <= 0.0 {
            return Err(PricingError::InvalidParameter {
                name: "spot",
                value: spot,
            });
        }
        if volatility <= 0.0 {
            return Err(PricingError::InvalidParameter {
                name: "volatility",
                value: volatility,
            });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// The d1 term for the given strike and expiry.
    fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        ((self.spot / strike).ln() + (self.rate + 0.5 * self.volatility * self.volatility) * expiry)
            / vol_sqrt_t
    }

    /// Present value of a European option with the given payoff type.
    ///
    /// An expiry at or below zero returns the intrinsic payoff.
    pub fn price(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        if expiry <= 0.0 {
            return option_type.intrinsic(strike, self.spot);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let df = (-self.rate * expiry).exp();

        match option_type {
            OptionType::Call => self.spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
            OptionType::Put => strike * df * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
            OptionType::BinaryCall => df * norm_cdf(d2),
            OptionType::BinaryPut => df * norm_cdf(-d2),
        }
    }
}
