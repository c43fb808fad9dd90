//! Fixed-for-floating interest rate swap.

use kestrel_core::market_data::{Market, MarketDataError};
use kestrel_core::types::{Date, DayCount};

use super::error::InstrumentError;
use super::traits::Instrument;
use crate::schedules::{Frequency, Schedule};

/// Accrual fractions below this contribute nothing.
const TAU_EPS: f64 = 1e-9;

/// A fixed-for-floating interest rate swap.
///
/// Sign convention: positive notional receives fixed, negative notional
/// pays fixed.
///
/// The fixed leg discounts `notional * fixed_rate * tau` per period with
/// ACT/360 accruals. The floating leg is valued as a notional exchange at
/// par, `-N + N * df(maturity)`, using the discount curve; it is not
/// forecast from a separate projection curve. The projection curve name is
/// carried on the trade so a forecast leg can be added without changing
/// the data model.
#[derive(Debug, Clone)]
pub struct Swap {
    id: String,
    effective: Date,
    maturity: Date,
    notional: f64,
    fixed_rate: f64,
    frequency: Frequency,
    discount_curve: String,
    float_curve: String,
    schedule: Schedule,
}

impl Swap {
    /// Creates a swap and generates its fixed-leg schedule.
    ///
    /// # Errors
    ///
    /// * `InstrumentError::InvalidMaturity` - `maturity <= effective`
    pub fn new(
        id: impl Into<String>,
        effective: Date,
        maturity: Date,
        notional: f64,
        fixed_rate: f64,
        frequency: Frequency,
        discount_curve: impl Into<String>,
        float_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        if maturity <= effective {
            return Err(InstrumentError::InvalidMaturity {
                start: effective,
                maturity,
            });
        }
        let schedule = Schedule::generate(effective, maturity, frequency)?;
        Ok(Self {
            id: id.into(),
            effective,
            maturity,
            notional,
            fixed_rate,
            frequency,
            discount_curve: discount_curve.into(),
            float_curve: float_curve.into(),
            schedule,
        })
    }

    /// Signed notional (positive = receive fixed).
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Fixed leg rate.
    #[inline]
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Fixed leg payment frequency.
    #[inline]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Swap start date.
    #[inline]
    pub fn effective_date(&self) -> Date {
        self.effective
    }

    /// Name of the floating-leg projection curve carried on the trade.
    #[inline]
    pub fn float_curve_name(&self) -> &str {
        &self.float_curve
    }

    /// The fixed-leg annuity: sum of `|notional| * tau * df` over the
    /// remaining accrual periods.
    pub fn annuity(&self, market: &Market) -> Result<f64, MarketDataError> {
        let curve = market.curve_or_err(&self.discount_curve)?;
        if curve.is_empty() {
            return Err(MarketDataError::EmptyCurve {
                name: self.discount_curve.clone(),
            });
        }
        let valuation = market.as_of();

        let mut annuity = 0.0;
        for (start, end) in self.schedule.periods() {
            if end <= valuation {
                continue;
            }
            let tau = DayCount::Act360.year_fraction(start, end);
            if tau <= TAU_EPS {
                continue;
            }
            annuity += self.notional.abs() * tau * curve.discount_factor(valuation, end);
        }
        Ok(annuity)
    }

    /// Present value: discounted fixed leg plus the par floating leg.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::CurveNotFound` - Discount curve absent
    /// * `MarketDataError::EmptyCurve` - Discount curve has no pillars
    pub fn pv(&self, market: &Market) -> Result<f64, MarketDataError> {
        let valuation = market.as_of();
        if valuation >= self.maturity {
            return Ok(0.0);
        }

        let curve = market.curve_or_err(&self.discount_curve)?;
        if curve.is_empty() {
            return Err(MarketDataError::EmptyCurve {
                name: self.discount_curve.clone(),
            });
        }

        let mut fixed_leg = 0.0;
        for (start, end) in self.schedule.periods() {
            if end <= valuation {
                continue;
            }
            let tau = DayCount::Act360.year_fraction(start, end);
            if tau <= TAU_EPS {
                continue;
            }
            let df = curve.discount_factor(valuation, end);
            fixed_leg += self.notional * self.fixed_rate * tau * df;
        }

        let df_maturity = curve.discount_factor(valuation, self.maturity);
        let floating_leg = -self.notional + self.notional * df_maturity;

        Ok(fixed_leg + floating_leg)
    }
}

impl Instrument for Swap {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "Swap"
    }

    /// Swaps have no point-in-time exercise payoff.
    fn payoff(&self, _reference_price: f64) -> f64 {
        0.0
    }

    fn maturity_date(&self) -> Date {
        self.maturity
    }

    fn underlying_name(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn rate_curve_name(&self) -> Option<&str> {
        Some(&self.discount_curve)
    }
}
