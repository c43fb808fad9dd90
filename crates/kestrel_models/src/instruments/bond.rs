//! Fixed-coupon bond.

use kestrel_core::market_data::{Market, MarketDataError};
use kestrel_core::types::Date;

use super::error::InstrumentError;
use super::traits::Instrument;
use crate::schedules::{Frequency, Schedule};

/// Coupon rates below this are treated as zero-coupon.
const COUPON_EPS: f64 = 1e-9;

/// A fixed-coupon bullet bond valued by discounting its cashflows.
///
/// PV is the sum of discounted coupon payments plus the discounted
/// principal at maturity; a bond whose maturity is on or before the
/// valuation date has PV 0.
///
/// # Examples
///
/// ```
/// use kestrel_core::types::Date;
/// use kestrel_models::instruments::Bond;
/// use kestrel_models::schedules::Frequency;
///
/// let bond = Bond::new(
///     "UST-2Y",
///     Date::from_ymd(2024, 1, 1).unwrap(),
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     100.0,
///     0.05,
///     Frequency::SemiAnnual,
///     "USD-SOFR",
/// )
/// .unwrap();
/// assert_eq!(bond.principal(), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct Bond {
    id: String,
    issue_date: Date,
    maturity: Date,
    principal: f64,
    coupon_rate: f64,
    frequency: Frequency,
    discount_curve: String,
    /// Coupon payment schedule; `None` for zero-coupon bonds.
    schedule: Option<Schedule>,
}

impl Bond {
    /// Creates a bond.
    ///
    /// # Arguments
    ///
    /// * `id` - Report identifier
    /// * `issue_date` - Accrual start of the coupon schedule
    /// * `maturity` - Principal repayment date
    /// * `principal` - Face amount (must be positive)
    /// * `coupon_rate` - Annual coupon rate (0.05 = 5%); ~0 means
    ///   zero-coupon
    /// * `frequency` - Coupon payments per year
    /// * `discount_curve` - Name of the curve used for discounting
    ///
    /// # Errors
    ///
    /// * `InstrumentError::InvalidPrincipal` - `principal <= 0`
    /// * `InstrumentError::InvalidMaturity` - `maturity <= issue_date`
    pub fn new(
        id: impl Into<String>,
        issue_date: Date,
        maturity: Date,
        principal: f64,
        coupon_rate: f64,
        frequency: Frequency,
        discount_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        if principal <= 0.0 {
            return Err(InstrumentError::InvalidPrincipal { value: principal });
        }
        if maturity <= issue_date {
            return Err(InstrumentError::InvalidMaturity {
                start: issue_date,
                maturity,
            });
        }
        let schedule = if coupon_rate.abs() > COUPON_EPS {
            Some(Schedule::generate(issue_date, maturity, frequency)?)
        } else {
            None
        };
        Ok(Self {
            id: id.into(),
            issue_date,
            maturity,
            principal,
            coupon_rate,
            frequency,
            discount_curve: discount_curve.into(),
            schedule,
        })
    }

    /// Face amount.
    #[inline]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Annual coupon rate.
    #[inline]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Coupon frequency.
    #[inline]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Issue (accrual start) date.
    #[inline]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Present value by discounted cashflows.
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

        let mut pv = 0.0;
        if let Some(schedule) = &self.schedule {
            let coupon = self.coupon_rate / self.frequency.per_year() as f64 * self.principal;
            for (_, payment) in schedule.periods() {
                if payment <= valuation {
                    continue;
                }
                pv += coupon * curve.discount_factor(valuation, payment);
            }
        }
        pv += self.principal * curve.discount_factor(valuation, self.maturity);
        Ok(pv)
    }
}

impl Instrument for Bond {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "Bond"
    }

    /// Redemption amount; bonds are not exercised against a reference
    /// price.
    fn payoff(&self, _reference_price: f64) -> f64 {
        self.principal
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
