//! Payment schedule generation.

use kestrel_core::types::Date;

use super::error::ScheduleError;
use super::frequency::Frequency;

/// A payment schedule: strictly increasing period boundary dates.
///
/// The first date is the accrual start (effective date), the last is
/// always the maturity date. Consecutive dates delimit the accrual
/// periods of a cashflow leg.
///
/// # Examples
///
/// ```
/// use kestrel_core::types::Date;
/// use kestrel_models::schedules::{Frequency, Schedule};
///
/// let effective = Date::from_ymd(2024, 1, 15).unwrap();
/// let maturity = Date::from_ymd(2026, 1, 15).unwrap();
/// let schedule = Schedule::generate(effective, maturity, Frequency::SemiAnnual).unwrap();
///
/// // 4 semi-annual periods -> 5 boundary dates
/// assert_eq!(schedule.dates().len(), 5);
/// assert_eq!(*schedule.dates().first().unwrap(), effective);
/// assert_eq!(*schedule.dates().last().unwrap(), maturity);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// Generates a schedule by stepping the frequency's calendar period
    /// from `effective` until `maturity`.
    ///
    /// A step that lands on or overshoots the maturity is snapped to the
    /// maturity date, so the final period may be short.
    ///
    /// # Returns
    ///
    /// * `Ok(Schedule)` - At least one period
    /// * `Err(ScheduleError::InvalidRange)` - `maturity <= effective`
    pub fn generate(
        effective: Date,
        maturity: Date,
        frequency: Frequency,
    ) -> Result<Self, ScheduleError> {
        if maturity <= effective {
            return Err(ScheduleError::InvalidRange {
                start: effective,
                end: maturity,
            });
        }

        let step = frequency.months();
        let mut dates = vec![effective];
        let mut current = effective;
        loop {
            let next = current.add_months(step)?;
            if next >= maturity {
                dates.push(maturity);
                break;
            }
            dates.push(next);
            current = next;
        }
        Ok(Schedule { dates })
    }

    /// The period boundary dates in ascending order.
    #[inline]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The maturity date (last boundary).
    #[inline]
    pub fn maturity(&self) -> Date {
        *self.dates.last().expect("schedule has at least two dates")
    }

    /// Iterator over (accrual start, accrual end) period pairs.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Number of accrual periods.
    #[inline]
    pub fn period_count(&self) -> usize {
        self.dates.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_regular_semi_annual_schedule() {
        let schedule =
            Schedule::generate(date(2024, 1, 15), date(2026, 1, 15), Frequency::SemiAnnual)
                .unwrap();
        assert_eq!(
            schedule.dates(),
            &[
                date(2024, 1, 15),
                date(2024, 7, 15),
                date(2025, 1, 15),
                date(2025, 7, 15),
                date(2026, 1, 15),
            ]
        );
        assert_eq!(schedule.period_count(), 4);
    }

    #[test]
    fn test_short_final_stub_snaps_to_maturity() {
        // 14 months of quarterly periods: last period is only 2 months.
        let schedule =
            Schedule::generate(date(2024, 1, 15), date(2025, 3, 15), Frequency::Quarterly)
                .unwrap();
        assert_eq!(*schedule.dates().last().unwrap(), date(2025, 3, 15));
        assert_eq!(schedule.period_count(), 5);
    }

    #[test]
    fn test_single_period_when_frequency_exceeds_tenor() {
        let schedule =
            Schedule::generate(date(2024, 1, 15), date(2024, 4, 1), Frequency::Annual).unwrap();
        assert_eq!(schedule.dates(), &[date(2024, 1, 15), date(2024, 4, 1)]);
    }

    #[test]
    fn test_dates_strictly_increasing() {
        let schedule =
            Schedule::generate(date(2024, 1, 31), date(2027, 1, 31), Frequency::Monthly).unwrap();
        for (start, end) in schedule.periods() {
            assert!(start < end);
        }
    }

    #[test]
    fn test_invalid_range_rejected() {
        let err = Schedule::generate(date(2024, 1, 15), date(2024, 1, 15), Frequency::Annual);
        assert!(matches!(err, Err(ScheduleError::InvalidRange { .. })));
        let err = Schedule::generate(date(2024, 1, 15), date(2023, 1, 15), Frequency::Annual);
        assert!(matches!(err, Err(ScheduleError::InvalidRange { .. })));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn frequency_strategy() -> impl Strategy<Value = Frequency> {
            prop_oneof![
                Just(Frequency::Annual),
                Just(Frequency::SemiAnnual),
                Just(Frequency::Quarterly),
                Just(Frequency::Monthly),
            ]
        }

        proptest! {
            #[test]
            fn prop_schedule_well_formed(
                start_serial in 40_000i64..50_000,
                tenor_days in 1i64..4_000,
                frequency in frequency_strategy(),
            ) {
                let effective = Date::from_serial(start_serial).unwrap();
                let maturity = Date::from_serial(start_serial + tenor_days).unwrap();
                let schedule = Schedule::generate(effective, maturity, frequency).unwrap();

                prop_assert_eq!(schedule.dates()[0], effective);
                prop_assert_eq!(schedule.maturity(), maturity);
                for (start, end) in schedule.periods() {
                    prop_assert!(start < end);
                }
            }
        }
    }
}
