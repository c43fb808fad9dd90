//! Rate and volatility term structures.
//!
//! Both curve types store a date-ordered, strictly-increasing sequence of
//! (tenor, value) pillars. Lookups interpolate linearly on serial numbers
//! between bracketing tenors and extrapolate flat outside the pillar range.
//! `shock` produces a new curve with every value bumped in parallel; the
//! stored curve is never mutated, which is what lets the risk layer bump
//! deep-copied snapshots safely.

use std::fmt;

use tracing::warn;

use crate::types::{Date, DayCount};

/// Shared pillar storage for both curve types.
///
/// Invariant: tenor dates are unique and sorted ascending at all times.
#[derive(Debug, Clone, Default, PartialEq)]
struct Pillars {
    points: Vec<(Date, f64)>,
}

impl Pillars {
    /// Inserts a pillar, keeping sort order; an existing pillar at the
    /// same tenor is replaced (last write wins).
    fn insert(&mut self, tenor: Date, value: f64) {
        match self.points.binary_search_by(|(d, _)| d.cmp(&tenor)) {
            Ok(i) => self.points[i].1 = value,
            Err(i) => self.points.insert(i, (tenor, value)),
        }
    }

    /// Interpolated value at `tenor`, or `None` for an empty curve.
    ///
    /// Before the first pillar the first value applies, after the last
    /// pillar the last value applies (flat extrapolation, no slope).
    /// Strictly between pillars `t0 < t < t1`:
    ///
    /// ```text
    /// value = y0 + (t.serial - t0.serial) * (y1 - y0) / (t1.serial - t0.serial)
    /// ```
    fn value_at(&self, tenor: Date) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if tenor <= first.0 {
            return Some(first.1);
        }
        if tenor >= last.0 {
            return Some(last.1);
        }
        // First pillar with date >= tenor; bounds guaranteed by the
        // checks above.
        let idx = self.points.partition_point(|(d, _)| *d < tenor);
        let (t1, y1) = self.points[idx];
        if t1 == tenor {
            return Some(y1);
        }
        let (t0, y0) = self.points[idx - 1];
        let w = (tenor.serial() - t0.serial()) as f64 / (t1.serial() - t0.serial()) as f64;
        Some(y0 + w * (y1 - y0))
    }

    /// A copy with `amount` added to every value (parallel shift).
    fn shifted(&self, amount: f64) -> Pillars {
        Pillars {
            points: self
                .points
                .iter()
                .map(|&(d, v)| (d, v + amount))
                .collect(),
        }
    }
}

/// Interest rate term structure keyed by tenor date.
///
/// Values are continuously compounded zero rates.
///
/// # Examples
///
/// ```
/// use kestrel_core::market_data::RateCurve;
/// use kestrel_core::types::Date;
///
/// let mut curve = RateCurve::new("USD-SOFR");
/// curve.add_rate(Date::from_ymd(2025, 1, 1).unwrap(), 0.04);
/// curve.add_rate(Date::from_ymd(2026, 1, 1).unwrap(), 0.05);
///
/// // Midpoint interpolates linearly on serial numbers
/// let mid = Date::from_ymd(2025, 7, 2).unwrap();
/// assert!((curve.rate(mid) - 0.045).abs() < 1e-4);
///
/// // Outside the pillar range the boundary value applies flat
/// let early = Date::from_ymd(2024, 6, 1).unwrap();
/// assert_eq!(curve.rate(early), 0.04);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateCurve {
    name: String,
    pillars: Pillars,
}

impl RateCurve {
    /// Creates an empty curve with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pillars: Pillars::default(),
        }
    }

    /// The curve name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the curve holds no pillars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pillars.points.is_empty()
    }

    /// Number of pillars.
    #[inline]
    pub fn len(&self) -> usize {
        self.pillars.points.len()
    }

    /// The (tenor, rate) pillars in ascending tenor order.
    #[inline]
    pub fn pillars(&self) -> &[(Date, f64)] {
        &self.pillars.points
    }

    /// Adds or replaces the pillar at `tenor`.
    pub fn add_rate(&mut self, tenor: Date, rate: f64) {
        self.pillars.insert(tenor, rate);
    }

    /// The zero rate at `tenor` (interpolated, flat outside the pillar
    /// range).
    ///
    /// Never panics: an empty curve warns and returns 0.0. Callers that
    /// must treat missing data as fatal check [`RateCurve::is_empty`]
    /// first.
    pub fn rate(&self, tenor: Date) -> f64 {
        self.pillars.value_at(tenor).unwrap_or_else(|| {
            warn!(curve = %self.name, "rate lookup on empty curve, returning 0.0");
            0.0
        })
    }

    /// A new curve with every rate bumped by `amount` (parallel shift).
    #[must_use]
    pub fn shock(&self, amount: f64) -> RateCurve {
        RateCurve {
            name: self.name.clone(),
            pillars: self.pillars.shifted(amount),
        }
    }

    /// Continuously compounded discount factor from `from` to `to`:
    /// `exp(-rate(to) * yf)` with an ACT/365F year fraction.
    pub fn discount_factor(&self, from: Date, to: Date) -> f64 {
        let yf = DayCount::Act365F.year_fraction(from, to);
        (-self.rate(to) * yf).exp()
    }
}

impl fmt::Display for RateCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rate curve: {}", self.name)?;
        for (tenor, rate) in self.pillars() {
            writeln!(f, "  {}: {:.6}", tenor, rate)?;
        }
        Ok(())
    }
}

/// At-the-money volatility term structure keyed by tenor date (no smile).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolCurve {
    name: String,
    pillars: Pillars,
}

impl VolCurve {
    /// Creates an empty curve with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pillars: Pillars::default(),
        }
    }

    /// The curve name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the curve holds no pillars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pillars.points.is_empty()
    }

    /// Number of pillars.
    #[inline]
    pub fn len(&self) -> usize {
        self.pillars.points.len()
    }

    /// The (tenor, vol) pillars in ascending tenor order.
    #[inline]
    pub fn pillars(&self) -> &[(Date, f64)] {
        &self.pillars.points
    }

    /// Adds or replaces the pillar at `tenor`.
    pub fn add_vol(&mut self, tenor: Date, vol: f64) {
        self.pillars.insert(tenor, vol);
    }

    /// The volatility at `tenor` (interpolated, flat outside the pillar
    /// range). Warns and returns 0.0 on an empty curve.
    pub fn vol(&self, tenor: Date) -> f64 {
        self.pillars.value_at(tenor).unwrap_or_else(|| {
            warn!(curve = %self.name, "vol lookup on empty curve, returning 0.0");
            0.0
        })
    }

    /// A new curve with every vol bumped by `amount` (parallel shift).
    #[must_use]
    pub fn shock(&self, amount: f64) -> VolCurve {
        VolCurve {
            name: self.name.clone(),
            pillars: self.pillars.shifted(amount),
        }
    }
}

impl fmt::Display for VolCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vol curve: {}", self.name)?;
        for (tenor, vol) in self.pillars() {
            writeln!(f, "  {}: {:.6}", tenor, vol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sample_curve() -> RateCurve {
        let mut curve = RateCurve::new("USD-SOFR");
        curve.add_rate(date(2025, 1, 1), 0.040);
        curve.add_rate(date(2026, 1, 1), 0.045);
        curve.add_rate(date(2027, 1, 1), 0.050);
        curve
    }

    // ========================================
    // Insertion invariants
    // ========================================

    #[test]
    fn test_insert_keeps_sort_order() {
        let mut curve = RateCurve::new("c");
        curve.add_rate(date(2027, 1, 1), 0.05);
        curve.add_rate(date(2025, 1, 1), 0.03);
        curve.add_rate(date(2026, 1, 1), 0.04);

        let tenors: Vec<Date> = curve.pillars().iter().map(|&(d, _)| d).collect();
        let mut sorted = tenors.clone();
        sorted.sort();
        assert_eq!(tenors, sorted);
    }

    #[test]
    fn test_insert_last_write_wins() {
        let mut curve = RateCurve::new("c");
        curve.add_rate(date(2025, 1, 1), 0.03);
        curve.add_rate(date(2025, 1, 1), 0.035);
        assert_eq!(curve.len(), 1);
        assert_relative_eq!(curve.rate(date(2025, 1, 1)), 0.035);
    }

    // ========================================
    // Interpolation and extrapolation
    // ========================================

    #[test]
    fn test_rate_at_pillars_is_exact() {
        let curve = sample_curve();
        assert_relative_eq!(curve.rate(date(2025, 1, 1)), 0.040);
        assert_relative_eq!(curve.rate(date(2026, 1, 1)), 0.045);
        assert_relative_eq!(curve.rate(date(2027, 1, 1)), 0.050);
    }

    #[test]
    fn test_rate_interpolates_on_serials() {
        let curve = sample_curve();
        let t0 = date(2025, 1, 1);
        let t1 = date(2026, 1, 1);
        let t = date(2025, 7, 1);
        let w = (t.serial() - t0.serial()) as f64 / (t1.serial() - t0.serial()) as f64;
        let expected = 0.040 + w * (0.045 - 0.040);
        assert_relative_eq!(curve.rate(t), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_flat_extrapolation_before_first() {
        let curve = sample_curve();
        assert_relative_eq!(curve.rate(date(2024, 1, 1)), 0.040);
    }

    #[test]
    fn test_flat_extrapolation_after_last() {
        let curve = sample_curve();
        assert_relative_eq!(curve.rate(date(2035, 1, 1)), 0.050);
    }

    #[test]
    fn test_empty_curve_returns_zero() {
        let curve = RateCurve::new("empty");
        assert!(curve.is_empty());
        assert_eq!(curve.rate(date(2025, 1, 1)), 0.0);
    }

    #[test]
    fn test_discount_factor_flat_curve() {
        let mut curve = RateCurve::new("flat");
        curve.add_rate(date(2025, 1, 1), 0.04);
        let from = date(2024, 1, 1);
        let to = date(2025, 1, 1);
        // 366 days in 2024
        let expected = (-0.04_f64 * 366.0 / 365.0).exp();
        assert_relative_eq!(curve.discount_factor(from, to), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_discount_factor_at_valuation_date_is_one() {
        let mut curve = RateCurve::new("flat");
        curve.add_rate(date(2025, 1, 1), 0.04);
        let d = date(2024, 1, 1);
        assert_relative_eq!(curve.discount_factor(d, d), 1.0);
    }

    // ========================================
    // Shocks
    // ========================================

    #[test]
    fn test_shock_shifts_all_values() {
        let shocked = sample_curve().shock(0.0001);
        assert_relative_eq!(shocked.rate(date(2025, 1, 1)), 0.0401, epsilon = 1e-12);
        assert_relative_eq!(shocked.rate(date(2027, 1, 1)), 0.0501, epsilon = 1e-12);
    }

    #[test]
    fn test_shock_round_trip_restores_values() {
        let curve = sample_curve();
        let restored = curve.shock(0.0025).shock(-0.0025);
        for (&(d, v), &(rd, rv)) in curve.pillars().iter().zip(restored.pillars()) {
            assert_eq!(d, rd);
            assert_relative_eq!(v, rv, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_shock_does_not_mutate_original() {
        let curve = sample_curve();
        let _shocked = curve.shock(0.01);
        assert_relative_eq!(curve.rate(date(2025, 1, 1)), 0.040);
    }

    #[test]
    fn test_shock_of_clone_is_isolated() {
        let curve = sample_curve();
        let clone = curve.clone();
        let _shocked = clone.shock(0.01);
        assert_eq!(curve, clone);
    }

    // ========================================
    // Vol curve
    // ========================================

    #[test]
    fn test_vol_curve_mirrors_rate_curve_behaviour() {
        let mut vols = VolCurve::new("EQ-VOL");
        vols.add_vol(date(2025, 1, 1), 0.20);
        vols.add_vol(date(2026, 1, 1), 0.24);

        assert_relative_eq!(vols.vol(date(2024, 6, 1)), 0.20);
        assert_relative_eq!(vols.vol(date(2030, 1, 1)), 0.24);

        let t0 = date(2025, 1, 1);
        let t1 = date(2026, 1, 1);
        let t = date(2025, 4, 1);
        let w = (t.serial() - t0.serial()) as f64 / (t1.serial() - t0.serial()) as f64;
        assert_relative_eq!(vols.vol(t), 0.20 + w * 0.04, epsilon = 1e-15);
    }

    #[test]
    fn test_empty_vol_curve_returns_zero() {
        let vols = VolCurve::new("empty");
        assert_eq!(vols.vol(date(2025, 1, 1)), 0.0);
    }

    // ========================================
    // Property tests
    // ========================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn pillar_strategy() -> impl Strategy<Value = Vec<(i64, f64)>> {
            proptest::collection::vec((45_000i64..50_000, -0.05f64..0.15), 2..12)
        }

        proptest! {
            #[test]
            fn prop_lookup_within_value_bounds(pillars in pillar_strategy(), query in 44_000i64..51_000) {
                let mut curve = RateCurve::new("p");
                for &(s, v) in &pillars {
                    curve.add_rate(Date::from_serial(s).unwrap(), v);
                }
                let lo = curve.pillars().iter().map(|&(_, v)| v).fold(f64::INFINITY, f64::min);
                let hi = curve.pillars().iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max);
                let value = curve.rate(Date::from_serial(query).unwrap());
                prop_assert!(value >= lo - 1e-12 && value <= hi + 1e-12);
            }

            #[test]
            fn prop_shock_round_trip(pillars in pillar_strategy(), bump in 1e-6f64..0.05) {
                let mut curve = RateCurve::new("p");
                for &(s, v) in &pillars {
                    curve.add_rate(Date::from_serial(s).unwrap(), v);
                }
                let restored = curve.shock(bump).shock(-bump);
                for (&(_, v), &(_, rv)) in curve.pillars().iter().zip(restored.pillars()) {
                    prop_assert!((v - rv).abs() < 1e-12);
                }
            }
        }
    }
}
