//! KPI math over a filtered set and its aggregated series.
//!
//! Growth metrics are informational: every degenerate case (fewer than two
//! points, a zero starting value, a non-finite result) collapses to `0.0`
//! instead of producing an error, `NaN` or infinity.
//!
//! Ties are resolved deterministically: the top country is the
//! lexicographically smallest of the maximal countries, and the peak year is
//! the earliest of the maximal years.

use super::aggregate::{aggregate_by, rank_descending, yearly_totals};
use super::types::{FilteredSet, GroupKey, KpiSnapshot, TimeSeries};

/// Trailing window used by [`growth_over_window`] for the headline KPI.
pub const GROWTH_WINDOW: usize = 10;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Compound growth rate between the first and last point, in percent.
pub fn cagr_pct(series: &TimeSeries) -> f64 {
    let n = series.len();
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return 0.0;
    };
    if n < 2 || first.value == 0.0 {
        return 0.0;
    }
    let periods = (n - 1) as f64;
    finite_or_zero(((last.value / first.value).powf(1.0 / periods) - 1.0) * 100.0)
}

/// Percent change across the trailing `window` points.
pub fn growth_over_window(series: &TimeSeries, window: usize) -> f64 {
    let tail = series.tail(window);
    let (Some(first), Some(last)) = (tail.first(), tail.last()) else {
        return 0.0;
    };
    if tail.len() < 2 || first.value == 0.0 {
        return 0.0;
    }
    finite_or_zero((last.value - first.value) / first.value * 100.0)
}

/// Country with the largest summed production.
pub fn top_country(subset: &FilteredSet) -> Option<String> {
    rank_descending(aggregate_by(subset, GroupKey::Country))
        .into_iter()
        .next()
        .map(|(name, _)| name)
}

/// Year with the largest summed production, regardless of the series
/// granularity.
pub fn peak_year(subset: &FilteredSet) -> Option<i32> {
    // Strict comparison keeps the earliest year on ties
    yearly_totals(subset.records())
        .into_iter()
        .fold(None, |best: Option<(i32, f64)>, (year, value)| match best {
            Some((_, best_value)) if value <= best_value => best,
            _ => Some((year, value)),
        })
        .map(|(year, _)| year)
}

pub fn compute(subset: &FilteredSet, series: &TimeSeries) -> KpiSnapshot {
    compute_with_window(subset, series, GROWTH_WINDOW)
}

pub fn compute_with_window(
    subset: &FilteredSet,
    series: &TimeSeries,
    window: usize,
) -> KpiSnapshot {
    KpiSnapshot {
        total: subset.total_production(),
        top_country: top_country(subset),
        peak_year: peak_year(subset),
        cagr_pct: cagr_pct(series),
        growth10_pct: growth_over_window(series, window),
    }
}
