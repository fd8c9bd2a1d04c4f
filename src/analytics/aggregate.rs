use super::types::{FilteredSet, Granularity, GroupKey, ProductionRecord, SeriesPoint, TimeSeries};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bucket a year falls into. Five-year periods are anchored at multiples of 5
/// using floor division, so 2020..=2024 map to 2020 and -3 maps to -5.
pub fn bucket_of(year: i32, granularity: Granularity) -> i32 {
    match granularity {
        Granularity::Yearly => year,
        Granularity::FiveYear => year.div_euclid(5) * 5,
    }
}

fn sum_by_bucket<I>(items: I, granularity: Granularity) -> TimeSeries
where
    I: IntoIterator<Item = (i32, f64)>,
{
    let mut buckets: BTreeMap<i32, f64> = BTreeMap::new();
    for (year, value) in items {
        *buckets.entry(bucket_of(year, granularity)).or_insert(0.0) += value;
    }
    TimeSeries::from_sorted(
        buckets
            .into_iter()
            .map(|(bucket, value)| SeriesPoint { bucket, value })
            .collect(),
    )
}

/// Production summed per time bucket; sparse and ascending.
pub fn aggregate(subset: &FilteredSet, granularity: Granularity) -> TimeSeries {
    sum_by_bucket(
        subset.iter().map(|r| (r.year, r.production)),
        granularity,
    )
}

/// Re-buckets an existing series to a coarser granularity.
pub fn rebucket(series: &TimeSeries, granularity: Granularity) -> TimeSeries {
    sum_by_bucket(
        series.points().iter().map(|p| (p.bucket, p.value)),
        granularity,
    )
}

/// Production summed per country or continent, keyed in lexicographic order.
pub fn aggregate_by(subset: &FilteredSet, key: GroupKey) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for record in subset {
        let name = key.key_of(record);
        match totals.get_mut(name) {
            Some(total) => *total += record.production,
            None => {
                totals.insert(name.to_owned(), record.production);
            }
        }
    }
    totals
}

/// Yearly series of a single country within the subset.
pub fn country_series(subset: &FilteredSet, country: &str) -> TimeSeries {
    sum_by_bucket(
        subset
            .iter()
            .filter(|r| r.country == country)
            .map(|r| (r.year, r.production)),
        Granularity::Yearly,
    )
}

/// Orders `(name, total)` pairs by total descending, name ascending on ties.
pub(crate) fn rank_descending(totals: BTreeMap<String, f64>) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// The `n` largest producing countries, descending.
pub fn top_n(subset: &FilteredSet, n: usize) -> Vec<(String, f64)> {
    let mut ranked = rank_descending(aggregate_by(subset, GroupKey::Country));
    ranked.truncate(n);
    ranked
}

/// Continent → production over a filtered set.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ContinentSummary {
    totals: BTreeMap<String, f64>,
}

impl ContinentSummary {
    pub fn totals(&self) -> &BTreeMap<String, f64> {
        &self.totals
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    /// Share of `continent` in percent; 0 when unknown or the total is 0.
    pub fn share_pct(&self, continent: &str) -> f64 {
        let total = self.total();
        match self.totals.get(continent) {
            Some(value) if total != 0.0 => value / total * 100.0,
            _ => 0.0,
        }
    }

    /// Continents by production, descending.
    pub fn ranked(&self) -> Vec<(String, f64)> {
        rank_descending(self.totals.clone())
    }

    /// Largest contributor with its share in percent.
    pub fn leader(&self) -> Option<(String, f64)> {
        let (name, _) = self.ranked().into_iter().next()?;
        let share = self.share_pct(&name);
        Some((name, share))
    }
}

pub fn continent_summary(subset: &FilteredSet) -> ContinentSummary {
    ContinentSummary {
        totals: aggregate_by(subset, GroupKey::Continent),
    }
}

/// Yearly totals of any record slice, used for peak-year detection.
pub(crate) fn yearly_totals(records: &[ProductionRecord]) -> BTreeMap<i32, f64> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.year).or_insert(0.0) += record.production;
    }
    totals
}
