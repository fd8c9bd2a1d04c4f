use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// DATA STRUCTURES

/// One row of the production table, enriched with its continent.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ProductionRecord {
    pub country: String,
    pub year: i32,
    pub production: f64,
    pub continent: String,
}

impl ProductionRecord {
    pub fn new(
        country: impl Into<String>,
        year: i32,
        production: f64,
        continent: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            year,
            production,
            continent: continent.into(),
        }
    }
}

/// The loaded, immutable dataset.
///
/// Built once by the loader and shared behind an `Arc` for the rest of the
/// process. Nothing mutates it after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductionTable {
    records: Vec<ProductionRecord>,
}

impl ProductionTable {
    pub fn new(records: Vec<ProductionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ProductionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct countries, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Inclusive `(min, max)` year bounds, `None` for an empty table.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

/// Records matching the current selection, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredSet {
    records: Vec<ProductionRecord>,
}

impl FilteredSet {
    pub fn new(records: Vec<ProductionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ProductionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_production(&self) -> f64 {
        self.records.iter().map(|r| r.production).sum()
    }
}

impl<'a> IntoIterator for &'a FilteredSet {
    type Item = &'a ProductionRecord;
    type IntoIter = std::slice::Iter<'a, ProductionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Time-bucketing mode for the trend series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Granularity {
    #[default]
    Yearly,
    FiveYear,
}

impl Granularity {
    pub const ALL: [Self; 2] = [Self::Yearly, Self::FiveYear];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yearly => "Yearly",
            Self::FiveYear => "5-Year Period",
        }
    }

    /// Axis label for the bucket column.
    pub fn bucket_label(&self) -> &'static str {
        match self {
            Self::Yearly => "Year",
            Self::FiveYear => "Period",
        }
    }
}

/// Grouping key for [`aggregate_by`](super::aggregate::aggregate_by).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKey {
    Country,
    Continent,
}

impl GroupKey {
    pub fn key_of(self, record: &ProductionRecord) -> &str {
        match self {
            Self::Country => &record.country,
            Self::Continent => &record.continent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeriesPoint {
    pub bucket: i32,
    pub value: f64,
}

/// Sparse, ascending `(bucket, total)` series. Buckets are unique.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Callers must supply unique buckets in ascending order.
    pub(crate) fn from_sorted(points: Vec<SeriesPoint>) -> Self {
        debug_assert!(
            points.windows(2).all(|w| matches!(w, [a, b] if a.bucket < b.bucket)),
            "series buckets must be unique and ascending"
        );
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// The trailing `n` points (all of them when the series is shorter).
    pub fn tail(&self, n: usize) -> &[SeriesPoint] {
        let start = self.points.len().saturating_sub(n);
        self.points.get(start..).unwrap_or_default()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Points as `[x, y]` pairs for plotting.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|p| [f64::from(p.bucket), p.value])
            .collect()
    }
}

/// Scalar summary of the current selection.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct KpiSnapshot {
    pub total: f64,
    /// `None` when the selection is empty.
    pub top_country: Option<String>,
    /// `None` when the selection is empty.
    pub peak_year: Option<i32>,
    pub cagr_pct: f64,
    pub growth10_pct: f64,
}

impl KpiSnapshot {
    pub fn top_country_label(&self) -> &str {
        self.top_country.as_deref().unwrap_or("N/A")
    }

    pub fn peak_year_label(&self) -> String {
        self.peak_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_owned())
    }
}
