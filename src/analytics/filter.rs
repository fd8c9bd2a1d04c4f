use super::types::{FilteredSet, ProductionRecord, ProductionTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Country-membership and inclusive year-range predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Selection {
    pub countries: BTreeSet<String>,
    pub year_min: i32,
    pub year_max: i32,
}

impl Selection {
    pub fn new(
        countries: impl IntoIterator<Item = impl Into<String>>,
        year_min: i32,
        year_max: i32,
    ) -> Self {
        Self {
            countries: countries.into_iter().map(Into::into).collect(),
            year_min,
            year_max,
        }
    }

    /// Every country over the table's full year range.
    pub fn all(table: &ProductionTable) -> Self {
        let (year_min, year_max) = table.year_bounds().unwrap_or((0, 0));
        Self::new(table.countries(), year_min, year_max)
    }

    /// Bounds in ascending order. A reversed range is swapped rather than
    /// rejected.
    pub fn year_range(&self) -> (i32, i32) {
        if self.year_min <= self.year_max {
            (self.year_min, self.year_max)
        } else {
            (self.year_max, self.year_min)
        }
    }

    pub fn matches(&self, record: &ProductionRecord) -> bool {
        let (lo, hi) = self.year_range();
        (lo..=hi).contains(&record.year) && self.countries.contains(&record.country)
    }

    pub fn apply(&self, records: &[ProductionRecord]) -> FilteredSet {
        FilteredSet::new(records.iter().filter(|r| self.matches(r)).cloned().collect())
    }
}

/// Records with `country ∈ countries` and `year_min <= year <= year_max`.
///
/// An empty country set yields an empty result. Bounds given in reverse are
/// swapped. Source order is preserved.
pub fn filter(
    records: &[ProductionRecord],
    countries: &BTreeSet<String>,
    year_min: i32,
    year_max: i32,
) -> FilteredSet {
    if countries.is_empty() {
        return FilteredSet::default();
    }

    let (lo, hi) = if year_min <= year_max {
        (year_min, year_max)
    } else {
        tracing::debug!("Swapping reversed year range {year_min}..={year_max}");
        (year_max, year_min)
    };

    FilteredSet::new(
        records
            .iter()
            .filter(|r| r.year >= lo && r.year <= hi && countries.contains(&r.country))
            .cloned()
            .collect(),
    )
}
