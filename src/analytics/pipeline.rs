//! The explicit recompute pass: filter → aggregate → KPIs → insights.
//!
//! The GUI calls [`build_view`] whenever a control changes and renders the
//! returned [`DashboardView`]; the CLI calls it once per command. Nothing
//! here holds state between calls.

use super::aggregate::{self, ContinentSummary};
use super::filter::Selection;
use super::insight::{self, Insights};
use super::kpi;
use super::types::{FilteredSet, Granularity, KpiSnapshot, ProductionTable, TimeSeries};
use serde::{Deserialize, Serialize};

/// User-controlled inputs of one recompute pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DashboardQuery {
    pub selection: Selection,
    pub granularity: Granularity,
}

impl DashboardQuery {
    /// All countries, full year range, yearly buckets.
    pub fn all(table: &ProductionTable) -> Self {
        Self {
            selection: Selection::all(table),
            granularity: Granularity::Yearly,
        }
    }
}

/// Settings that shape the view but are not exposed as dashboard controls.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewSettings {
    /// Country compared against the global trend.
    pub focus_country: String,
    pub top_n: usize,
    pub growth_window: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            focus_country: "Indonesia".to_owned(),
            top_n: 10,
            growth_window: kpi::GROWTH_WINDOW,
        }
    }
}

/// Yearly global totals next to one country's yearly totals.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ComparisonSeries {
    pub focus_country: String,
    pub global: TimeSeries,
    pub focus: TimeSeries,
}

/// Everything the presentation layer renders for one query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardView {
    pub granularity: Granularity,
    pub filtered: FilteredSet,
    pub series: TimeSeries,
    pub comparison: ComparisonSeries,
    pub continents: ContinentSummary,
    pub top_producers: Vec<(String, f64)>,
    pub kpis: KpiSnapshot,
    pub insights: Insights,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

pub fn build_view(
    table: &ProductionTable,
    query: &DashboardQuery,
    settings: &ViewSettings,
) -> DashboardView {
    let filtered = query.selection.apply(table.records());
    let series = aggregate::aggregate(&filtered, query.granularity);

    let comparison = ComparisonSeries {
        focus_country: settings.focus_country.clone(),
        global: aggregate::aggregate(&filtered, Granularity::Yearly),
        focus: aggregate::country_series(&filtered, &settings.focus_country),
    };

    let continents = aggregate::continent_summary(&filtered);
    let top_producers = aggregate::top_n(&filtered, settings.top_n);
    let kpis = kpi::compute_with_window(&filtered, &series, settings.growth_window);
    let insights = insight::generate(&kpis, &continents);

    tracing::debug!(
        "Recomputed view: {} rows, {} buckets ({})",
        filtered.len(),
        series.len(),
        query.granularity.as_str()
    );

    DashboardView {
        granularity: query.granularity,
        filtered,
        series,
        comparison,
        continents,
        top_producers,
        kpis,
        insights,
    }
}
