use super::aggregate::ContinentSummary;
use super::types::KpiSnapshot;
use serde::{Deserialize, Serialize};

/// Narrative text shown under the dashboard charts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Insights {
    pub trend: String,
    pub regional: String,
    pub producers: String,
}

const NO_DATA: &str = "No production data for the current selection.";

pub fn trend_insight(kpis: &KpiSnapshot) -> String {
    match (kpis.peak_year, kpis.top_country.as_deref()) {
        (Some(year), Some(country)) => format!(
            "Production peaks around {year}, driven mainly by {country}. \
             Growth momentum across the selected range reflects structural demand \
             changes in global nickel markets."
        ),
        _ => NO_DATA.to_owned(),
    }
}

pub fn regional_insight(summary: &ContinentSummary) -> String {
    match summary.leader() {
        Some((continent, share)) => format!(
            "The largest regional contribution comes from {continent} with {share:.1}% \
             share of total production. This highlights geographic supply concentration."
        ),
        None => NO_DATA.to_owned(),
    }
}

pub fn producers_insight() -> String {
    "Top producers dominate global supply structure. Monitoring these countries is \
     essential for forecasting price shifts, investment risk, and supply security."
        .to_owned()
}

pub fn generate(kpis: &KpiSnapshot, summary: &ContinentSummary) -> Insights {
    Insights {
        trend: trend_insight(kpis),
        regional: regional_insight(summary),
        producers: producers_insight(),
    }
}
