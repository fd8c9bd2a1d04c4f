//! Production analytics: loading, filtering, aggregation and KPIs.
//!
//! ```text
//! DatasetCache::get_or_load ─> ProductionTable (Arc, immutable)
//!                                   │
//!           DashboardQuery ─> pipeline::build_view
//!                                   │
//!          filter ─> aggregate ─> kpi ─> insight ─> DashboardView
//! ```

pub mod aggregate;
pub mod continent;
pub mod export;
pub mod filter;
pub mod insight;
pub mod kpi;
pub mod loader;
pub mod pipeline;
pub mod types;

pub use aggregate::{
    ContinentSummary, aggregate, aggregate_by, bucket_of, continent_summary, country_series,
    rebucket, top_n,
};
pub use continent::{ContinentClassifier, FALLBACK_CONTINENT};
pub use export::{DEFAULT_EXPORT_NAME, export_csv, to_csv_bytes, write_csv};
pub use filter::{Selection, filter};
pub use insight::Insights;
pub use kpi::{cagr_pct, compute, growth_over_window};
pub use loader::{DatasetCache, DatasetSource, load};
pub use pipeline::{ComparisonSeries, DashboardQuery, DashboardView, ViewSettings, build_view};
pub use types::{
    FilteredSet, Granularity, GroupKey, KpiSnapshot, ProductionRecord, ProductionTable,
    SeriesPoint, TimeSeries,
};
