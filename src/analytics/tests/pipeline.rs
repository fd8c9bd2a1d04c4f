use super::sample_table;
use crate::analytics::{
    DashboardQuery, Granularity, Selection, ViewSettings, aggregate, build_view, compute,
};

#[test]
fn test_full_view_matches_stages() {
    let table = sample_table();
    let query = DashboardQuery::all(&table);
    let view = build_view(&table, &query, &ViewSettings::default());

    let filtered = query.selection.apply(table.records());
    let series = aggregate(&filtered, Granularity::Yearly);
    assert_eq!(view.filtered, filtered);
    assert_eq!(view.series, series);
    assert_eq!(view.kpis, compute(&filtered, &series));
    assert_eq!(view.granularity, Granularity::Yearly);
    assert!(!view.is_empty());
}

#[test]
fn test_comparison_uses_focus_country() {
    let table = sample_table();
    let query = DashboardQuery::all(&table);
    let view = build_view(&table, &query, &ViewSettings::default());

    assert_eq!(view.comparison.focus_country, "Indonesia");
    assert_eq!(view.comparison.focus.len(), 5);
    assert_eq!(view.comparison.global.len(), 5);
    assert!(
        view.comparison
            .focus
            .points()
            .iter()
            .zip(view.comparison.global.points())
            .all(|(f, g)| f.bucket == g.bucket && f.value <= g.value)
    );

    let settings = ViewSettings {
        focus_country: "Russia".to_owned(),
        ..ViewSettings::default()
    };
    let view = build_view(&table, &query, &settings);
    assert_eq!(view.comparison.focus.len(), 3);
}

#[test]
fn test_comparison_is_yearly_under_five_year_granularity() {
    let table = sample_table();
    let query = DashboardQuery {
        granularity: Granularity::FiveYear,
        ..DashboardQuery::all(&table)
    };
    let view = build_view(&table, &query, &ViewSettings::default());
    assert_eq!(view.series.len(), 2);
    assert_eq!(view.comparison.global.len(), 5);
}

#[test]
fn test_top_producers_respect_setting() {
    let table = sample_table();
    let settings = ViewSettings {
        top_n: 2,
        ..ViewSettings::default()
    };
    let view = build_view(&table, &DashboardQuery::all(&table), &settings);
    let names: Vec<&str> = view.top_producers.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Indonesia", "Philippines"]);
}

#[test]
fn test_empty_selection_view() {
    let table = sample_table();
    let query = DashboardQuery {
        selection: Selection::new(Vec::<String>::new(), 2016, 2020),
        granularity: Granularity::Yearly,
    };
    let view = build_view(&table, &query, &ViewSettings::default());

    assert!(view.is_empty());
    assert!(view.series.is_empty());
    assert!(view.continents.is_empty());
    assert!(view.top_producers.is_empty());
    assert!(view.comparison.focus.is_empty());
    assert!(view.kpis.total.abs() < f64::EPSILON);
    assert_eq!(view.kpis.top_country_label(), "N/A");
    assert!(view.kpis.cagr_pct.abs() < f64::EPSILON);
    assert!(view.insights.trend.contains("No production data"));
    assert!(view.insights.regional.contains("No production data"));
}

#[test]
fn test_insights_name_leaders() {
    let table = sample_table();
    let view = build_view(&table, &DashboardQuery::all(&table), &ViewSettings::default());
    assert!(view.insights.trend.contains("2020"));
    assert!(view.insights.trend.contains("Indonesia"));
    assert!(view.insights.regional.contains("Asia"));
    // 4570 / 5311
    assert!(view.insights.regional.contains("86.0%"));
    assert!(!view.insights.producers.is_empty());
}
