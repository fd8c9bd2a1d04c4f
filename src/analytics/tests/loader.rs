use crate::analytics::loader::{SUB_COMMODITY, read_frame};
use crate::analytics::{ContinentClassifier, DatasetCache, DatasetSource, load};
use crate::error::DashboardError;
use anyhow::Result;
use std::sync::Arc;

const SAMPLE: &str = "testdata/nickel_sample.csv";

#[test]
fn test_load_sample() -> Result<()> {
    let table = load(&DatasetSource::new(SAMPLE), &ContinentClassifier::default())?;
    assert_eq!(table.len(), 36);
    assert_eq!(table.year_bounds(), Some((2015, 2020)));
    assert_eq!(table.countries().len(), 6);

    let first = table.records().first().expect("sample is not empty");
    assert_eq!(first.country, "Indonesia");
    assert_eq!(first.year, 2015);
    assert!((first.production - 130_000.0).abs() < f64::EPSILON);
    assert_eq!(first.continent, "Asia");
    Ok(())
}

#[test]
fn test_discarded_column_is_dropped() -> Result<()> {
    let df = read_frame(&DatasetSource::new(SAMPLE))?;
    assert!(df.column(SUB_COMMODITY).is_err());
    assert_eq!(df.width(), 3);

    let kept = read_frame(&DatasetSource::new(SAMPLE).with_dropped_column(None))?;
    assert!(kept.column(SUB_COMMODITY).is_ok());
    Ok(())
}

#[test]
fn test_unmapped_country_is_other() -> Result<()> {
    let table = load(&DatasetSource::new(SAMPLE), &ContinentClassifier::default())?;
    assert!(
        table
            .records()
            .iter()
            .filter(|r| r.country == "Zimbabwe")
            .all(|r| r.continent == "Other")
    );
    Ok(())
}

#[test]
fn test_injected_classifier_is_used() -> Result<()> {
    let classifier = ContinentClassifier::from_pairs([("Zimbabwe", "Africa")]);
    let table = load(&DatasetSource::new(SAMPLE), &classifier)?;
    let continents: Vec<&str> = table
        .records()
        .iter()
        .filter(|r| r.country == "Zimbabwe" || r.country == "Indonesia")
        .map(|r| r.continent.as_str())
        .collect();
    assert!(continents.contains(&"Africa"));
    // Indonesia is not in the injected table
    assert!(continents.contains(&"Other"));
    Ok(())
}

#[test]
fn test_missing_file_is_not_found() {
    let err = load(
        &DatasetSource::new("testdata/does_not_exist.csv"),
        &ContinentClassifier::default(),
    )
    .expect_err("missing file must fail");
    assert!(matches!(err, DashboardError::NotFound(_)), "got {err}");
    assert!(err.is_load_error());
}

#[test]
fn test_missing_column_is_reported() {
    let err = load(
        &DatasetSource::new("testdata/missing_column.csv"),
        &ContinentClassifier::default(),
    )
    .expect_err("missing Year column must fail");
    assert!(
        matches!(&err, DashboardError::MissingColumn(name) if name == "Year"),
        "got {err}"
    );
}

#[test]
fn test_non_numeric_production_is_malformed() {
    let err = load(
        &DatasetSource::new("testdata/malformed.csv"),
        &ContinentClassifier::default(),
    )
    .expect_err("non-numeric production must fail");
    assert!(
        matches!(&err, DashboardError::MalformedRow { row: 2, column } if column == "Production"),
        "got {err}"
    );
}

#[test]
fn test_fractional_year_is_malformed() {
    let err = load(
        &DatasetSource::new("testdata/fractional_year.csv"),
        &ContinentClassifier::default(),
    )
    .expect_err("fractional year must fail");
    assert!(
        matches!(&err, DashboardError::MalformedRow { row: 2, column } if column == "Year"),
        "got {err}"
    );
    assert!(err.is_load_error());
}

#[test]
fn test_bad_value_after_many_rows_is_malformed() -> Result<()> {
    let rows = 10_050;
    let mut content = String::from("Country;Sub-commodity;Year;Production\n");
    for i in 0..rows - 1 {
        content.push_str(&format!("Indonesia;x;{};{}\n", 1000 + i, i));
    }
    content.push_str("Indonesia;x;20000;n/a\n");

    let path = std::env::temp_dir().join("nickel_dash_late_bad_value.csv");
    std::fs::write(&path, content)?;
    let result = load(&DatasetSource::new(&path), &ContinentClassifier::default());
    std::fs::remove_file(&path).ok();

    let err = result.expect_err("late non-numeric production must fail");
    assert!(
        matches!(&err, DashboardError::MalformedRow { row, column } if *row == rows && column == "Production"),
        "got {err}"
    );
    assert!(err.is_load_error());
    Ok(())
}

#[test]
fn test_cache_reads_once() -> Result<()> {
    let mut cache = DatasetCache::new(ContinentClassifier::default());
    let source = DatasetSource::new(SAMPLE);

    let first = cache.get_or_load(&source)?;
    let second = cache.get_or_load(&source)?;

    assert!(Arc::ptr_eq(&first, &second), "second call must reuse the table");
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_cache_keys_on_source() -> Result<()> {
    let mut cache = DatasetCache::new(ContinentClassifier::default());
    let semicolon = DatasetSource::new(SAMPLE);
    let keep_all = DatasetSource::new(SAMPLE).with_dropped_column(None);

    let a = cache.get_or_load(&semicolon)?;
    let b = cache.get_or_load(&keep_all)?;
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.hits(), 0);
    assert_eq!(a.records(), b.records());
    Ok(())
}

#[test]
fn test_cache_does_not_store_failures() {
    let mut cache = DatasetCache::new(ContinentClassifier::default());
    let source = DatasetSource::new("testdata/malformed.csv");
    assert!(cache.get_or_load(&source).is_err());
    assert!(cache.get_or_load(&source).is_err());
    assert!(cache.is_empty());
    assert_eq!(cache.hits(), 0);
}
