use super::{filtered, sample_table};
use crate::analytics::{
    ContinentClassifier, DatasetSource, FilteredSet, Selection, export_csv, load, to_csv_bytes,
};
use anyhow::Result;

#[test]
fn test_csv_header_and_rows() -> Result<()> {
    let set = filtered(&[("Indonesia", 2018, 100.0), ("Zimbabwe", 2019, 15.5)]);
    let csv = String::from_utf8(to_csv_bytes(&set)?)?;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.first(), Some(&"Country,Year,Production,Continent"));
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Indonesia,2018,100"));
    assert!(lines[1].ends_with(",Asia"));
    assert_eq!(lines[2], "Zimbabwe,2019,15.5,Other");
    Ok(())
}

#[test]
fn test_empty_set_exports_header_only() -> Result<()> {
    let csv = String::from_utf8(to_csv_bytes(&FilteredSet::default())?)?;
    assert_eq!(csv.trim_end(), "Country,Year,Production,Continent");
    Ok(())
}

#[test]
fn test_export_round_trips_through_loader() -> Result<()> {
    let table = sample_table();
    let set = Selection::new(["Indonesia", "Russia", "Zimbabwe"], 2017, 2020).apply(table.records());

    let path = std::env::temp_dir().join("nickel_dash_round_trip.csv");
    export_csv(&set, &path)?;

    let source = DatasetSource::new(&path)
        .with_separator(b',')
        .with_dropped_column(None);
    let reloaded = load(&source, &ContinentClassifier::default())?;
    std::fs::remove_file(&path).ok();

    assert_eq!(reloaded.records(), set.records());
    Ok(())
}
