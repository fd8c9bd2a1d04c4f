use super::sample_table;
use crate::analytics::{Selection, filter};
use std::collections::BTreeSet;

fn countries(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|&n| n.to_owned()).collect()
}

#[test]
fn test_filter_matches_exactly_the_predicate() {
    let table = sample_table();
    let wanted = countries(&["Indonesia", "Russia"]);

    for (lo, hi) in [(2016, 2020), (2017, 2018), (2018, 2018), (2019, 2030), (1990, 2000)] {
        let result = filter(table.records(), &wanted, lo, hi);

        let expected: Vec<_> = table
            .records()
            .iter()
            .filter(|r| r.year >= lo && r.year <= hi && wanted.contains(&r.country))
            .cloned()
            .collect();

        assert_eq!(result.records(), expected.as_slice(), "range {lo}..={hi}");
        assert!(
            result
                .iter()
                .all(|r| (lo..=hi).contains(&r.year) && wanted.contains(&r.country)),
            "no record outside the predicate"
        );
    }
}

#[test]
fn test_filter_bounds_are_inclusive() {
    let table = sample_table();
    let result = filter(table.records(), &countries(&["Indonesia"]), 2017, 2019);
    let years: Vec<i32> = result.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2017, 2018, 2019]);
}

#[test]
fn test_empty_country_set_yields_empty_subset() {
    let table = sample_table();
    let result = filter(table.records(), &BTreeSet::new(), 2016, 2020);
    assert!(result.is_empty());
    assert!(result.total_production().abs() < f64::EPSILON);
}

#[test]
fn test_range_without_rows_is_empty() {
    let table = sample_table();
    let result = filter(table.records(), &countries(&["Indonesia"]), 1950, 1960);
    assert!(result.is_empty());
}

#[test]
fn test_reversed_range_is_swapped() {
    let table = sample_table();
    let wanted = countries(&["Philippines"]);
    let forward = filter(table.records(), &wanted, 2017, 2019);
    let reversed = filter(table.records(), &wanted, 2019, 2017);
    assert_eq!(forward, reversed);
    assert_eq!(forward.len(), 3);
}

#[test]
fn test_filter_is_idempotent() {
    let table = sample_table();
    let wanted = countries(&["Indonesia", "Zimbabwe"]);
    let once = filter(table.records(), &wanted, 2018, 2020);
    let twice = filter(once.records(), &wanted, 2018, 2020);
    assert_eq!(once, twice);
}

#[test]
fn test_unknown_country_matches_nothing() {
    let table = sample_table();
    let result = filter(table.records(), &countries(&["Atlantis"]), 2016, 2020);
    assert!(result.is_empty());
}

#[test]
fn test_selection_all_covers_table() {
    let table = sample_table();
    let selection = Selection::all(&table);
    assert_eq!(selection.year_range(), (2016, 2020));
    assert_eq!(selection.apply(table.records()).len(), table.len());
    assert!(table.records().iter().all(|r| selection.matches(r)));
}

#[test]
fn test_selection_matches_agrees_with_apply() {
    let table = sample_table();
    let selection = Selection::new(["Russia", "Zimbabwe"], 2020, 2018);
    let applied = selection.apply(table.records());
    let matched = table.records().iter().filter(|r| selection.matches(r)).count();
    assert_eq!(applied.len(), matched);
    assert_eq!(applied.len(), 4);
}

#[test]
fn test_selection_apply_agrees_with_filter() {
    let table = sample_table();
    for selection in [
        Selection::new(["Indonesia", "Russia"], 2017, 2019),
        Selection::new(["Philippines"], 2020, 2016),
        Selection::new(Vec::<String>::new(), 2016, 2020),
    ] {
        let via_filter = filter(
            table.records(),
            &selection.countries,
            selection.year_min,
            selection.year_max,
        );
        assert_eq!(selection.apply(table.records()), via_filter);
    }
}
