//! Tests for report construction and ordering

use super::table_from;
use crate::app::services::aggregator::StationTable;
use crate::app::services::reporter::report::Report;

#[test]
fn test_report_sorts_stations_ascending() {
    let table = table_from(&[
        ("Zagreb", 1.0),
        ("abha", 1.0),
        ("Abha", 1.0),
        ("Ürümqi", 1.0),
        ("Zürich", 1.0),
        ("Accra", 1.0),
    ]);

    let report = Report::from_table(&table);
    let names: Vec<&str> = report.entries().iter().map(|e| e.station.as_str()).collect();

    // Byte order: uppercase ASCII < lowercase ASCII < multi-byte UTF-8
    assert_eq!(names, vec!["Abha", "Accra", "Zagreb", "Zürich", "abha", "Ürümqi"]);
    assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_report_entry_values() {
    let table = table_from(&[("A", 1.0), ("A", 3.0), ("A", 5.0)]);

    let report = Report::from_table(&table);
    let entry = &report.entries()[0];

    assert_eq!(entry.station, "A");
    assert_eq!(entry.min, 1.0);
    assert_eq!(entry.mean, 3.0);
    assert_eq!(entry.max, 5.0);
}

#[test]
fn test_report_mean_between_bounds() {
    let table = table_from(&[
        ("Lagos", 31.7),
        ("Lagos", 22.9),
        ("Lagos", 27.0),
        ("Nuuk", -20.3),
        ("Nuuk", -1.1),
        ("Nuuk", -9.9),
        ("Perth", 14.4),
    ]);

    let report = Report::from_table(&table);
    for entry in report.entries() {
        assert!(f64::from(entry.min) <= entry.mean, "{:?}", entry);
        assert!(entry.mean <= f64::from(entry.max), "{:?}", entry);
    }
}

#[test]
fn test_report_empty_table() {
    let report = Report::from_table(&StationTable::new());
    assert!(report.is_empty());
}

#[test]
fn test_report_is_deterministic() {
    let pairs = [("b", 1.0), ("a", 2.0), ("c", 3.0), ("a", 4.0)];

    let first = Report::from_table(&table_from(&pairs));
    let second = Report::from_table(&table_from(&pairs));

    assert_eq!(first, second);
}
