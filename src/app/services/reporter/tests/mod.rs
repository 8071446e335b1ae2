//! Test utilities for reporter testing

use crate::app::services::aggregator::StationTable;

mod report_tests;

/// Build a table from `(station, value)` pairs in order
pub fn table_from(pairs: &[(&str, f32)]) -> StationTable {
    let mut table = StationTable::new();
    for &(station, value) in pairs {
        table.upsert(station, value);
    }
    table
}
