//! CSV-shaped rendering and the tolerant read path.
//!
//! Matrix rows are `label,v1,v2,…` with a blank label cell on the header
//! row. Reading drops the label column and skips any field that does not
//! parse as an integer; a malformed field never aborts a read.

use std::fmt::Display;

use itertools::Itertools;

/// Header row for a period matrix: a blank label cell, then one label
/// per column.
pub fn matrix_header<C: Display>(columns: impl IntoIterator<Item = C>) -> String {
    format!(" ,{}", columns.into_iter().join(","))
}

/// One matrix data row: the row label, then the period for each column.
pub fn matrix_row<L: Display, V: Display>(
    label: L,
    periods: impl IntoIterator<Item = V>,
) -> String {
    format!("{},{}", label, periods.into_iter().join(","))
}

/// One index row: a key followed by its values.
pub fn index_row<K: Display, V: Display>(key: K, values: impl IntoIterator<Item = V>) -> String {
    format!("{},{}", key, values.into_iter().join(","))
}

/// Period fields of one data row, label column dropped and non-integer
/// fields skipped.
pub fn parse_periods(line: &str) -> Vec<u64> {
    line.split(',')
        .skip(1)
        .filter_map(|field| field.trim().parse().ok())
        .collect()
}
