// ReqLog - core/layout.rs
//
// Geometry of the statistics sheet. Sections are stacked vertically:
// each is a title row, a header row, then one row per key, and the next
// section starts after exactly one blank row.
//
// Kept free of any spreadsheet type so the offsets can be checked alone.

use crate::util::constants::{STATS_SECTION_GAP_ROWS, STATS_SECTION_PREAMBLE_ROWS};

/// Total rows a section occupies for `data_rows` keys.
pub fn section_height(data_rows: usize) -> usize {
    STATS_SECTION_PREAMBLE_ROWS + data_rows
}

/// Zero-based start row of every section, in order.
///
/// `data_rows[i]` is the number of distinct keys in section `i`.
/// The first section starts at row 0; each later one starts at
/// `previous_start + previous_height + 1`.
pub fn section_starts(data_rows: &[usize]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(data_rows.len());
    let mut next = 0usize;
    for &rows in data_rows {
        starts.push(next);
        next += section_height(rows) + STATS_SECTION_GAP_ROWS;
    }
    starts
}

/// Rows used by the whole stack, without a trailing gap.
pub fn stack_height(data_rows: &[usize]) -> usize {
    match (section_starts(data_rows).last(), data_rows.last()) {
        (Some(&start), Some(&rows)) => start + section_height(rows),
        _ => 0,
    }
}
