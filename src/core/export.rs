// ReqLog - core/export.rs
//
// xlsx export of parsed requests and their statistics.
// Core layer: writes to any Write trait object; the app layer decides
// where the bytes land.
//
// Two steps: the sheets are first laid out as an in-memory grid (plain
// data, easy to inspect), then rendered into a workbook buffer in one go.
// Nothing touches the destination until the workbook is complete.

use crate::core::aggregate::{requests_by_ip, requests_by_method, requests_by_uri};
use crate::core::layout::{section_starts, stack_height};
use crate::core::model::{LogEntry, RequestCounts};
use crate::util::constants::{
    DETAIL_HEADERS, DETAIL_SHEET_NAME, MAX_SHEET_ROWS, STATS_HEADERS, STATS_SHEET_NAME,
    STATS_TITLE_IP, STATS_TITLE_METHOD, STATS_TITLE_URI, TIMESTAMP_FORMAT,
};
use crate::util::error::ExportError;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::io::Write;
use std::path::Path;

// =============================================================================
// Sheet grid
// =============================================================================

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Count(usize),
}

impl Cell {
    fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }
}

/// Dense row-major layout of one worksheet. Blank rows are empty vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetGrid {
    pub name: &'static str,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: Vec::new(),
        }
    }

    /// Place `cells` at `row`, padding with blank rows as needed.
    fn set_row(&mut self, row: usize, cells: Vec<Cell>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        self.rows[row] = cells;
    }

    /// Cell at (`row`, `col`), if anything was written there.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Cell at (`row`, `col`) as text, if it is a text cell.
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        match self.cell(row, col) {
            Some(Cell::Text(s)) => Some(s),
            _ => None,
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Detail sheet: header row, then one row per entry in input order.
pub fn detail_sheet(entries: &[LogEntry]) -> SheetGrid {
    let mut sheet = SheetGrid::new(DETAIL_SHEET_NAME);
    sheet.set_row(0, DETAIL_HEADERS.iter().map(|h| Cell::text(*h)).collect());
    for (i, entry) in entries.iter().enumerate() {
        sheet.set_row(
            i + 1,
            vec![
                Cell::text(entry.timestamp.format(TIMESTAMP_FORMAT).to_string()),
                Cell::text(entry.client_ip.as_str()),
                Cell::text(entry.method.as_str()),
                Cell::text(entry.uri.as_str()),
                Cell::text(entry.user_agent.as_str()),
            ],
        );
    }
    sheet
}

/// Statistics sheet: IP, URI and method sections stacked in that order.
pub fn statistics_sheet(
    by_ip: &RequestCounts,
    by_uri: &RequestCounts,
    by_method: &RequestCounts,
) -> SheetGrid {
    let sections = [
        (STATS_TITLE_IP, by_ip),
        (STATS_TITLE_URI, by_uri),
        (STATS_TITLE_METHOD, by_method),
    ];
    let sizes: Vec<usize> = sections.iter().map(|(_, counts)| counts.len()).collect();

    let mut sheet = SheetGrid::new(STATS_SHEET_NAME);
    for ((title, counts), start) in sections.iter().zip(section_starts(&sizes)) {
        write_section(&mut sheet, start, title, counts);
    }
    sheet
}

fn write_section(sheet: &mut SheetGrid, start: usize, title: &str, counts: &RequestCounts) {
    sheet.set_row(start, vec![Cell::text(title)]);
    sheet.set_row(
        start + 1,
        STATS_HEADERS.iter().map(|h| Cell::text(*h)).collect(),
    );
    for (offset, (key, count)) in counts.iter().enumerate() {
        sheet.set_row(
            start + 2 + offset,
            vec![Cell::text(key.as_str()), Cell::Count(*count)],
        );
    }
}

/// Both sheets for `entries`, detail first.
///
/// # Errors
/// `ExportError::TooManyRows` if either sheet would exceed the xlsx row limit.
pub fn build_sheets(entries: &[LogEntry]) -> Result<Vec<SheetGrid>, ExportError> {
    let detail_rows = entries.len() + 1;
    if detail_rows > MAX_SHEET_ROWS {
        return Err(ExportError::TooManyRows {
            count: detail_rows,
            max: MAX_SHEET_ROWS,
        });
    }

    let by_ip = requests_by_ip(entries);
    let by_uri = requests_by_uri(entries);
    let by_method = requests_by_method(entries);

    let stats_rows = stack_height(&[by_ip.len(), by_uri.len(), by_method.len()]);
    if stats_rows > MAX_SHEET_ROWS {
        return Err(ExportError::TooManyRows {
            count: stats_rows,
            max: MAX_SHEET_ROWS,
        });
    }

    Ok(vec![
        detail_sheet(entries),
        statistics_sheet(&by_ip, &by_uri, &by_method),
    ])
}

// =============================================================================
// Rendering
// =============================================================================

/// Render laid-out sheets into an xlsx workbook buffer.
///
/// Columns are auto-fitted after population. Row counts must already be
/// within `MAX_SHEET_ROWS` (see `build_sheets`).
pub fn render_workbook(sheets: &[SheetGrid], export_path: &Path) -> Result<Vec<u8>, ExportError> {
    let xlsx_err = |source| ExportError::Xlsx {
        path: export_path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    for grid in sheets {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(grid.name).map_err(xlsx_err)?;

        for (r, row) in grid.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                let written = match cell {
                    Cell::Text(s) => worksheet.write_string(r, c, s.as_str()),
                    Cell::Count(n) => worksheet.write_number(r, c, *n as f64),
                };
                written.map_err(xlsx_err)?;
            }
        }

        worksheet.autofit();
        workbook.push_worksheet(worksheet);
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

/// Export entries and their statistics as an xlsx workbook.
///
/// The workbook is built fully in memory and written with a single
/// `write_all`, so a failure never leaves a half-built workbook behind in
/// `writer` from this function's side. Returns the number of detail rows.
pub fn export_xlsx<W: Write>(
    entries: &[LogEntry],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let sheets = build_sheets(entries)?;
    let bytes = render_workbook(&sheets, export_path)?;

    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|source| ExportError::Io {
            path: export_path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        path = %export_path.display(),
        rows = entries.len(),
        bytes = bytes.len(),
        "Workbook rendered"
    );

    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn make_entry(second: u32, ip: &str, method: &str, uri: &str) -> LogEntry {
        LogEntry {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(14, 30, second)
                .unwrap(),
            client_ip: ip.to_string(),
            method: method.to_string(),
            uri: uri.to_string(),
            user_agent: format!("agent-{second}"),
        }
    }

    fn sample() -> Vec<LogEntry> {
        vec![
            make_entry(1, "10.0.0.1", "GET", "/a"),
            make_entry(2, "10.0.0.2", "POST", "/b"),
            make_entry(3, "10.0.0.1", "GET", "/c"),
        ]
    }

    /// Start rows of the three statistics sections, found by their titles.
    fn title_rows(sheet: &SheetGrid) -> Vec<usize> {
        [STATS_TITLE_IP, STATS_TITLE_URI, STATS_TITLE_METHOD]
            .iter()
            .map(|title| {
                sheet
                    .rows
                    .iter()
                    .position(|row| row.first() == Some(&Cell::text(*title)))
                    .unwrap_or_else(|| panic!("missing section {title}"))
            })
            .collect()
    }

    #[test]
    fn test_detail_sheet_layout() {
        let sheet = detail_sheet(&sample());
        assert_eq!(sheet.name, DETAIL_SHEET_NAME);
        assert_eq!(sheet.rows.len(), 4);
        assert_eq!(sheet.text(0, 0), Some("시간"));
        assert_eq!(sheet.text(0, 4), Some("User-Agent"));
        assert_eq!(sheet.text(1, 0), Some("2024-01-15 14:30:01"));
        assert_eq!(sheet.text(2, 1), Some("10.0.0.2"));
        assert_eq!(sheet.text(2, 2), Some("POST"));
        assert_eq!(sheet.text(3, 3), Some("/c"));
        assert_eq!(sheet.text(3, 4), Some("agent-3"));
    }

    #[test]
    fn test_statistics_sections_are_stacked_with_one_blank_row() {
        let entries = sample();
        let by_ip = requests_by_ip(&entries);
        let by_uri = requests_by_uri(&entries);
        let by_method = requests_by_method(&entries);
        let sheet = statistics_sheet(&by_ip, &by_uri, &by_method);

        // IP: 2 keys -> rows 0..=3, blank 4; URI: 3 keys -> rows 5..=9, blank 10.
        assert_eq!(title_rows(&sheet), [0, 5, 11]);
        assert!(sheet.rows[4].is_empty());
        assert!(sheet.rows[10].is_empty());

        assert_eq!(sheet.text(1, 0), Some("구분"));
        assert_eq!(sheet.text(1, 1), Some("요청 수"));
        assert_eq!(sheet.text(2, 0), Some("10.0.0.1"));
        assert_eq!(sheet.cell(2, 1), Some(&Cell::Count(2)));
        assert_eq!(sheet.text(13, 0), Some("GET"));
        assert_eq!(sheet.cell(14, 1), Some(&Cell::Count(1)));
        assert_eq!(sheet.rows.len(), 15);
    }

    #[test]
    fn test_statistics_with_no_entries_keeps_all_sections() {
        let empty = RequestCounts::new();
        let sheet = statistics_sheet(&empty, &empty, &empty);
        assert_eq!(title_rows(&sheet), [0, 3, 6]);
        assert_eq!(sheet.text(7, 1), Some("요청 수"));
    }

    #[test]
    fn test_statistics_with_many_keys() {
        let entries: Vec<_> = (0..40)
            .map(|i| make_entry(i % 60, &format!("10.0.1.{i}"), "GET", "/same"))
            .collect();
        let sheets = build_sheets(&entries).unwrap();
        let stats = &sheets[1];
        assert_eq!(title_rows(stats), [0, 43, 47]);
    }

    #[test]
    fn test_export_writes_xlsx_container() {
        let mut buf = Vec::new();
        let count = export_xlsx(&sample(), &mut buf, &PathBuf::from("out.xlsx")).unwrap();
        assert_eq!(count, 3);
        // xlsx is a zip container.
        assert!(buf.starts_with(b"PK\x03\x04"), "output is not a zip archive");
    }

    #[test]
    fn test_export_with_no_entries_still_renders() {
        let mut buf = Vec::new();
        let count = export_xlsx(&[], &mut buf, &PathBuf::from("empty.xlsx")).unwrap();
        assert_eq!(count, 0);
        assert!(buf.starts_with(b"PK"));
    }
}
