// ReqLog - app/service.rs
//
// The operations offered to an outer HTTP or CLI layer: health, analyze,
// and export. Each call re-reads the day's file; nothing is cached and no
// state is shared between calls.

use crate::app::source::{export_file_name, is_plain_selector, LogSource};
use crate::core::aggregate::summarise;
use crate::core::export::export_xlsx;
use crate::core::model::{Analysis, ExportArtifact, LogEntry, NoDataReport};
use crate::platform::fs::replace_file;
use crate::util::constants::{HEALTH_OK, XLSX_CONTENT_TYPE};
use crate::util::error::{AnalyzerError, ExportError, Result};
use std::path::PathBuf;

/// Fixed liveness signal.
pub fn health() -> &'static str {
    HEALTH_OK
}

/// Message shown when a date has no recorded requests.
pub fn no_data_message(date: &str) -> String {
    format!("{date} 날짜의 로그 데이터가 없습니다.")
}

/// Entry point for analysis and export over one log directory.
#[derive(Debug, Clone)]
pub struct Analyzer {
    source: LogSource,
}

impl Analyzer {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: LogSource::new(log_dir),
        }
    }

    /// Load the day's entries. See `LogSource::load`.
    pub fn load(&self, date: &str) -> Result<Vec<LogEntry>> {
        Ok(self.source.load(date)?)
    }

    /// Request totals for `date`, or the no-data report when nothing was logged.
    pub fn analyze(&self, date: &str) -> Result<Analysis> {
        let entries = self.load(date)?;
        if entries.is_empty() {
            return Ok(Analysis::NoData(NoDataReport {
                message: no_data_message(date),
                total_requests: 0,
            }));
        }
        Ok(Analysis::Summary(summarise(&entries)))
    }

    /// Write `entries` as the export workbook for `date_label`.
    ///
    /// Overwrites any earlier export for that date. The workbook is built in
    /// memory first and then swapped into place, so a failed export leaves
    /// the previous file (if any) untouched.
    pub fn export(&self, entries: &[LogEntry], date_label: &str) -> Result<ExportArtifact> {
        if !is_plain_selector(date_label) {
            return Err(AnalyzerError::InvalidDate {
                date: date_label.to_string(),
            });
        }

        let path = self.source.export_path(date_label);
        let mut bytes = Vec::new();
        let rows = export_xlsx(entries, &mut bytes, &path)?;

        replace_file(&path, &bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), rows, "Export written");

        Ok(ExportArtifact {
            path,
            file_name: export_file_name(date_label),
            content_type: XLSX_CONTENT_TYPE,
        })
    }

    /// Load, aggregate, and export `date` in one call.
    pub fn export_artifact(&self, date: &str) -> Result<ExportArtifact> {
        let entries = self.load(date)?;
        self.export(&entries, date)
    }
}
