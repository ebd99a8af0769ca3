// ReqLog - app/source.rs
//
// Day-file resolution and loading. Joins the file-naming conventions to the
// core parser; the only place that decides which path belongs to a date.

use crate::core::model::LogEntry;
use crate::core::parser::parse_reader;
use crate::platform::fs::open_if_exists;
use crate::util::constants::{
    EXPORT_FILE_EXTENSION, EXPORT_FILE_PREFIX, SOURCE_FILE_EXTENSION, SOURCE_FILE_PREFIX,
};
use crate::util::error::ParseError;
use std::path::PathBuf;

/// `client-requests.<date>.log`
pub fn source_file_name(date: &str) -> String {
    format!("{SOURCE_FILE_PREFIX}{date}{SOURCE_FILE_EXTENSION}")
}

/// `client-requests-<date>.xlsx`
pub fn export_file_name(date: &str) -> String {
    format!("{EXPORT_FILE_PREFIX}{date}{EXPORT_FILE_EXTENSION}")
}

/// True when `date` can only name a file directly inside the log directory.
///
/// The `yyyy-MM-dd` shape itself is not checked: a wrong shape just fails to
/// find a file. Separators and `..` are refused so a selector can never
/// reach outside the log directory.
pub fn is_plain_selector(date: &str) -> bool {
    !date.is_empty() && !date.contains(['/', '\\']) && !date.contains("..")
}

/// Reads a configured log directory one day at a time.
#[derive(Debug, Clone)]
pub struct LogSource {
    log_dir: PathBuf,
}

impl LogSource {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// Path of the day's log file.
    pub fn source_path(&self, date: &str) -> PathBuf {
        self.log_dir.join(source_file_name(date))
    }

    /// Path of the day's export artifact.
    pub fn export_path(&self, date: &str) -> PathBuf {
        self.log_dir.join(export_file_name(date))
    }

    /// Load every request entry recorded for `date`, in file order.
    ///
    /// A missing file (or a selector that cannot name one) yields an empty
    /// vector: no traffic was recorded that day.
    ///
    /// # Errors
    /// - `ParseError::Io` if the file exists but cannot be read.
    /// - `ParseError::MalformedTimestamp` if a matched line has a bad timestamp.
    pub fn load(&self, date: &str) -> Result<Vec<LogEntry>, ParseError> {
        if !is_plain_selector(date) {
            tracing::warn!(date, "Date selector is not a plain file component; no data");
            return Ok(Vec::new());
        }

        let path = self.source_path(date);
        let reader = open_if_exists(&path).map_err(|source| ParseError::Io {
            file: path.clone(),
            source,
        })?;

        let Some(reader) = reader else {
            tracing::info!(path = %path.display(), "No log file for date");
            return Ok(Vec::new());
        };

        let entries = parse_reader(reader, &path)?;
        tracing::info!(path = %path.display(), entries = entries.len(), "Log file loaded");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DATE: &str = "2024-01-15";

    #[test]
    fn test_file_names() {
        assert_eq!(source_file_name(DATE), "client-requests.2024-01-15.log");
        assert_eq!(export_file_name(DATE), "client-requests-2024-01-15.xlsx");
    }

    #[test]
    fn test_paths_live_under_log_dir() {
        let source = LogSource::new("logs");
        assert_eq!(
            source.source_path(DATE),
            PathBuf::from("logs/client-requests.2024-01-15.log")
        );
        assert_eq!(
            source.export_path(DATE),
            PathBuf::from("logs/client-requests-2024-01-15.xlsx")
        );
    }

    #[test]
    fn test_plain_selector() {
        assert!(is_plain_selector(DATE));
        assert!(is_plain_selector("not-a-date"));
        assert!(!is_plain_selector(""));
        assert!(!is_plain_selector("../secret"));
        assert!(!is_plain_selector("2024/01/15"));
        assert!(!is_plain_selector("2024\\01"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = LogSource::new(dir.path());
        assert!(source.load(DATE).unwrap().is_empty());
        assert!(source.load("../../etc/passwd").unwrap().is_empty());
    }

    #[test]
    fn test_load_preserves_file_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(source_file_name(DATE)),
            "2024-01-15 10:00:05 Client Request - IP: 10.0.0.9, Method: GET, URI: /late, User-Agent: t\n\
             2024-01-15 10:00:01 Client Request - IP: 10.0.0.1, Method: GET, URI: /early, User-Agent: t\n",
        )
        .unwrap();

        let entries = LogSource::new(dir.path()).load(DATE).unwrap();
        let uris: Vec<_> = entries.iter().map(|e| e.uri.as_str()).collect();
        assert_eq!(uris, ["/late", "/early"]);
    }

    #[test]
    fn test_unreadable_source_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as text.
        fs::create_dir(dir.path().join(source_file_name(DATE))).unwrap();
        let err = LogSource::new(dir.path()).load(DATE).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }), "got {err:?}");
    }
}
