// ReqLog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every fatal error keeps its cause
// so the CLI can print one readable message and the log keeps the chain.
//
// A missing source file is NOT an error (it means "no traffic that day")
// and therefore has no variant here. Non-matching log lines are never errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ReqLog operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum AnalyzerError {
    /// Loading or parsing a day's log file failed.
    Parse(ParseError),

    /// Producing the export artifact failed.
    Export(ExportError),

    /// The date selector cannot name a file inside the log directory.
    InvalidDate { date: String },
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Log read failed: {e}"),
            Self::Export(e) => write!(f, "Export failed: {e}"),
            Self::InvalidDate { date } => {
                write!(f, "Date selector '{date}' is not a plain yyyy-MM-dd value")
            }
        }
    }
}

impl std::error::Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::InvalidDate { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Line-level timestamp error
// ---------------------------------------------------------------------------

/// A line matched the request pattern but its timestamp did not parse.
///
/// Returned by `core::parser::parse_line`, which has no file context;
/// `parse_reader` lifts it into `ParseError::MalformedTimestamp`.
#[derive(Debug)]
pub struct InvalidTimestamp {
    pub raw: String,
    pub source: TimestampFault,
}

impl fmt::Display for InvalidTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse timestamp '{}': {}", self.raw, self.source)
    }
}

impl std::error::Error for InvalidTimestamp {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Why a timestamp was rejected.
#[derive(Debug)]
pub enum TimestampFault {
    /// chrono could not parse the text against the format.
    Format(chrono::ParseError),

    /// Seconds field of 60. chrono reads it as a leap second; the log
    /// format only allows 00-59.
    LeapSecond,
}

impl fmt::Display for TimestampFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "{e}"),
            Self::LeapSecond => write!(f, "seconds value out of range (60)"),
        }
    }
}

impl std::error::Error for TimestampFault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            Self::LeapSecond => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors raised while loading a day's log file. Both are fatal for the load.
#[derive(Debug)]
pub enum ParseError {
    /// A line matched the request pattern but carried an unparseable timestamp.
    /// Treated as corrupted input: the whole load is aborted.
    MalformedTimestamp {
        file: PathBuf,
        line_number: u64,
        raw_timestamp: String,
        format: &'static str,
        source: TimestampFault,
    },

    /// I/O error while reading an existing log file.
    Io { file: PathBuf, source: io::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTimestamp {
                file,
                line_number,
                raw_timestamp,
                format,
                source,
            } => write!(
                f,
                "'{}' line {line_number}: cannot parse timestamp \
                 '{raw_timestamp}' with format '{format}': {source}",
                file.display()
            ),
            Self::Io { file, source } => {
                write!(f, "'{}': I/O error: {source}", file.display())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedTimestamp { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ParseError> for AnalyzerError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to producing the xlsx artifact.
#[derive(Debug)]
pub enum ExportError {
    /// Workbook construction or serialisation failed.
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// A sheet would exceed the xlsx row limit.
    TooManyRows { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xlsx { path, source } => {
                write!(f, "xlsx export error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::TooManyRows { count, max } => write!(
                f,
                "Sheet of {count} rows exceeds the xlsx maximum of {max} rows"
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xlsx { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::TooManyRows { .. } => None,
        }
    }
}

impl From<ExportError> for AnalyzerError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for ReqLog results.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_display_carries_file_and_line() {
        let source = chrono::NaiveDateTime::parse_from_str("2024-13-01 00:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap_err();
        let err = ParseError::MalformedTimestamp {
            file: PathBuf::from("logs/client-requests.2024-01-15.log"),
            line_number: 7,
            raw_timestamp: "2024-13-01 00:00:00".to_string(),
            format: "%Y-%m-%d %H:%M:%S",
            source: TimestampFault::Format(source),
        };
        let msg = err.to_string();
        assert!(msg.contains("client-requests.2024-01-15.log"));
        assert!(msg.contains("line 7"));
        assert!(msg.contains("2024-13-01 00:00:00"));
    }

    #[test]
    fn test_leap_second_fault_has_no_chrono_source() {
        let err = InvalidTimestamp {
            raw: "2024-01-15 10:30:60".to_string(),
            source: TimestampFault::LeapSecond,
        };
        assert!(err.to_string().contains("2024-01-15 10:30:60"));
        assert!(err.to_string().contains("out of range"));
        assert!(err.source().unwrap().source().is_none());
    }

    #[test]
    fn test_top_level_error_keeps_source_chain() {
        let err: AnalyzerError = ParseError::Io {
            file: PathBuf::from("x.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(err.to_string().starts_with("Log read failed"));
        let parse = err.source().expect("parse error source");
        assert!(parse.source().is_some(), "io error should be reachable");
    }
}
