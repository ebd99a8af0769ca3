// ReqLog - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Log Entry (output of parsing)
// =============================================================================

/// A single client request recovered from a log line.
///
/// Only produced when the whole request trailer matched; every string
/// field is already trimmed. `user_agent` may be empty, the others never are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local request time, second precision.
    pub timestamp: NaiveDateTime,

    /// Client address as logged.
    pub client_ip: String,

    /// HTTP verb token.
    pub method: String,

    /// Request path. Never contains a comma.
    pub uri: String,

    /// User-Agent header value; may itself contain commas.
    pub user_agent: String,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Request counts keyed by IP, URI, or method.
///
/// Keys keep first-seen order so the statistics sheet lays out identically
/// for identical input. Every count is at least 1.
pub type RequestCounts = IndexMap<String, usize>;

// =============================================================================
// Analysis reports
// =============================================================================

/// Aggregated view of one day's requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub total_requests: usize,
    pub requests_by_ip: RequestCounts,
    pub requests_by_uri: RequestCounts,
    pub requests_by_method: RequestCounts,
}

/// Returned when the requested day has no recorded requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoDataReport {
    pub message: String,
    pub total_requests: usize,
}

/// Result of the analyze operation.
///
/// Serialises without a tag, so callers see either the summary object or
/// the `{ message, totalRequests: 0 }` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    NoData(NoDataReport),
    Summary(RequestSummary),
}

impl Analysis {
    /// Total number of parsed requests behind this report.
    pub fn total_requests(&self) -> usize {
        match self {
            Analysis::NoData(report) => report.total_requests,
            Analysis::Summary(summary) => summary.total_requests,
        }
    }
}

// =============================================================================
// Export artifact
// =============================================================================

/// A written workbook, described for a caller that streams it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Full path of the written file.
    pub path: PathBuf,

    /// Bare file name (`client-requests-<date>.xlsx`).
    pub file_name: String,

    /// MIME type of the workbook.
    pub content_type: &'static str,
}

impl ExportArtifact {
    /// `Content-Disposition` value for serving the artifact as a download.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}
