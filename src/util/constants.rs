// ReqLog - util/constants.rs
//
// Single source of truth for all named constants, file-name conventions,
// sheet labels, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ReqLog";

/// Application identifier used for config directories.
pub const APP_ID: &str = "ReqLog";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed signal returned by the health operation.
pub const HEALTH_OK: &str = "I'm OK";

// =============================================================================
// Log source conventions
// =============================================================================

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Source file name prefix: `client-requests.<date>.log`.
pub const SOURCE_FILE_PREFIX: &str = "client-requests.";

/// Source file name extension.
pub const SOURCE_FILE_EXTENSION: &str = ".log";

/// Timestamp format shared by the parser and the detail sheet.
/// Parsing and rendering must use the same pattern so timestamps round-trip.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Export conventions
// =============================================================================

/// Export file name prefix: `client-requests-<date>.xlsx`.
pub const EXPORT_FILE_PREFIX: &str = "client-requests-";

/// Export file name extension.
pub const EXPORT_FILE_EXTENSION: &str = ".xlsx";

/// MIME type of the exported workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Maximum number of rows in a single xlsx worksheet.
pub const MAX_SHEET_ROWS: usize = 1_048_576;

/// Detail sheet name ("request details").
pub const DETAIL_SHEET_NAME: &str = "요청 상세";

/// Detail sheet header row: time, IP, method, URI, User-Agent.
pub const DETAIL_HEADERS: [&str; 5] = ["시간", "IP", "메소드", "URI", "User-Agent"];

/// Statistics sheet name.
pub const STATS_SHEET_NAME: &str = "통계";

/// Statistics section header row: category, request count.
pub const STATS_HEADERS: [&str; 2] = ["구분", "요청 수"];

/// Section title for per-IP counts.
pub const STATS_TITLE_IP: &str = "IP별 요청 수";

/// Section title for per-URI counts.
pub const STATS_TITLE_URI: &str = "URI별 요청 수";

/// Section title for per-method counts.
pub const STATS_TITLE_METHOD: &str = "메소드별 요청 수";

/// Rows every statistics section carries before its data rows (title + header).
pub const STATS_SECTION_PREAMBLE_ROWS: usize = 2;

/// Blank rows between stacked statistics sections.
pub const STATS_SECTION_GAP_ROWS: usize = 1;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Valid values for `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
