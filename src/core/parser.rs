// ReqLog - core/parser.rs
//
// Line-oriented parsing of client request log lines.
// Core layer: accepts BufRead trait objects, never touches the filesystem.
//
// A line yields a LogEntry only when it carries the whole request trailer:
//
//   <yyyy-MM-dd HH:mm:ss> ... Client Request - IP: <ip>, Method: <method>,
//   URI: <uri>, User-Agent: <ua>
//
// Anything else (startup banners, other loggers) is skipped silently.

use crate::core::model::LogEntry;
use crate::util::constants::{DEBUG_MAX_LINE_PREVIEW, TIMESTAMP_FORMAT};
use crate::util::error::{InvalidTimestamp, ParseError, TimestampFault};
use chrono::{NaiveDateTime, Timelike};
use regex::Regex;
use std::io::BufRead;
use std::path::Path;
use std::sync::OnceLock;

/// Request line pattern.
///
/// `ip`, `method` and `uri` stop at the next comma; `ua` runs to end of line.
/// Digits are ASCII-only so a structural match implies a 19-byte timestamp.
const LINE_PATTERN: &str = concat!(
    r"(?P<timestamp>[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})",
    r".*Client Request - ",
    r"IP: (?P<ip>[^,]+), ",
    r"Method: (?P<method>[^,]+), ",
    r"URI: (?P<uri>[^,]+), ",
    r"User-Agent: (?P<ua>.*)$",
);

fn line_regex() -> &'static Regex {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    LINE_RE.get_or_init(|| Regex::new(LINE_PATTERN).expect("parser: invalid line pattern"))
}

/// Parse a single log line.
///
/// Returns `Ok(None)` for lines that do not carry the full request trailer,
/// including lines whose IP, method, or URI is blank after trimming.
///
/// # Errors
/// `InvalidTimestamp` when the structure matched but the timestamp is not a
/// real date-time (e.g. month 13). The pattern and the date format form one
/// contract, so this is reported rather than skipped.
pub fn parse_line(line: &str) -> Result<Option<LogEntry>, InvalidTimestamp> {
    let Some(caps) = line_regex().captures(line) else {
        return Ok(None);
    };

    let field = |name: &str| caps.name(name).map_or("", |m| m.as_str().trim());

    let client_ip = field("ip");
    let method = field("method");
    let uri = field("uri");
    if client_ip.is_empty() || method.is_empty() || uri.is_empty() {
        tracing::trace!(line = preview(line), "Request line with blank field skipped");
        return Ok(None);
    }

    let raw_ts = field("timestamp");
    let invalid = |source: TimestampFault| InvalidTimestamp {
        raw: raw_ts.to_string(),
        source,
    };
    let timestamp = NaiveDateTime::parse_from_str(raw_ts, TIMESTAMP_FORMAT)
        .map_err(|e| invalid(TimestampFault::Format(e)))?;
    // chrono stores a parsed ":60" as 59s plus a whole extra second of nanos.
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(invalid(TimestampFault::LeapSecond));
    }

    tracing::trace!(line = preview(line), uri, "Matched request line");

    Ok(Some(LogEntry {
        timestamp,
        client_ip: client_ip.to_string(),
        method: method.to_string(),
        uri: uri.to_string(),
        user_agent: field("ua").to_string(),
    }))
}

/// Parse every line of `reader` in order, keeping only matching lines.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`.
/// Invalid UTF-8 is replaced rather than rejected so one stray byte cannot
/// hide a whole day of traffic. `file_path` is used for error context only.
///
/// # Errors
/// - `ParseError::Io` if reading fails part-way.
/// - `ParseError::MalformedTimestamp` on the first matched line whose
///   timestamp does not parse; the whole load is aborted.
pub fn parse_reader<R: BufRead>(mut reader: R, file_path: &Path) -> Result<Vec<LogEntry>, ParseError> {
    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut line_number: u64 = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ParseError::Io {
                file: file_path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        let text = text.trim_end_matches(['\n', '\r']);

        // A lone '\r' also ends a line (old Mac style endings).
        for line in text.split('\r') {
            line_number += 1;
            match parse_line(line) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(InvalidTimestamp { raw, source }) => {
                    tracing::warn!(
                        file = %file_path.display(),
                        line_number,
                        raw_timestamp = %raw,
                        "Matched request line has a malformed timestamp; aborting load"
                    );
                    return Err(ParseError::MalformedTimestamp {
                        file: file_path.to_path_buf(),
                        line_number,
                        raw_timestamp: raw,
                        format: TIMESTAMP_FORMAT,
                        source,
                    });
                }
            }
        }
    }

    tracing::debug!(
        file = %file_path.display(),
        entries = entries.len(),
        lines = line_number,
        "Parsing complete"
    );

    Ok(entries)
}

/// Truncate a line for debug output.
fn preview(line: &str) -> &str {
    match line.char_indices().nth(DEBUG_MAX_LINE_PREVIEW) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
