// ReqLog - core/aggregate.rs
//
// Frequency counts over parsed entries. Pure functions, no state.

use crate::core::model::{LogEntry, RequestCounts, RequestSummary};

/// Group `entries` by `key` and count members, keeping first-seen key order.
pub fn count_by<F>(entries: &[LogEntry], key: F) -> RequestCounts
where
    F: Fn(&LogEntry) -> &str,
{
    let mut counts = RequestCounts::new();
    for entry in entries {
        let k = key(entry);
        match counts.get_mut(k) {
            Some(count) => *count += 1,
            None => {
                counts.insert(k.to_string(), 1);
            }
        }
    }
    counts
}

/// Requests per client IP.
pub fn requests_by_ip(entries: &[LogEntry]) -> RequestCounts {
    count_by(entries, |e| e.client_ip.as_str())
}

/// Requests per URI.
pub fn requests_by_uri(entries: &[LogEntry]) -> RequestCounts {
    count_by(entries, |e| e.uri.as_str())
}

/// Requests per HTTP method.
pub fn requests_by_method(entries: &[LogEntry]) -> RequestCounts {
    count_by(entries, |e| e.method.as_str())
}

/// All three groupings plus the total.
pub fn summarise(entries: &[LogEntry]) -> RequestSummary {
    RequestSummary {
        total_requests: entries.len(),
        requests_by_ip: requests_by_ip(entries),
        requests_by_uri: requests_by_uri(entries),
        requests_by_method: requests_by_method(entries),
    }
}
