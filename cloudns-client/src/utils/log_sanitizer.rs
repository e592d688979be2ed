//! Log sanitization utilities
//!
//! ClouDNS takes credentials as ordinary request parameters, so request
//! dumps must be filtered before they reach a log. Response bodies (zone
//! exports, TXT payloads) are truncated.

use serde_json::Value;

use crate::auth::Auth;
use crate::http_client::HttpParams;

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Placeholder written in place of credential values.
const FILTERED: &str = "[filtered]";

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Render request parameters as JSON with every credential value replaced.
pub fn redact_params(params: &HttpParams) -> String {
    let redacted: serde_json::Map<String, Value> = params
        .iter()
        .map(|(key, value)| {
            let value = if Auth::sensitive_keys().contains(&key.as_str()) {
                Value::from(FILTERED)
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect();

    truncate_for_log(&Value::Object(redacted).to_string())
}
