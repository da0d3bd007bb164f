//! Conditional request evaluation.
//!
//! Stored files are immutable, so the identifier doubles as a strong
//! validator: it is sent verbatim as `Etag` (unquoted) and compared
//! verbatim against `If-None-Match`. `If-Modified-Since` is matched
//! against the upload date by comparing the formatted HTTP date strings,
//! not by parsing.

use chrono::{DateTime, Utc};
use hyper::header::HeaderMap;

/// Validators extracted from a request.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

impl Conditions {
    /// Pull the two conditional headers out of a request, if present.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            if_none_match: header_value(headers, "if-none-match"),
            if_modified_since: header_value(headers, "if-modified-since"),
        }
    }

    /// True when the client already holds the current version of the file.
    #[must_use]
    pub fn still_fresh(&self, etag: &str, last_modified: &str) -> bool {
        self.if_none_match.as_deref() == Some(etag)
            || self.if_modified_since.as_deref() == Some(last_modified)
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Format a timestamp as an RFC 7231 HTTP date, e.g.
/// `Sun, 06 Nov 1994 08:49:37 GMT`.
#[must_use]
pub fn http_date(when: DateTime<Utc>) -> String {
    when.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
