//! HTTP response building.
//!
//! Builders for the small set of responses the gateway produces, decoupled
//! from lookup logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 200 response carrying a stored file.
///
/// `Etag` is the raw identifier, unquoted. HEAD requests get the same
/// headers with an empty body.
pub fn build_file_response(
    content: Bytes,
    content_type: &str,
    etag: &str,
    last_modified: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head { Bytes::new() } else { content };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Last-Modified", last_modified)
        .header("Etag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 304 Not Modified response.
pub fn build_not_modified_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Not modified")))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 404 response for a missing or malformed file id.
///
/// The id is echoed back only when the gateway is configured to do so;
/// missing and malformed identifiers read the same either way.
pub fn build_not_found_response(id: Option<&str>) -> Response<Full<Bytes>> {
    let body = match id {
        Some(id) => format!("File not found: {id}"),
        None => "File not found.".to_string(),
    };

    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("File not found.")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
