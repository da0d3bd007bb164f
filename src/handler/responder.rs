//! Stored-file responses.
//!
//! Given an extracted file identifier, look the file up in the store,
//! honor conditional headers, and build the HTTP response. Malformed and
//! unknown identifiers are indistinguishable to the client: both are 404.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http::{self, Conditions};
use crate::store::{FileStore, LookupError, StoreFault};

/// Serve the file stored under `id`.
///
/// A conditional hit answers 304 before any content byte is read from the
/// store. `Err` is only returned for store faults outside the two mapped
/// lookup failures; those propagate to the caller unhandled.
pub async fn respond(
    store: &dyn FileStore,
    id: &str,
    conditions: &Conditions,
    is_head: bool,
    not_found_includes_id: bool,
) -> Result<Response<Full<Bytes>>, StoreFault> {
    let mut file = match store.open_for_read(id).await {
        Ok(file) => file,
        Err(LookupError::InvalidIdentifier(_) | LookupError::NotFound(_)) => {
            return Ok(http::build_not_found_response(
                not_found_includes_id.then_some(id),
            ));
        }
        Err(LookupError::Backend(fault)) => return Err(fault),
    };

    let last_modified = http::http_date(file.upload_date());
    if conditions.still_fresh(file.id(), &last_modified) {
        return Ok(http::build_not_modified_response());
    }

    let content = file.read_all().await?;
    Ok(http::build_file_response(
        content,
        file.content_type(),
        file.id(),
        &last_modified,
        is_head,
    ))
}
