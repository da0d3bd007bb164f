//! Error kinds surfaced by the store layer.

use thiserror::Error;

/// Failure to establish or authenticate the store connection at startup.
///
/// Fatal: the gateway refuses to start without a usable handle.
#[derive(Debug, Error)]
#[error("unable to connect to the file store ({cause})")]
pub struct ConnectionError {
    cause: String,
}

impl ConnectionError {
    #[must_use]
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

/// An unclassified store failure.
///
/// Lookup faults that are neither [`LookupError::InvalidIdentifier`] nor
/// [`LookupError::NotFound`] end up here and propagate to the caller
/// instead of being turned into a response.
#[derive(Debug, Error)]
#[error("file store failure: {0}")]
pub struct StoreFault(pub String);

/// Outcome categories for a file lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The identifier is not a well-formed store identifier.
    #[error("malformed file id: {0}")]
    InvalidIdentifier(String),

    /// The identifier is well formed but no file is stored under it.
    #[error("no file stored under id: {0}")]
    NotFound(String),

    /// Anything else the store reported.
    #[error(transparent)]
    Backend(#[from] StoreFault),
}
