//! Error types for picsearch.
//!
//! This module defines the centralized error type [`SearchError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for picsearch operations.
///
/// The first three variants form the taxonomy a session observer cares about:
/// transport failures, unparseable payloads, and out-of-range reads. The rest
/// cover local concerns (persistence, filesystem, configuration).
///
/// # Examples
///
/// ```
/// use picsearch::SearchError;
///
/// let err = SearchError::Network("connection refused".to_string());
/// assert!(err.is_retryable());
///
/// let err = SearchError::OutOfRange { index: 3, count: 2 };
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Error)]
pub enum SearchError {
    /// The remote search call failed at the transport or HTTP level.
    ///
    /// Covers timeouts, DNS failures, refused connections, and any non-success
    /// HTTP status (including the client error the API returns for oversized
    /// chunks).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be parsed into the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A result index outside `[0, count)` was requested.
    #[error("Index {index} out of range for {count} stored results")]
    OutOfRange {
        /// The requested zero-based index.
        index: usize,
        /// The number of results stored at the time of the request.
        count: usize,
    },

    /// Persisted session data could not be encoded or decoded.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns true for failures of a remote fetch.
    ///
    /// A failed fetch leaves the session cursor untouched, so re-requesting the
    /// same page is always safe.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::MalformedResponse(_))
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {err}"))
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A specialized `Result` type for picsearch operations.
pub type Result<T> = std::result::Result<T, SearchError>;
