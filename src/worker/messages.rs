//! Fetch request and completion messages.
//!
//! Both carry the session generation that was current when the fetch was
//! issued. The session compares it on delivery and drops completions that
//! belong to a superseded search.

use crate::domain::error::Result;
use crate::domain::ResultPage;

/// Parameters of one remote fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Session generation the request belongs to.
    pub generation: u64,

    /// Search term to query.
    pub term: String,

    /// 1-based index of the first result to request.
    pub start_index: usize,

    /// Number of results to request.
    pub chunk_size: usize,
}

/// Result of executing a [`FetchRequest`].
#[derive(Debug)]
pub struct FetchCompletion {
    /// The request this completion answers.
    pub request: FetchRequest,

    /// The page on success, or the fetch failure.
    pub outcome: Result<ResultPage>,
}

impl FetchCompletion {
    #[must_use]
    pub const fn new(request: FetchRequest, outcome: Result<ResultPage>) -> Self {
        Self { request, outcome }
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.request.generation
    }
}
