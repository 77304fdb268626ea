//! Search client abstraction.
//!
//! The trait is deliberately minimal: one call per chunk. Implementations must be
//! `Send + Sync` because fetches run on runtime worker threads, away from the
//! thread that owns the session.

use crate::domain::error::Result;
use crate::domain::ResultPage;
use futures_util::future::BoxFuture;

/// Fetches one page of image results.
///
/// # Errors
///
/// Implementations return [`crate::SearchError::Network`] for transport failures
/// and non-success statuses, and [`crate::SearchError::MalformedResponse`] when the
/// payload does not have the expected shape. A successful response without
/// results is an empty page, never an error.
///
/// # Examples
///
/// ```
/// use futures_util::future::BoxFuture;
/// use picsearch::client::SearchClient;
/// use picsearch::domain::{ResultItem, ResultPage};
///
/// struct Fixed;
///
/// impl SearchClient for Fixed {
///     fn search<'a>(
///         &'a self,
///         term: &'a str,
///         _start_index: usize,
///         chunk_size: usize,
///     ) -> BoxFuture<'a, picsearch::Result<ResultPage>> {
///         let item = ResultItem::new(term, "https://img/1");
///         Box::pin(async move { Ok(ResultPage::new(vec![item], chunk_size)) })
///     }
/// }
/// ```
pub trait SearchClient: Send + Sync {
    /// Requests `chunk_size` results for `term` starting at the 1-based
    /// `start_index`.
    fn search<'a>(
        &'a self,
        term: &'a str,
        start_index: usize,
        chunk_size: usize,
    ) -> BoxFuture<'a, Result<ResultPage>>;
}
