//! HTTP implementation of [`SearchClient`].
//!
//! Requests are `GET {base_url}/customsearch/v1` with the query parameters
//! `key`, `cx`, `searchType=image`, `num`, `start` and `q`. `reqwest`
//! URL-encodes every value, so search terms are passed through verbatim.

use super::backend::SearchClient;
use super::response::parse_page;
use crate::domain::error::{Result, SearchError};
use crate::domain::ResultPage;
use crate::Config;
use futures_util::future::BoxFuture;
use std::time::Duration;
use tracing::Instrument;

/// Path of the image search endpoint, relative to the base URL.
const SEARCH_PATH: &str = "/customsearch/v1";

/// `searchType` value selecting image results.
const IMAGE_SEARCH_TYPE: &str = "image";

/// Search client backed by a shared `reqwest::Client`.
///
/// The client enforces a total request timeout; expiry surfaces as
/// [`SearchError::Network`].
#[derive(Clone)]
pub struct HttpSearchClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    search_engine_id: String,
}

impl HttpSearchClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Network`] if the underlying HTTP client cannot be
    /// constructed (for example when no TLS backend is available).
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_endpoint(
            &config.base_url,
            &config.api_key,
            &config.search_engine_id,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Builds a client against an explicit endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Network`] if the HTTP client cannot be built.
    pub fn with_endpoint(
        base_url: &str,
        api_key: &str,
        search_engine_id: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            search_engine_id: search_engine_id.to_string(),
        })
    }

    /// Builds the GET request for one chunk without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Network`] if the configured base URL is not a
    /// valid URL.
    pub fn build_request(
        &self,
        term: &str,
        start_index: usize,
        chunk_size: usize,
    ) -> Result<reqwest::Request> {
        let num = chunk_size.to_string();
        let start = start_index.to_string();

        self.client
            .get(format!("{}{SEARCH_PATH}", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.search_engine_id.as_str()),
                ("searchType", IMAGE_SEARCH_TYPE),
                ("num", num.as_str()),
                ("start", start.as_str()),
                ("q", term),
            ])
            .build()
            .map_err(|e| SearchError::Network(format!("invalid search request: {e}")))
    }
}

impl SearchClient for HttpSearchClient {
    fn search<'a>(
        &'a self,
        term: &'a str,
        start_index: usize,
        chunk_size: usize,
    ) -> BoxFuture<'a, Result<ResultPage>> {
        let span = tracing::debug_span!("http_search", term = %term, start_index, chunk_size);

        Box::pin(
            async move {
                let request = self.build_request(term, start_index, chunk_size)?;
                tracing::debug!("sending search request");

                let response = self.client.execute(request).await?;
                let status = response.status();
                if !status.is_success() {
                    tracing::debug!(status = %status, "search request rejected");
                    return Err(SearchError::Network(format!(
                        "search API returned status {status}"
                    )));
                }

                let body = response.text().await?;
                let page = parse_page(&body, chunk_size)?;

                tracing::debug!(item_count = page.len(), "search response received");
                Ok(page)
            }
            .instrument(span),
        )
    }
}

impl std::fmt::Debug for HttpSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSearchClient")
            .field("base_url", &self.base_url)
            .field("search_engine_id", &self.search_engine_id)
            .finish_non_exhaustive()
    }
}
