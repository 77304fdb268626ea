//! Fetch worker implementation.
//!
//! Each dispatched request becomes one tokio task. The task only talks to the
//! [`SearchClient`] and the completion channel; it never touches shared
//! session state.

use crate::client::SearchClient;
use crate::worker::{FetchCompletion, FetchRequest};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Runs fetches on the async runtime and reports completions over a channel.
#[derive(Clone)]
pub struct FetchWorker {
    /// Remote search implementation shared by all fetch tasks.
    client: Arc<dyn SearchClient>,

    /// Completion channel back to the controlling loop.
    completions: mpsc::UnboundedSender<FetchCompletion>,
}

impl FetchWorker {
    /// Creates a worker and the receiving end of its completion channel.
    #[must_use]
    pub fn new(client: Arc<dyn SearchClient>) -> (Self, mpsc::UnboundedReceiver<FetchCompletion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        (Self { client, completions }, receiver)
    }

    /// Starts executing `request` in the background.
    ///
    /// Must be called from within a tokio runtime. The completion is delivered
    /// even if the request has been superseded in the meantime; discarding it
    /// is the session's job.
    pub fn dispatch(&self, request: FetchRequest) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let completions = self.completions.clone();
        let span = tracing::debug_span!(
            "fetch_task",
            generation = request.generation,
            term = %request.term,
            start_index = request.start_index,
            chunk_size = request.chunk_size
        );

        tokio::spawn(
            async move {
                let outcome = client
                    .search(&request.term, request.start_index, request.chunk_size)
                    .await;

                match &outcome {
                    Ok(page) => tracing::debug!(item_count = page.len(), "fetch finished"),
                    Err(e) => tracing::debug!(error = %e, "fetch failed"),
                }

                if completions.send(FetchCompletion::new(request, outcome)).is_err() {
                    tracing::debug!("completion receiver dropped, discarding fetch result");
                }
            }
            .instrument(span),
        )
    }
}

impl std::fmt::Debug for FetchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchWorker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{Result, SearchError};
    use crate::domain::{ResultItem, ResultPage};
    use futures_util::future::BoxFuture;

    struct EchoClient;

    impl SearchClient for EchoClient {
        fn search<'a>(
            &'a self,
            term: &'a str,
            start_index: usize,
            chunk_size: usize,
        ) -> BoxFuture<'a, Result<ResultPage>> {
            Box::pin(async move {
                if term == "fail" {
                    return Err(SearchError::Network("boom".to_string()));
                }
                let item = ResultItem::new(format!("{term}@{start_index}"), "https://img/echo");
                Ok(ResultPage::new(vec![item], chunk_size))
            })
        }
    }

    fn request(term: &str, generation: u64) -> FetchRequest {
        FetchRequest {
            generation,
            term: term.to_string(),
            start_index: 11,
            chunk_size: 10,
        }
    }

    #[tokio::test]
    async fn completion_carries_request_and_page() {
        let (worker, mut completions) = FetchWorker::new(Arc::new(EchoClient));
        worker.dispatch(request("cats", 3)).await.unwrap();

        let completion = completions.recv().await.unwrap();
        assert_eq!(completion.generation(), 3);
        assert_eq!(completion.request, request("cats", 3));
        let page = completion.outcome.unwrap();
        assert_eq!(page.items[0].title, "cats@11");
    }

    #[tokio::test]
    async fn failures_are_reported_not_dropped() {
        let (worker, mut completions) = FetchWorker::new(Arc::new(EchoClient));
        worker.dispatch(request("fail", 1)).await.unwrap();

        let completion = completions.recv().await.unwrap();
        assert!(matches!(completion.outcome, Err(SearchError::Network(_))));
    }

    #[tokio::test]
    async fn dropped_receiver_does_not_panic_task() {
        let (worker, completions) = FetchWorker::new(Arc::new(EchoClient));
        drop(completions);
        worker.dispatch(request("cats", 1)).await.unwrap();
    }
}
