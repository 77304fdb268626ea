//! Shared fixtures for integration tests.

#![allow(dead_code)]

use futures_util::future::BoxFuture;
use picsearch::client::SearchClient;
use picsearch::{ResultItem, ResultPage, SearchError, SessionObserver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{mpsc, Semaphore};

/// One recorded call to [`ScriptedClient::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub term: String,
    pub start_index: usize,
    pub chunk_size: usize,
}

/// In-memory search backend with a fixed catalogue.
///
/// - `cats`: 14 results
/// - `dogs`: 25 results
/// - `zzznotfound`: no results
/// - `slow`: 30 results, each call waits for [`ScriptedClient::release`]
/// - `flaky`: 30 results, pages after the first fail while failures remain
pub struct ScriptedClient {
    calls: Mutex<Vec<Call>>,
    failures_left: AtomicUsize,
    gate: Semaphore,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures_left: AtomicUsize::new(0),
            gate: Semaphore::new(0),
        }
    }

    pub fn failing(times: usize) -> Self {
        let client = Self::new();
        client.failures_left.store(times, Ordering::SeqCst);
        client
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Lets one gated `slow` call proceed.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    fn total_for(term: &str) -> usize {
        match term {
            "cats" => 14,
            "dogs" => 25,
            "slow" | "flaky" => 30,
            _ => 0,
        }
    }
}

pub fn page_of(term: &str, start_index: usize, count: usize, chunk_size: usize) -> ResultPage {
    let items = (0..count)
        .map(|i| {
            let n = start_index + i;
            ResultItem::new(format!("{term} #{n}"), format!("https://img.example/{term}/{n}.jpg"))
        })
        .collect();
    ResultPage::new(items, chunk_size)
}

impl SearchClient for ScriptedClient {
    fn search<'a>(
        &'a self,
        term: &'a str,
        start_index: usize,
        chunk_size: usize,
    ) -> BoxFuture<'a, picsearch::Result<ResultPage>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(Call {
                term: term.to_string(),
                start_index,
                chunk_size,
            });

            if term == "slow" {
                let permit = self.gate.acquire().await.unwrap();
                permit.forget();
            }

            if term == "flaky" && start_index > 1 {
                let left = self.failures_left.load(Ordering::SeqCst);
                if left > 0 {
                    self.failures_left.store(left - 1, Ordering::SeqCst);
                    return Err(SearchError::Network("connection reset".to_string()));
                }
            }

            let remaining = Self::total_for(term).saturating_sub(start_index - 1);
            Ok(page_of(term, start_index, remaining.min(chunk_size), chunk_size))
        })
    }
}

/// Observer that logs callbacks and forwards them over a channel.
pub struct Recorder {
    events: Mutex<Vec<String>>,
    tx: mpsc::UnboundedSender<String>,
}

impl Recorder {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                events: Mutex::new(Vec::new()),
                tx,
            },
            rx,
        )
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event.clone());
        let _ = self.tx.send(event);
    }
}

impl SessionObserver for Recorder {
    fn on_new_search(&self, term: &str) {
        self.push(format!("new:{term}"));
    }

    fn on_results(&self, has_more: bool) {
        self.push(format!("results:{has_more}"));
    }

    fn on_error(&self, _error: &SearchError) {
        self.push("error".to_string());
    }
}
