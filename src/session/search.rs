//! Search session state machine.
//!
//! [`SearchSession`] is synchronous: operations that need the network return a
//! [`FetchRequest`] for the caller to execute, and the eventual
//! [`FetchCompletion`] is handed back through [`SearchSession::apply`]. This
//! keeps every store and cursor mutation on the caller's execution context.
//!
//! # Invariants
//!
//! - At most one fetch per generation is outstanding. A next-page request made
//!   while `Fetching` is ignored.
//! - Only the completion answering the outstanding request is applied. One
//!   from a superseded generation, or a duplicate, never touches the store,
//!   the cursor, or the persisted state.
//! - A failed fetch leaves the cursor exactly where it was.

use crate::domain::error::Result;
use crate::domain::{ResultPage, SearchError, SessionState};
use crate::session::observer::SessionObserver;
use crate::session::phase::{CompletionOutcome, SessionPhase};
use crate::storage::SessionPersistence;
use crate::store::{ResultReader, ResultStore};
use crate::worker::{FetchCompletion, FetchRequest};
use std::sync::Arc;

/// Number of results requested per page. The remote API rejects larger chunks.
pub const CHUNK_SIZE: usize = 10;

/// Owns the active search and its pagination cursor.
pub struct SearchSession {
    /// Accumulated results; the session is its only writer.
    store: Arc<ResultStore>,

    /// Durable home of the cursor.
    persistence: Box<dyn SessionPersistence>,

    /// Presentation components to notify.
    observers: Vec<Arc<dyn SessionObserver>>,

    /// Cursor of the active search, `None` before the first search.
    state: Option<SessionState>,

    phase: SessionPhase,

    /// Bumped by every new search; completions from older generations are stale.
    generation: u64,

    /// The one request whose completion will be applied.
    pending: Option<FetchRequest>,

    chunk_size: usize,
}

impl SearchSession {
    /// Creates a session, resuming a persisted search when possible.
    ///
    /// A persisted cursor is only trusted if `store` still holds results (for
    /// example because they were restored from an archive). With an empty store
    /// the cursor would point past results nobody has, so it is ignored and the
    /// session starts idle with no search.
    ///
    /// # Errors
    ///
    /// Returns an error if the persistence backend fails to load.
    pub fn new(
        store: Arc<ResultStore>,
        persistence: Box<dyn SessionPersistence>,
        chunk_size: usize,
    ) -> Result<Self> {
        let persisted = persistence.load()?;

        let (state, phase) = match persisted {
            Some(state) if !store.is_empty() => {
                let phase = if state.has_more {
                    SessionPhase::Idle
                } else {
                    SessionPhase::Exhausted
                };
                tracing::debug!(
                    term = %state.search_term,
                    next_start_index = state.next_start_index,
                    has_more = state.has_more,
                    stored = store.count(),
                    "resuming persisted search session"
                );
                (Some(state), phase)
            }
            Some(state) => {
                tracing::debug!(
                    term = %state.search_term,
                    "discarding persisted cursor, no results in memory"
                );
                (None, SessionPhase::Idle)
            }
            None => (None, SessionPhase::Idle),
        };

        Ok(Self {
            store,
            persistence,
            observers: Vec::new(),
            state,
            phase,
            generation: 0,
            pending: None,
            chunk_size,
        })
    }

    /// Registers an observer for lifecycle callbacks.
    pub fn add_observer(&mut self, observer: Arc<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read-only handle to the accumulated results.
    #[must_use]
    pub fn results(&self) -> ResultReader {
        self.store.reader()
    }

    /// Starts a new search for `term`, abandoning the current one.
    ///
    /// Valid in every phase. Any outstanding fetch is fenced off by bumping the
    /// generation, the store is cleared, the cursor is reset to index 1, and
    /// observers are told before the first page is requested.
    ///
    /// Returns the request for the first page.
    pub fn start_new_search(&mut self, term: &str) -> FetchRequest {
        let _span = tracing::debug_span!("start_new_search", term = %term).entered();

        self.generation = self.generation.wrapping_add(1);
        self.store.clear();

        let state = SessionState::new(term);
        if self.persistence.archives_results() {
            if let Err(e) = self.persistence.save_session(&state, Some(&[])) {
                tracing::warn!(error = %e, "failed to reset archived session");
            }
        }

        self.state = Some(state);
        for observer in &self.observers {
            observer.on_new_search(term);
        }

        tracing::debug!(generation = self.generation, "new search started");
        self.issue_fetch(term.to_string(), 1)
    }

    /// Requests the next page of the active search.
    ///
    /// Returns `None` without side effects when a fetch is already in flight or
    /// no search has been started. From `Error` this re-requests the page that
    /// failed.
    pub fn fetch_next_page(&mut self) -> Option<FetchRequest> {
        if self.phase.is_fetching() {
            tracing::debug!(generation = self.generation, "fetch already in flight, ignoring");
            return None;
        }

        let Some(state) = self.state.as_ref() else {
            tracing::debug!("no active search, ignoring next page request");
            return None;
        };

        let term = state.search_term.clone();
        let start_index = state.next_start_index;
        Some(self.issue_fetch(term, start_index))
    }

    fn issue_fetch(&mut self, term: String, start_index: usize) -> FetchRequest {
        self.phase = SessionPhase::Fetching;
        let request = FetchRequest {
            generation: self.generation,
            term,
            start_index,
            chunk_size: self.chunk_size,
        };
        self.pending = Some(request.clone());
        tracing::debug!(
            generation = request.generation,
            start_index = request.start_index,
            chunk_size = request.chunk_size,
            "fetch issued"
        );
        request
    }

    /// Applies a fetch completion delivered by the worker.
    ///
    /// On success the page is merged, the cursor advanced, the state persisted,
    /// and observers notified. On failure observers are notified and the
    /// session moves to `Error` with the cursor untouched. Completions from a
    /// superseded generation are dropped without any effect.
    pub fn apply(&mut self, completion: FetchCompletion) -> CompletionOutcome {
        let FetchCompletion { request, outcome } = completion;
        let _span = tracing::debug_span!("apply_completion",
            generation = request.generation,
            start_index = request.start_index
        )
        .entered();

        if request.generation != self.generation {
            tracing::debug!(current = self.generation, "discarding stale completion");
            return CompletionOutcome::Stale {
                generation: request.generation,
                current: self.generation,
            };
        }

        if self.pending.as_ref() != Some(&request) {
            tracing::debug!(phase = ?self.phase, "completion does not answer the outstanding fetch, discarding");
            return CompletionOutcome::Unexpected;
        }
        self.pending = None;

        match outcome {
            Ok(page) => self.merge_page(page),
            Err(error) => self.record_failure(error),
        }
    }

    fn merge_page(&mut self, page: ResultPage) -> CompletionOutcome {
        let Some(state) = self.state.as_mut() else {
            self.phase = SessionPhase::Idle;
            return CompletionOutcome::Unexpected;
        };

        state.advance(&page);
        let has_more = state.has_more;
        let appended = self.store.append(page.items);

        // Cursor and archive go out in one write so a restart never resumes
        // past results that were not archived.
        let archive = self
            .persistence
            .archives_results()
            .then(|| self.store.snapshot());
        if let Err(e) = self.persistence.save_session(state, archive.as_deref()) {
            tracing::warn!(error = %e, "failed to persist session state");
        }

        tracing::debug!(
            appended,
            next_start_index = state.next_start_index,
            has_more,
            total = self.store.count(),
            "page merged"
        );

        for observer in &self.observers {
            observer.on_results(has_more);
        }

        self.phase = if has_more {
            SessionPhase::Idle
        } else {
            SessionPhase::Exhausted
        };

        CompletionOutcome::Applied { appended, has_more }
    }

    fn record_failure(&mut self, error: SearchError) -> CompletionOutcome {
        tracing::debug!(error = %error, "fetch failed, cursor unchanged");

        for observer in &self.observers {
            observer.on_error(&error);
        }
        self.phase = SessionPhase::Error;

        CompletionOutcome::Failed(error)
    }
}

impl std::fmt::Debug for SearchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("generation", &self.generation)
            .field("chunk_size", &self.chunk_size)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
