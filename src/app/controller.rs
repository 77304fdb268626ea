//! Controlling execution context for a search session.
//!
//! [`SearchController`] owns the [`SearchSession`], the [`FetchWorker`] and the
//! completion receiver. Fetches run as background tasks; their completions are
//! applied here, one at a time, so the session is never mutated concurrently.

use crate::app::{handle_event, Action, Command, Event};
use crate::client::SearchClient;
use crate::session::SearchSession;
use crate::worker::{FetchCompletion, FetchWorker};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Drives a [`SearchSession`] from commands and fetch completions.
pub struct SearchController {
    session: SearchSession,
    worker: FetchWorker,
    completions: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl SearchController {
    #[must_use]
    pub fn new(session: SearchSession, client: Arc<dyn SearchClient>) -> Self {
        let (worker, completions) = FetchWorker::new(client);
        Self {
            session,
            worker,
            completions,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Mutable access for setup such as registering observers.
    pub fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    /// Handles one event and executes the resulting actions.
    ///
    /// Fetch actions are dispatched to the worker, so this must be called from
    /// within a tokio runtime. Returns `false` once the controller should stop.
    pub fn handle(&mut self, event: Event) -> bool {
        let (_, actions) = handle_event(&mut self.session, event);

        let mut keep_running = true;
        for action in actions {
            match action {
                Action::Fetch(request) => {
                    self.worker.dispatch(request);
                }
                Action::Stop => keep_running = false,
            }
        }
        keep_running
    }

    /// Applies completions until no fetch is outstanding.
    ///
    /// Stale completions from superseded searches are consumed and dropped on
    /// the way.
    pub async fn settle(&mut self) {
        while self.session.phase().is_fetching() {
            let Some(completion) = self.completions.recv().await else {
                break;
            };
            self.handle(Event::FetchCompleted(completion));
        }
    }

    /// Runs until the command channel closes or [`Command::Shutdown`] arrives,
    /// then hands the session back.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> SearchSession {
        tracing::debug!("search controller started");

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else {
                        tracing::debug!("command channel closed");
                        break;
                    };
                    if !self.handle(Event::Command(command)) {
                        break;
                    }
                }
                Some(completion) = self.completions.recv() => {
                    self.handle(Event::FetchCompleted(completion));
                }
            }
        }

        tracing::debug!(generation = self.session.generation(), "search controller stopped");
        self.session
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
