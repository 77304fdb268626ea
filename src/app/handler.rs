//! Event handling and session transition logic.
//!
//! [`handle_event`] is the single place where user commands and fetch
//! completions reach the [`SearchSession`]. It returns whether anything
//! visible changed plus the actions to execute; it performs no I/O.
//!
//! # Event Types
//!
//! - **Commands**: [`Command::Search`], [`Command::LoadMore`], [`Command::Shutdown`]
//! - **Worker**: [`Event::FetchCompleted`] carrying a [`FetchCompletion`]

use crate::app::Action;
use crate::session::{CompletionOutcome, SearchSession};
use crate::worker::FetchCompletion;

/// Requests coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Starts a new search, abandoning the current one.
    Search(String),

    /// Requests the next page of the current search.
    LoadMore,

    /// Stops the controller.
    Shutdown,
}

/// Everything the controller reacts to.
#[derive(Debug)]
pub enum Event {
    /// A command from the presentation layer.
    Command(Command),

    /// A background fetch finished, successfully or not.
    FetchCompleted(FetchCompletion),
}

impl From<Command> for Event {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

/// Processes an event, mutates the session, and returns actions to execute.
///
/// The returned flag is `true` when the result list or the session status
/// changed in a way the presentation layer should redraw.
pub fn handle_event(session: &mut SearchSession, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event_kind(&event)).entered();

    match event {
        Event::Command(Command::Search(term)) => {
            let request = session.start_new_search(&term);
            (true, vec![Action::Fetch(request)])
        }
        Event::Command(Command::LoadMore) => session.fetch_next_page().map_or_else(
            || {
                tracing::debug!(phase = ?session.phase(), "load more ignored");
                (false, vec![])
            },
            |request| (false, vec![Action::Fetch(request)]),
        ),
        Event::Command(Command::Shutdown) => (false, vec![Action::Stop]),
        Event::FetchCompleted(completion) => match session.apply(completion) {
            CompletionOutcome::Applied { appended, has_more } => {
                tracing::debug!(appended, has_more, "completion applied");
                (true, vec![])
            }
            CompletionOutcome::Failed(error) => {
                tracing::debug!(error = %error, retryable = error.is_retryable(), "completion failed");
                (true, vec![])
            }
            CompletionOutcome::Stale { .. } | CompletionOutcome::Unexpected => (false, vec![]),
        },
    }
}

const fn event_kind(event: &Event) -> &'static str {
    match event {
        Event::Command(Command::Search(_)) => "search",
        Event::Command(Command::LoadMore) => "load_more",
        Event::Command(Command::Shutdown) => "shutdown",
        Event::FetchCompleted(_) => "fetch_completed",
    }
}
