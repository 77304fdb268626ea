//! Phase and outcome types for the search session.

use crate::domain::SearchError;

/// Where the session is in its fetch cycle.
///
/// `Exhausted` and `Error` are not terminal: a new search can start from any
/// phase, and a next-page request is accepted from every phase but `Fetching`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No fetch outstanding; more pages may exist.
    #[default]
    Idle,

    /// Exactly one fetch for the current generation is in flight.
    Fetching,

    /// The last page was short; further fetches are not expected to yield more.
    Exhausted,

    /// The last fetch failed; retrying re-requests the same page.
    Error,
}

impl SessionPhase {
    #[must_use]
    pub const fn is_fetching(self) -> bool {
        matches!(self, Self::Fetching)
    }
}

/// What applying a fetch completion did to the session.
#[derive(Debug)]
pub enum CompletionOutcome {
    /// The page was merged and the cursor advanced.
    Applied {
        /// Number of items appended to the store.
        appended: usize,
        /// Whether another page is expected.
        has_more: bool,
    },

    /// The fetch failed; observers were told and the cursor is unchanged.
    Failed(SearchError),

    /// The completion belongs to a superseded search and was dropped.
    Stale {
        /// Generation the completion was issued under.
        generation: u64,
        /// Generation that is current now.
        current: u64,
    },

    /// No fetch was outstanding for this generation; the completion was dropped.
    Unexpected,
}

impl CompletionOutcome {
    /// True when the completion changed the store or the cursor.
    #[must_use]
    pub const fn was_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}
