//! Storage record models for the persistence layer.
//!
//! These types are the on-disk representation and are kept separate from the
//! domain types so the file format can evolve independently.

use crate::domain::SessionState;
use serde::{Deserialize, Serialize};

/// Persisted form of one namespace's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Search term of the session.
    pub search_term: String,

    /// 1-based index of the next result to request.
    pub next_start_index: usize,

    /// Whether the last page was full.
    pub has_more: bool,

    /// Unix timestamp of the save that produced this record.
    pub updated_at: i64,
}

impl SessionRecord {
    /// Creates a record for `state` stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use picsearch::domain::SessionState;
    /// use picsearch::storage::SessionRecord;
    ///
    /// let record = SessionRecord::from_state(&SessionState::new("cats"));
    /// assert_eq!(record.next_start_index, 1);
    /// assert!(record.has_more);
    /// ```
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            search_term: state.search_term.clone(),
            next_start_index: state.next_start_index,
            has_more: state.has_more,
            updated_at: chrono::Utc::now().timestamp(),
        }
    }

    #[must_use]
    pub fn to_state(&self) -> SessionState {
        SessionState {
            search_term: self.search_term.clone(),
            next_start_index: self.next_start_index,
            has_more: self.has_more,
        }
    }
}
