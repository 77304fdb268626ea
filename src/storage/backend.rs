//! Session persistence abstraction.
//!
//! This module defines the [`SessionPersistence`] trait that abstracts over
//! durable key-value backends. Each method maps directly to a use case of the
//! search session; it is not a general-purpose store.

use crate::domain::error::Result;
use crate::domain::{ResultItem, SessionState};

/// Durable storage for the cursor of one search session.
///
/// Semantics are last-write-wins. All fields passed to one [`save`] call must
/// become visible together: a reader may never see a new cursor paired with a
/// stale `has_more` flag.
///
/// # Implementations
///
/// - [`crate::storage::JsonSessionStore`]: JSON file with atomic writes
/// - [`crate::storage::MemorySessionStore`]: in-process, lost on exit
///
/// # Examples
///
/// ```
/// use picsearch::domain::SessionState;
/// use picsearch::storage::{MemorySessionStore, SessionPersistence};
///
/// let mut store = MemorySessionStore::default();
/// store.save(&SessionState::new("cats"))?;
/// assert_eq!(store.load()?, Some(SessionState::new("cats")));
/// # Ok::<(), picsearch::SearchError>(())
/// ```
///
/// [`save`]: SessionPersistence::save
pub trait SessionPersistence: Send {
    /// Stores `state`, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be encoded or written.
    fn save(&mut self, state: &SessionState) -> Result<()>;

    /// Returns the last saved state, or `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read or decoded.
    fn load(&self) -> Result<Option<SessionState>>;

    /// Whether this backend keeps an archive of the accumulated results.
    ///
    /// Callers skip building a snapshot for [`save_session`] when this is
    /// false.
    ///
    /// [`save_session`]: SessionPersistence::save_session
    fn archives_results(&self) -> bool {
        false
    }

    /// Stores `state` and, when given, replaces the archived result list, in
    /// one write.
    ///
    /// Either both become visible or neither does, so a reader never finds a
    /// cursor that points past the archived results. Backends without an
    /// archive ignore `results` and only store the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; nothing is stored in that case.
    fn save_session(&mut self, state: &SessionState, results: Option<&[ResultItem]>) -> Result<()> {
        let _ = results;
        self.save(state)
    }

    /// Returns the archived result list (empty when nothing is archived).
    ///
    /// # Errors
    ///
    /// Returns an error if an archive exists but cannot be read.
    fn load_results(&self) -> Result<Vec<ResultItem>> {
        Ok(Vec::new())
    }
}
