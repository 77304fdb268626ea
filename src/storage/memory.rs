//! In-process session persistence.
//!
//! Useful when nothing should survive the process, and as a test double.

use crate::domain::error::Result;
use crate::domain::{ResultItem, SessionState};
use crate::storage::backend::SessionPersistence;

/// Keeps the last saved state in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    state: Option<SessionState>,
    results: Option<Vec<ResultItem>>,
}

impl MemorySessionStore {
    /// Creates a store that also archives results.
    #[must_use]
    pub fn archiving() -> Self {
        Self {
            results: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Creates a store that already holds `state`, as if saved by a previous run.
    #[must_use]
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }
}

impl SessionPersistence for MemorySessionStore {
    fn save(&mut self, state: &SessionState) -> Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionState>> {
        Ok(self.state.clone())
    }

    fn archives_results(&self) -> bool {
        self.results.is_some()
    }

    fn save_session(&mut self, state: &SessionState, results: Option<&[ResultItem]>) -> Result<()> {
        if let (Some(archive), Some(items)) = (self.results.as_mut(), results) {
            archive.clear();
            archive.extend_from_slice(items);
        }
        self.save(state)
    }

    fn load_results(&self) -> Result<Vec<ResultItem>> {
        Ok(self.results.clone().unwrap_or_default())
    }
}
