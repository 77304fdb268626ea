//! Thread-safe accumulation of search results.
//!
//! [`ResultStore`] holds every item received during the current search session.
//! It is append-only between searches and is cleared as a whole when a new
//! search starts. The session is the only writer; observers read through a
//! [`ResultReader`], which exposes no mutating operations.
//!
//! # Thread Safety
//!
//! All operations take the same internal `Mutex`, so an append of a whole page
//! is observed by readers either entirely or not at all. The lock is never held
//! across I/O or across a call back into user code.

use crate::domain::error::{Result, SearchError};
use crate::domain::ResultItem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Append-only result list shared between the session and its observers.
///
/// # Examples
///
/// ```
/// use picsearch::domain::ResultItem;
/// use picsearch::store::ResultStore;
///
/// let store = ResultStore::new();
/// let appended = store.append(vec![ResultItem::new("a", "https://img/a")]);
/// assert_eq!(appended, 1);
/// assert_eq!(store.count(), 1);
/// assert!(store.get(1).is_err());
/// ```
#[derive(Debug, Default)]
pub struct ResultStore {
    items: Mutex<Vec<ResultItem>>,
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with previously archived items.
    #[must_use]
    pub fn with_items(items: Vec<ResultItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// A poisoned lock only means a reader panicked mid-read; the vector itself
    /// is never left half-written, so the guard is recovered.
    fn lock(&self) -> MutexGuard<'_, Vec<ResultItem>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends all `items` in one critical section and returns how many were
    /// added. An empty input is a no-op that returns 0.
    pub fn append(&self, items: Vec<ResultItem>) -> usize {
        if items.is_empty() {
            return 0;
        }

        let appended = items.len();
        let total = {
            let mut guard = self.lock();
            guard.extend(items);
            guard.len()
        };

        tracing::trace!(appended, total, "results appended");
        appended
    }

    /// Removes every stored item.
    pub fn clear(&self) {
        let removed = {
            let mut guard = self.lock();
            let removed = guard.len();
            guard.clear();
            removed
        };
        tracing::trace!(removed, "results cleared");
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a copy of the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::OutOfRange`] if `index` is not in `[0, count())`.
    pub fn get(&self, index: usize) -> Result<ResultItem> {
        let guard = self.lock();
        guard.get(index).cloned().ok_or(SearchError::OutOfRange {
            index,
            count: guard.len(),
        })
    }

    /// Copies out the whole list as it is right now.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ResultItem> {
        self.lock().clone()
    }

    /// Returns a read-only handle to this store.
    #[must_use]
    pub fn reader(self: &Arc<Self>) -> ResultReader {
        ResultReader {
            store: Arc::clone(self),
        }
    }
}

/// Read-only view of a [`ResultStore`], handed to presentation code.
#[derive(Debug, Clone)]
pub struct ResultReader {
    store: Arc<ResultStore>,
}

impl ResultReader {
    #[must_use]
    pub fn count(&self) -> usize {
        self.store.count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// # Errors
    ///
    /// Returns [`SearchError::OutOfRange`] if `index` is not in `[0, count())`.
    pub fn get(&self, index: usize) -> Result<ResultItem> {
        self.store.get(index)
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<ResultItem> {
        self.store.snapshot()
    }
}
