//! Pagination state of the active search.

use crate::domain::ResultPage;
use serde::{Deserialize, Serialize};

/// Cursor of the current search session.
///
/// Created when a search begins, advanced after every successful fetch, and
/// persisted so a restarted process can continue paging. `next_start_index`
/// is 1-based and only moves forward; the only way back to 1 is a new search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub search_term: String,
    pub next_start_index: usize,
    pub has_more: bool,
}

impl SessionState {
    /// Fresh state for a new search: start at index 1, assume more pages exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use picsearch::domain::SessionState;
    ///
    /// let state = SessionState::new("cats");
    /// assert_eq!(state.next_start_index, 1);
    /// assert!(state.has_more);
    /// ```
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            next_start_index: 1,
            has_more: true,
        }
    }

    /// Moves the cursor past the items of `page` and records whether more
    /// pages are expected, per [`ResultPage::is_last_page`].
    pub fn advance(&mut self, page: &ResultPage) {
        self.next_start_index = self.next_start_index.saturating_add(page.len());
        self.has_more = !page.is_last_page();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResultItem;

    fn page(n: usize, requested: usize) -> ResultPage {
        let items = (0..n)
            .map(|i| ResultItem::new(format!("t{i}"), format!("https://img/{i}")))
            .collect();
        ResultPage::new(items, requested)
    }

    #[test]
    fn advance_moves_cursor_and_updates_has_more() {
        let mut state = SessionState::new("cats");
        state.advance(&page(10, 10));
        assert_eq!(state.next_start_index, 11);
        assert!(state.has_more);

        state.advance(&page(4, 10));
        assert_eq!(state.next_start_index, 15);
        assert!(!state.has_more);
    }

    #[test]
    fn empty_page_keeps_cursor_and_ends_search() {
        let mut state = SessionState::new("zzznotfound");
        state.advance(&ResultPage::empty(10));
        assert_eq!(state.next_start_index, 1);
        assert!(!state.has_more);
    }

    #[test]
    fn oversized_page_agrees_with_last_page_check() {
        let mut state = SessionState::new("cats");
        let oversized = page(12, 10);
        state.advance(&oversized);
        assert_eq!(state.next_start_index, 13);
        assert_eq!(state.has_more, !oversized.is_last_page());
        assert!(state.has_more);
    }
}
