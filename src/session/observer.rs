//! Session lifecycle notifications.

use crate::domain::SearchError;

/// Receives lifecycle callbacks from a [`crate::session::SearchSession`].
///
/// Implemented by whatever renders the results. Every method has a no-op
/// default so implementors only override what they display. Callbacks run on
/// the session's controlling context and must not block.
///
/// Observers read results through a [`crate::store::ResultReader`]; they are
/// never given write access to the store.
///
/// # Examples
///
/// ```
/// use picsearch::session::SessionObserver;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// #[derive(Default)]
/// struct FooterToggle {
///     show_more_button: AtomicBool,
/// }
///
/// impl SessionObserver for FooterToggle {
///     fn on_results(&self, has_more: bool) {
///         self.show_more_button.store(has_more, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait SessionObserver: Send + Sync {
    /// A new search for `term` has started and previous results were cleared.
    fn on_new_search(&self, term: &str) {
        let _ = term;
    }

    /// A page was merged into the store.
    fn on_results(&self, has_more: bool) {
        let _ = has_more;
    }

    /// A fetch failed. The session cursor did not move.
    fn on_error(&self, error: &SearchError) {
        let _ = error;
    }
}
