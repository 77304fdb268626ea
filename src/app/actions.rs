//! Actions representing side effects to be executed by the controller.
//!
//! The event handler never performs I/O itself. It returns a `Vec<Action>` and
//! the [`crate::app::SearchController`] executes them in order: fetches are
//! handed to the [`crate::worker::FetchWorker`], `Stop` ends the run loop.

use crate::worker::FetchRequest;

/// Commands produced by [`crate::app::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Executes a remote fetch in the background.
    ///
    /// The completion comes back as [`crate::app::Event::FetchCompleted`].
    Fetch(FetchRequest),

    /// Stops the controller loop.
    Stop,
}
