//! Application layer coordinating the session, events, and actions.
//!
//! This module sits between the presentation layer (main.rs) and the
//! session/worker layers. It follows a unidirectional data flow:
//!
//! ```text
//! Commands ─┐
//!           ├─▶ handle_event ─▶ SearchSession ─▶ Actions ─▶ FetchWorker
//! Completions ◀──────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and session transitions
//! - [`controller`]: Async loop that owns the session and executes actions
//!
//! # Example
//!
//! ```no_run
//! use picsearch::app::{Command, SearchController};
//! use picsearch::{initialize, Config};
//!
//! # async fn demo() -> picsearch::Result<()> {
//! let mut controller = initialize(&Config::default())?;
//! controller.handle(Command::Search("cats".to_string()).into());
//! controller.settle().await;
//! println!("{} results", controller.session().results().count());
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod controller;
pub mod handler;

pub use actions::Action;
pub use controller::SearchController;
pub use handler::{handle_event, Command, Event};
