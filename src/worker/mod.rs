//! Off-thread execution of remote fetches.
//!
//! The session never awaits the network itself. It hands a [`FetchRequest`] to
//! the [`FetchWorker`], which runs the search on the async runtime and posts a
//! [`FetchCompletion`] back over a channel. The controlling loop receives it
//! and applies it to the session, so result and cursor mutations always happen
//! on one execution context.
//!
//! # Architecture
//!
//! - `messages`: Request/completion types, tagged with the session generation
//! - `handler`: Worker that spawns fetch tasks and reports completions

pub mod handler;
pub mod messages;

pub use handler::FetchWorker;
pub use messages::{FetchCompletion, FetchRequest};
