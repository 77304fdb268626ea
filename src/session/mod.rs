//! The paginated search session.
//!
//! This module holds the state machine that owns the current search: which term
//! is active, where the next page starts, whether more pages are expected, and
//! which fetch generation is current. It drives [`crate::store::ResultStore`]
//! mutations and [`crate::storage::SessionPersistence`] saves, and reports
//! lifecycle transitions to registered [`SessionObserver`]s.
//!
//! # State Machine
//!
//! ```text
//!            start_new_search (any state)
//!                    │
//!                    ▼
//!   Idle ──fetch──▶ Fetching ──full page──▶ Idle
//!   Error ─fetch──▶    │ ──short page──▶ Exhausted
//!   Exhausted ─fetch─▶ │ ──failure────▶ Error
//! ```
//!
//! # Modules
//!
//! - [`observer`]: Capability trait implemented by presentation code
//! - [`phase`]: Session phase and completion outcome enums
//! - [`search`]: [`SearchSession`] itself

pub mod observer;
pub mod phase;
pub mod search;

pub use observer::SessionObserver;
pub use phase::{CompletionOutcome, SessionPhase};
pub use search::{SearchSession, CHUNK_SIZE};
