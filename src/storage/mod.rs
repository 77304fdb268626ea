//! Storage layer for resumable search sessions.
//!
//! This module provides the persistence abstraction that lets a search resume
//! mid-pagination after a restart. The session cursor is saved after every
//! successful fetch; optionally the accumulated results are archived too.
//!
//! # Modules
//!
//! - `backend`: [`SessionPersistence`] trait abstraction
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: In-process implementation for ephemeral sessions and tests
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::SessionPersistence;
pub use json::JsonSessionStore;
pub use memory::MemorySessionStore;
pub use models::SessionRecord;
