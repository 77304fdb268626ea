//! Domain layer for picsearch.
//!
//! This module contains the core value types of a search session, independent of
//! networking, persistence, or any presentation layer. Everything here is plain
//! data plus the crate-wide error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`result`]: Search result items and pages
//! - [`session_state`]: Pagination cursor of the current search
//!
//! # Examples
//!
//! ```
//! use picsearch::domain::{ResultItem, ResultPage};
//!
//! let page = ResultPage::new(vec![ResultItem::new("cat", "https://img/cat.png")], 10);
//! assert!(page.is_last_page());
//! ```

pub mod error;
pub mod result;
pub mod session_state;

pub use error::{Result, SearchError};
pub use result::{ResultItem, ResultPage};
pub use session_state::SessionState;
