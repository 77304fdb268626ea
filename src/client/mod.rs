//! Remote image search.
//!
//! This module abstracts the network call that fetches one chunk of image
//! results. The session only sees the [`SearchClient`] trait; the production
//! implementation talks to a Custom Search style JSON endpoint over HTTP.
//!
//! # Modules
//!
//! - `backend`: The [`SearchClient`] trait
//! - `http`: [`HttpSearchClient`], a `reqwest` implementation with a bounded timeout
//! - `response`: Raw response model and its mapping to [`crate::domain::ResultPage`]

pub mod backend;
pub mod http;
pub mod response;

pub use backend::SearchClient;
pub use http::HttpSearchClient;
pub use response::parse_page;
