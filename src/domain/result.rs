//! Search result values.
//!
//! [`ResultItem`] is what the store accumulates and observers render.
//! [`ResultPage`] is the transient unit a single remote call produces.

use serde::{Deserialize, Serialize};

/// One image hit: a title and the URL the picture lives at.
///
/// Items have no identity beyond value equality. The remote API may return
/// overlapping items across pages and they are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub image_url: String,
}

impl ResultItem {
    /// Creates a result item.
    ///
    /// # Examples
    ///
    /// ```
    /// use picsearch::domain::ResultItem;
    ///
    /// let item = ResultItem::new("Tabby", "https://example.com/tabby.jpg");
    /// assert_eq!(item.title, "Tabby");
    /// ```
    pub fn new(title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_url: image_url.into(),
        }
    }
}

/// A single chunk of results returned by one remote search call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    /// Items in the order the API returned them.
    pub items: Vec<ResultItem>,
    /// The chunk size that was asked for when this page was requested.
    pub requested_chunk_size: usize,
}

impl ResultPage {
    #[must_use]
    pub const fn new(items: Vec<ResultItem>, requested_chunk_size: usize) -> Self {
        Self {
            items,
            requested_chunk_size,
        }
    }

    /// An empty page, which is what a response without an `items` field means.
    #[must_use]
    pub const fn empty(requested_chunk_size: usize) -> Self {
        Self::new(Vec::new(), requested_chunk_size)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether this page should be treated as the final one.
    ///
    /// A short page (fewer items than requested, including zero) ends the
    /// search. This is a heuristic: a full page can still be followed by an
    /// empty one.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.items.len() < self.requested_chunk_size
    }
}
