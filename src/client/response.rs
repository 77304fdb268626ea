//! Raw search response model.
//!
//! Only the fields the application uses are modeled; everything else the API
//! returns is ignored by serde.

use crate::domain::error::{Result, SearchError};
use crate::domain::{ResultItem, ResultPage};
use serde::Deserialize;

/// Top-level response body. `items` is absent when a search has no (more) hits.
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    items: Option<Vec<RawItem>>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    title: String,
    link: String,
}

impl From<RawItem> for ResultItem {
    fn from(raw: RawItem) -> Self {
        Self::new(raw.title, raw.link)
    }
}

/// Parses a response body into a [`ResultPage`].
///
/// # Errors
///
/// Returns [`SearchError::MalformedResponse`] if the body is not a JSON object,
/// if `items` is not an array, or if an item lacks a string `title` or `link`.
///
/// # Examples
///
/// ```
/// use picsearch::client::parse_page;
///
/// let page = parse_page(r#"{"items":[{"title":"cat","link":"https://img/cat"}]}"#, 10)?;
/// assert_eq!(page.len(), 1);
///
/// let empty = parse_page(r#"{"kind":"customsearch#search"}"#, 10)?;
/// assert!(empty.is_empty());
/// # Ok::<(), picsearch::SearchError>(())
/// ```
pub fn parse_page(body: &str, requested_chunk_size: usize) -> Result<ResultPage> {
    let raw: RawResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::MalformedResponse(format!("failed to parse JSON: {e}")))?;

    let items: Vec<ResultItem> = raw
        .items
        .unwrap_or_default()
        .into_iter()
        .map(ResultItem::from)
        .collect();

    tracing::trace!(item_count = items.len(), "parsed search response");
    Ok(ResultPage::new(items, requested_chunk_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_in_order() {
        let body = r#"{
            "kind": "customsearch#search",
            "items": [
                {"title": "first", "link": "https://img/1", "mime": "image/png"},
                {"title": "second", "link": "https://img/2"}
            ]
        }"#;

        let page = parse_page(body, 10).unwrap();
        assert_eq!(page.requested_chunk_size, 10);
        assert_eq!(
            page.items,
            vec![
                ResultItem::new("first", "https://img/1"),
                ResultItem::new("second", "https://img/2"),
            ]
        );
    }

    #[test]
    fn missing_items_is_empty_page() {
        let page = parse_page(r#"{"searchInformation":{"totalResults":"0"}}"#, 10).unwrap();
        assert!(page.is_empty());
        assert!(page.is_last_page());
    }

    #[test]
    fn null_items_is_empty_page() {
        let page = parse_page(r#"{"items":null}"#, 10).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_page("<html>oops</html>", 10).unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }

    #[test]
    fn items_of_wrong_type_is_malformed() {
        let err = parse_page(r#"{"items":"nope"}"#, 10).unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }

    #[test]
    fn item_without_link_is_malformed() {
        let err = parse_page(r#"{"items":[{"title":"x"}]}"#, 10).unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }
}
