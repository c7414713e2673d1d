//! Query parameters for collection endpoints
//!
//! # Example
//!
//! ```rust
//! use hypershape::handlers::CollectionQuery;
//! use hypershape::pagination::PageLimits;
//!
//! let query = CollectionQuery::default()
//!     .with_page(2)
//!     .with_page_size(50)
//!     .with_sort("name desc")
//!     .with_fields("id,name");
//!
//! let page = query.page_request(&PageLimits::default());
//! assert_eq!(page.page, 2);
//! assert_eq!(page.page_size, 50);
//! assert_eq!(page.offset(), 50);
//! ```

use serde::{Deserialize, Serialize};

use crate::links::RouteParams;
use crate::pagination::{PageLimits, PageRequest};

/// Query parameters shared by every collection endpoint
///
/// Resource-specific filters (`type`, `status`, ...) are extracted
/// separately by the handler and passed alongside. Extract through
/// [`QueryParams`](super::QueryParams) for case-insensitive names.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionQuery {
    /// Free-text search term
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "search")]
    pub q: Option<String>,

    /// Sort expression, e.g. `name desc,status`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Comma-separated output fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,

    /// Page number (1-indexed); values below 1 read as 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    /// Page size; clamped to the configured limits
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "pagesize",
        alias = "page_size"
    )]
    pub page_size: Option<i64>,
}

impl CollectionQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term
    #[must_use]
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Set the sort expression
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the requested fields
    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Set the page number
    #[must_use]
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Search term, if one was given and is not blank
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Clamp the page parameters against configured limits
    pub fn page_request(&self, limits: &PageLimits) -> PageRequest {
        PageRequest::new(self.page, self.page_size, limits)
    }

    /// Parameters to echo into collection links for a given page
    ///
    /// `page` and `pageSize` carry the effective values; the remaining
    /// parameters are copied only when present.
    pub fn route_params(&self, page: u32, page_size: u32) -> RouteParams {
        RouteParams::new()
            .with("page", page)
            .with("pageSize", page_size)
            .with_opt("fields", self.fields.as_deref())
            .with_opt("q", self.q.as_deref())
            .with_opt("sort", self.sort.as_deref())
    }
}

/// Query parameters of a single-item read
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Comma-separated output fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_query_default() {
        let query = CollectionQuery::default();
        assert!(query.q.is_none());
        assert!(query.sort.is_none());
        assert!(query.fields.is_none());
        assert!(query.page.is_none());
        assert!(query.page_size.is_none());
    }

    #[test]
    fn test_deserialize_from_query_string() {
        let query: CollectionQuery =
            serde_urlencoded::from_str("q=read&sort=name+desc&fields=id,name&page=2&pageSize=5")
                .unwrap();
        assert_eq!(query.q.as_deref(), Some("read"));
        assert_eq!(query.sort.as_deref(), Some("name desc"));
        assert_eq!(query.fields.as_deref(), Some("id,name"));
        assert_eq!(query.page, Some(2));
        assert_eq!(query.page_size, Some(5));
    }

    #[test]
    fn test_page_size_aliases() {
        let query: CollectionQuery = serde_urlencoded::from_str("pagesize=7").unwrap();
        assert_eq!(query.page_size, Some(7));
        let query: CollectionQuery = serde_urlencoded::from_str("page_size=8").unwrap();
        assert_eq!(query.page_size, Some(8));
    }

    #[test]
    fn test_negative_page_clamps() {
        let query = CollectionQuery::new().with_page(-3).with_page_size(500);
        let page = query.page_request(&PageLimits::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
    }

    #[test]
    fn test_search_term_ignores_blank() {
        assert_eq!(CollectionQuery::new().with_search("  ").search_term(), None);
        assert_eq!(
            CollectionQuery::new().with_search(" run ").search_term(),
            Some("run")
        );
    }

    #[test]
    fn test_route_params_echo() {
        let query = CollectionQuery::new().with_sort("name").with_fields("id,name");
        let params = query.route_params(3, 10);
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![
                ("page", "3"),
                ("pageSize", "10"),
                ("fields", "id,name"),
                ("sort", "name"),
            ]
        );
    }
}
