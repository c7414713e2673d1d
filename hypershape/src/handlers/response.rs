//! Collection response envelope
//!
//! # Example
//!
//! ```rust
//! use hypershape::handlers::CollectionResponse;
//! use hypershape::pagination::{PageLimits, PageMeta, PageRequest};
//!
//! let page = PageRequest::new(Some(1), Some(10), &PageLimits::default());
//! let response = CollectionResponse::new(vec!["a", "b"], PageMeta::new(&page, 2));
//!
//! let json = serde_json::to_value(&response).unwrap();
//! assert_eq!(json["totalCount"], 2);
//! assert!(json.get("links").is_none());
//! ```

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::links::Link;
use crate::pagination::{PageMeta, PageResult};
use crate::shaping::ShapedRecord;

/// Items of one page with pagination metadata and optional links
///
/// Serializes as `{ items, page, pageSize, totalCount, totalPages,
/// hasPreviousPage, hasNextPage, links? }`. The `links` key is absent unless
/// links were attached.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionResponse<T = ShapedRecord> {
    /// Records in this page
    pub items: Vec<T>,

    /// Pagination metadata
    #[serde(flatten)]
    pub meta: PageMeta,

    /// Collection links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl<T> CollectionResponse<T> {
    /// Create a response without links
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self {
            items,
            meta,
            links: None,
        }
    }

    /// Attach collection links
    #[must_use]
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = Some(links);
        self
    }
}

impl<T> From<PageResult<T>> for CollectionResponse<T> {
    fn from(page: PageResult<T>) -> Self {
        Self::new(page.items, page.meta)
    }
}

impl<T: Serialize> IntoResponse for CollectionResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl IntoResponse for ShapedRecord {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
