//! Page arithmetic for collection requests
//!
//! Page numbers are 1-indexed. Out-of-range input is clamped rather than
//! rejected: a page below 1 reads as page 1, a page size outside
//! `1..=max_page_size` is pulled into range, and a page past the end yields an
//! empty page instead of an error.
//!
//! # Example
//!
//! ```rust
//! use hypershape::pagination::{PageLimits, PageMeta, PageRequest};
//!
//! let request = PageRequest::new(Some(3), Some(10), &PageLimits::default());
//! assert_eq!(request.offset(), 20);
//!
//! let meta = PageMeta::new(&request, 25);
//! assert_eq!(meta.total_pages, 3);
//! assert!(meta.has_previous_page);
//! assert!(!meta.has_next_page);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum allowed items per page
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size bounds applied to every request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Size used when the request names none
    pub default_page_size: u32,
    /// Upper bound for any requested size
    pub max_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, at least 1
    pub page: u32,
    /// Page size, within the configured limits
    pub page_size: u32,
}

impl PageRequest {
    /// Clamp raw query values into a usable request
    #[must_use]
    pub fn new(page: Option<i64>, page_size: Option<i64>, limits: &PageLimits) -> Self {
        let max = limits.max_page_size.max(1);
        let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX));
        let page_size = page_size
            .unwrap_or_else(|| i64::from(limits.default_page_size))
            .clamp(1, i64::from(max));

        Self {
            page: u32::try_from(page).unwrap_or(u32::MAX),
            page_size: u32::try_from(page_size).unwrap_or(max),
        }
    }

    /// Number of records to skip
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Window to hand to the record source
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.offset(), u64::from(self.page_size))
    }
}

/// Skip/take window over an ordered query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Records to skip
    pub offset: u64,
    /// Maximum records to return
    pub limit: u64,
}

impl PageWindow {
    /// Create a window
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

/// Pagination metadata for a collection response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub page_size: u32,
    /// Records matching the filters across all pages
    pub total_count: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether a page precedes this one
    pub has_previous_page: bool,
    /// Whether records remain after this page
    pub has_next_page: bool,
}

impl PageMeta {
    /// Compute metadata for a request against a total count
    #[must_use]
    pub fn new(request: &PageRequest, total_count: u64) -> Self {
        let page_size = request.page_size.max(1);
        let end = request.offset().saturating_add(u64::from(page_size));

        Self {
            page: request.page,
            page_size,
            total_count,
            total_pages: calculate_total_pages(total_count, page_size),
            has_previous_page: request.page > 1,
            has_next_page: end < total_count,
        }
    }
}

/// Calculate total pages, rounding up
fn calculate_total_pages(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total.saturating_add(page_size - 1) / page_size;
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One materialized page plus its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    /// Records in this page
    pub items: Vec<T>,
    /// Page metadata
    pub meta: PageMeta,
}

impl<T> PageResult<T> {
    /// Wrap fetched records
    pub fn new(items: Vec<T>, request: &PageRequest, total_count: u64) -> Self {
        Self {
            items,
            meta: PageMeta::new(request, total_count),
        }
    }

    /// Transform the records, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: i64, size: i64) -> PageRequest {
        PageRequest::new(Some(page), Some(size), &PageLimits::default())
    }

    /// Slice `0..total` the way a record source would
    fn materialize(request: &PageRequest, total: u64) -> Vec<u64> {
        let window = request.window();
        (0..total)
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let req = PageRequest::new(None, None, &PageLimits::default());
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(request(0, 10).page, 1);
        assert_eq!(request(-4, 10).page, 1);
        assert_eq!(request(1, 0).page_size, 1);
        assert_eq!(request(1, -10).page_size, 1);
        assert_eq!(request(1, 1000).page_size, MAX_PAGE_SIZE);

        let limits = PageLimits {
            default_page_size: 5,
            max_page_size: 20,
        };
        assert_eq!(PageRequest::new(None, None, &limits).page_size, 5);
        assert_eq!(PageRequest::new(None, Some(50), &limits).page_size, 20);
    }

    #[test]
    fn test_first_page_of_25() {
        let req = request(1, 10);
        let meta = PageMeta::new(&req, 25);
        assert!(!meta.has_previous_page);
        assert!(meta.has_next_page);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(materialize(&req, 25).len(), 10);
    }

    #[test]
    fn test_last_partial_page_of_25() {
        let req = request(3, 10);
        let meta = PageMeta::new(&req, 25);
        assert_eq!(materialize(&req, 25), vec![20, 21, 22, 23, 24]);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn test_page_beyond_last_is_empty_not_error() {
        let req = request(10, 10);
        let meta = PageMeta::new(&req, 25);
        assert!(materialize(&req, 25).is_empty());
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
        assert_eq!(meta.page, 10);
    }

    #[test]
    fn test_exact_multiple_has_no_next() {
        let meta = PageMeta::new(&request(2, 10), 20);
        assert!(!meta.has_next_page);
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_empty_collection() {
        let meta = PageMeta::new(&request(1, 10), 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PageMeta::new(&request(2, 10), 25);
        let value = serde_json::to_value(meta).unwrap();
        assert_eq!(value["pageSize"], 10);
        assert_eq!(value["totalCount"], 25);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["hasPreviousPage"], true);
        assert_eq!(value["hasNextPage"], true);
    }

    #[test]
    fn test_page_result_map_keeps_meta() {
        let req = request(1, 2);
        let result = PageResult::new(vec![1, 2], &req, 5).map(|n| n * 10);
        assert_eq!(result.items, vec![10, 20]);
        assert_eq!(result.meta.total_count, 5);
        assert!(result.meta.has_next_page);
    }
}
