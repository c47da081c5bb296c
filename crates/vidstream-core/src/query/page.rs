//! Page request and page result types
//!
//! A `PageRequest` is transient, constructed per call and never persisted.
//! A `PageResult` is derived and recomputed on every call.

use serde::Serialize;

use crate::error::DomainError;

/// Default page number when the caller specifies none
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size when the caller specifies none
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound on page size to keep result sets bounded
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate and build a page request
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPageRequest` when `page_number < 1`
    /// or `page_size < 1`. Sizes above `MAX_PAGE_SIZE` are clamped, not
    /// rejected.
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, DomainError> {
        if page_number < 1 || page_size < 1 {
            return Err(DomainError::InvalidPageRequest {
                page: page_number,
                limit: page_size,
            });
        }
        Ok(Self {
            page_number: u32::try_from(page_number).unwrap_or(u32::MAX),
            page_size: u32::try_from(page_size)
                .unwrap_or(MAX_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
        })
    }

    /// The first page with the default size
    pub fn first() -> Self {
        Self {
            page_number: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// 1-based page number
    #[inline]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Items per page
    #[inline]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Row offset for the backing store
    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number - 1) * i64::from(self.page_size)
    }

    /// Row limit for the backing store
    #[inline]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of results plus pagination totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> PageResult<T> {
    /// Assemble a page from items and the post-filter total count
    ///
    /// `total_pages` is `ceil(total_items / page_size)`; an empty match
    /// yields zero items and `total_pages = 0`, which is a success, not
    /// an error.
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        let page_size = request.page_size();
        let total_pages = if total_items == 0 {
            0
        } else {
            u32::try_from(total_items.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
        };
        Self {
            items,
            total_items,
            page_number: request.page_number(),
            page_size,
            total_pages,
        }
    }

    /// An empty page for a request that matched nothing
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Map item type, keeping pagination totals
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let req = PageRequest::default();
        assert_eq!(req.page_number(), 1);
        assert_eq!(req.page_size(), 10);
        assert_eq!(req.offset(), 0);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_page_request_rejects_zero_page() {
        let err = PageRequest::new(0, 10).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidPageRequest { page: 0, limit: 10 }
        ));
    }

    #[test]
    fn test_page_request_rejects_zero_size() {
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(-1, 10).is_err());
        assert!(PageRequest::new(1, -5).is_err());
    }

    #[test]
    fn test_page_request_clamps_oversized_limit() {
        let req = PageRequest::new(1, 10_000).unwrap();
        assert_eq!(req.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset_for_later_pages() {
        let req = PageRequest::new(3, 10).unwrap();
        assert_eq!(req.offset(), 20);
    }

    #[test]
    fn test_page_result_totals() {
        let req = PageRequest::new(1, 10).unwrap();
        let page = PageResult::new(vec![1, 2, 3], 25, req);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);
    }

    #[test]
    fn test_page_result_exact_division() {
        let req = PageRequest::new(1, 10).unwrap();
        let page: PageResult<i32> = PageResult::new(vec![], 30, req);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_empty_page_has_zero_total_pages() {
        let req = PageRequest::new(1, 10).unwrap();
        let page: PageResult<i32> = PageResult::empty(req);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn test_page_result_map_keeps_totals() {
        let req = PageRequest::new(2, 5).unwrap();
        let page = PageResult::new(vec![1, 2], 7, req);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.total_pages, 2);
        assert_eq!(mapped.page_number, 2);
    }
}
