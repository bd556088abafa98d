//! Page window and pager metadata.

use serde::{Deserialize, Serialize};

/// Items per page when `limit` is absent or invalid.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Default upper bound on `limit`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A requested page of results (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Create a page request. `page` below 1 becomes 1; `limit` of 0 becomes the default.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: if limit == 0 { DEFAULT_PAGE_SIZE } else { limit },
        }
    }

    /// Parse raw `page`/`limit` strings leniently.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>, max_limit: u32) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(max_limit.max(1));
        Self::new(page, limit)
    }

    /// Number of rows to skip before this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Parse a strictly positive integer, saturating at `u32::MAX`.
fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let value = raw?.trim().parse::<i64>().ok()?;
    if value < 1 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

/// Pager metadata returned with a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(u64::from(request.limit));
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_more: u64::from(request.page) < total_pages,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_items_over_pages_of_twelve() {
        let first = Pagination::new(PageRequest::new(1, 12), 25);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_more);

        let last = Pagination::new(PageRequest::new(3, 12), 25);
        assert_eq!(last.total_pages, 3);
        assert!(!last.has_more);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let p = Pagination::new(PageRequest::default(), 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_more);
    }

    #[test]
    fn page_past_end_still_reports_metadata() {
        let p = Pagination::new(PageRequest::new(9, 12), 25);
        assert_eq!(p.page, 9);
        assert_eq!(p.total, 25);
        assert!(!p.has_more);
    }

    #[test]
    fn skip_is_zero_based_offset() {
        assert_eq!(PageRequest::new(1, 12).skip(), 0);
        assert_eq!(PageRequest::new(3, 12).skip(), 24);
        assert_eq!(PageRequest::new(0, 12).skip(), 0);
    }

    #[test]
    fn raw_values_are_lenient() {
        assert_eq!(PageRequest::from_raw(None, None, 100), PageRequest::new(1, 12));
        assert_eq!(
            PageRequest::from_raw(Some("0"), Some("-5"), 100),
            PageRequest::new(1, 12)
        );
        assert_eq!(
            PageRequest::from_raw(Some("two"), Some("ten"), 100),
            PageRequest::new(1, 12)
        );
        assert_eq!(
            PageRequest::from_raw(Some(" 2 "), Some("24"), 100),
            PageRequest::new(2, 24)
        );
    }

    #[test]
    fn trailing_garbage_is_unparseable() {
        assert_eq!(
            PageRequest::from_raw(Some("2x"), Some("24abc"), 100),
            PageRequest::new(1, 12)
        );
        assert_eq!(
            PageRequest::from_raw(Some("3.5"), Some("1e2"), 100),
            PageRequest::new(1, 12)
        );
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(PageRequest::from_raw(None, Some("5000"), 100).limit, 100);
        assert_eq!(PageRequest::from_raw(None, Some("50"), 20).limit, 20);
    }

    #[test]
    fn huge_page_saturates() {
        let request = PageRequest::from_raw(Some("99999999999"), None, 100);
        assert_eq!(request.page, u32::MAX);
        assert_eq!(request.skip(), u64::from(u32::MAX - 1) * 12);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(PageRequest::new(1, 12), 25)).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasMore"], true);
    }
}
