//! Page-number pagination (`?page=&limit=`) shared by list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size when `limit` is absent.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A resolved page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Clamp raw query values: `page` floors at 1, `limit` falls in
    /// `1..=MAX_PAGE_LIMIT` and defaults to [`DEFAULT_PAGE_LIMIT`].
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Rows to skip for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of pages needed to show `total` rows. Zero rows means zero pages.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }

    /// Wrap one page of rows with its counters.
    pub fn into_page<T>(self, data: Vec<T>, total: i64) -> Page<T> {
        Page {
            data,
            total,
            total_pages: self.total_pages(total),
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub total_pages: i64,
    pub page: i64,
    pub limit: i64,
}
