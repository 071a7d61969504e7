//! Page-based pagination state.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Page number, page size, optional ordering and total row count.
///
/// Pages start at 1. Deserializes with defaults for missing fields, so a pager
/// can be read straight from a request payload.
///
/// # Example
/// ```rust
/// use polysql::Pager;
///
/// let pager = Pager::new(3, 25).with_total_count(101);
/// assert_eq!(pager.skip_count(), 50);
/// assert_eq!(pager.page_count(), 5);
/// assert_eq!(pager.start_number(), 51);
/// assert_eq!(pager.end_number(), 75);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pager {
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    /// ORDER BY list (`Name desc, Id`) applied when the query has none.
    pub order: Option<String>,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            order: None,
        }
    }
}

impl Pager {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn with_total_count(mut self, total_count: i64) -> Self {
        self.total_count = total_count;
        self
    }

    /// Rows to skip: `(page - 1) * page_size`, never negative.
    pub fn skip_count(&self) -> i64 {
        (self.page.saturating_sub(1)).saturating_mul(self.page_size).max(0)
    }

    /// Number of pages needed for `total_count` rows.
    pub fn page_count(&self) -> i64 {
        if self.total_count <= 0 || self.page_size <= 0 {
            return 0;
        }
        (self.total_count - 1) / self.page_size + 1
    }

    /// 1-based number of the first row on this page. Saturates at `i64::MAX`.
    pub fn start_number(&self) -> i64 {
        self.skip_count().saturating_add(1)
    }

    /// 1-based number of the last row on this page. Saturates at `i64::MAX`.
    pub fn end_number(&self) -> i64 {
        self.page.max(1).saturating_mul(self.page_size)
    }
}
