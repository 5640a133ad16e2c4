//! Page-number pagination helpers for listing endpoints.
//!
//! Out-of-range page numbers are clamped to the nearest valid page rather
//! than rejected, and an empty result set still has one (empty) page.

use serde::Serialize;

/// Default page size for course listing.
pub const DEFAULT_PER_PAGE: i64 = 12;

/// Largest accepted page size.
pub const MAX_PER_PAGE: i64 = 100;

/// Clamp a requested page size into `[1, MAX_PER_PAGE]`.
pub fn clamp_per_page(per_page: Option<i64>) -> i64 {
    per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}

/// Number of pages needed for `total` items. Never less than 1.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        return 1;
    }
    (total + per_page - 1) / per_page
}

/// A resolved page window, ready to be turned into `LIMIT` / `OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageWindow {
    /// Resolve the requested page against the matching item count.
    pub fn resolve(page: Option<i64>, per_page: Option<i64>, total: i64) -> Self {
        let per_page = clamp_per_page(per_page);
        let total_pages = total_pages(total, per_page);
        let page = page.unwrap_or(1).clamp(1, total_pages);
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_size_is_twelve() {
        assert_eq!(clamp_per_page(None), 12);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(clamp_per_page(Some(0)), 1);
        assert_eq!(clamp_per_page(Some(-5)), 1);
        assert_eq!(clamp_per_page(Some(1000)), MAX_PER_PAGE);
        assert_eq!(clamp_per_page(Some(30)), 30);
    }

    #[test]
    fn twenty_five_items_make_three_pages_of_twelve() {
        let w = PageWindow::resolve(Some(3), None, 25);
        assert_eq!(w.total_pages, 3);
        assert_eq!(w.page, 3);
        assert_eq!(w.offset(), 24);
        assert_eq!(w.limit(), 12);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(total_pages(24, 12), 2);
        assert_eq!(total_pages(1, 12), 1);
    }

    #[test]
    fn empty_result_has_one_page() {
        let w = PageWindow::resolve(Some(4), Some(10), 0);
        assert_eq!(w.total_pages, 1);
        assert_eq!(w.page, 1);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        assert_eq!(PageWindow::resolve(Some(0), None, 25).page, 1);
        assert_eq!(PageWindow::resolve(Some(-1), None, 25).page, 1);
        assert_eq!(PageWindow::resolve(Some(99), None, 25).page, 3);
    }
}
