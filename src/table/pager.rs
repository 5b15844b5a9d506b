//! Page window arithmetic.
//!
//! # Design Decisions
//! - Out-of-range pages clamp to the nearest valid page, never error
//! - A page size of zero means a single page holding every row

/// The visible slice of a table for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Clamped 1-based page number.
    pub page: usize,
    pub total_pages: usize,
    /// Index of the first visible row.
    pub offset: usize,
    /// Number of visible rows.
    pub len: usize,
}

impl PageWindow {
    /// Compute the window for `requested` over `total_rows`.
    pub fn compute(total_rows: usize, requested: i64, page_size: usize) -> Self {
        if page_size == 0 {
            return Self {
                page: 1,
                total_pages: 1,
                offset: 0,
                len: total_rows,
            };
        }

        let total_pages = total_rows.div_ceil(page_size).max(1);
        let page = usize::try_from(requested).unwrap_or(0).clamp(1, total_pages);
        let offset = (page - 1) * page_size;
        let len = page_size.min(total_rows.saturating_sub(offset));
        Self {
            page,
            total_pages,
            offset,
            len,
        }
    }

    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    pub fn prev_page(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next_page(&self) -> usize {
        (self.page + 1).min(self.total_pages)
    }
}
