//! Fixed-size paging over a result set.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Tracks the current page of a result set.
///
/// Navigation wraps: past the last page is the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    total: usize,
    page_size: NonZeroUsize,
    current: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl Paginator {
    /// An empty paginator.
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            total: 0,
            page_size,
            current: 0,
        }
    }

    /// Starts over on a new result set at page 0.
    pub fn reset(&mut self, total: usize, page_size: NonZeroUsize) {
        self.total = total;
        self.page_size = page_size;
        self.current = 0;
    }

    /// Total number of items.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Items per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Zero-based index of the current page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current
    }

    /// `ceil(total / page_size)`.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size.get())
    }

    /// `(offset, page_size)` of the current page.
    #[must_use]
    pub fn window(&self) -> (usize, usize) {
        let size = self.page_size.get();
        (self.current * size, size)
    }

    /// Jumps to `index`, wrapping modulo the page count. No-op when empty.
    pub fn go_to(&mut self, index: usize) -> &mut Self {
        let pages = self.page_count();
        if pages > 0 {
            self.current = index % pages;
        }
        self
    }

    /// Advances one page, wrapping to the first.
    pub fn next(&mut self) -> &mut Self {
        self.go_to(self.current + 1)
    }

    /// Goes back one page, wrapping to the last.
    pub fn previous(&mut self) -> &mut Self {
        let pages = self.page_count();
        if pages > 0 {
            self.current = (self.current + pages - 1) % pages;
        }
        self
    }

    /// The current page of `items`, clamped to bounds.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (offset, size) = self.window();
        let start = offset.min(items.len());
        let end = offset.saturating_add(size).min(items.len());
        &items[start..end]
    }
}
