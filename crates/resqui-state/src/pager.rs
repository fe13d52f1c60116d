//! Offset pagination for list views.

/// Items per page for every listing.
pub const PAGE_SIZE: u64 = 10;

/// Which end-of-list rule a pager follows.
///
/// The queue and failed listings disagree on when the last page is reached,
/// and the two rules are kept as the backend's clients have always applied
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBoundary {
    /// Last page once `offset > total`
    Queue,
    /// Last page once `offset + page_size >= total`
    Failed,
}

/// A "fetch `page_size` items starting at `offset`" window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub page_size: u64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            offset: 0,
            page_size: PAGE_SIZE,
        }
    }
}

/// Cursor over a paged listing. The offset is always a multiple of the page
/// size.
#[derive(Debug, Clone)]
pub struct Pager {
    window: PageWindow,
    boundary: PageBoundary,
}

impl Pager {
    pub fn new(boundary: PageBoundary) -> Self {
        Self {
            window: PageWindow::default(),
            boundary,
        }
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn offset(&self) -> u64 {
        self.window.offset
    }

    pub fn boundary(&self) -> PageBoundary {
        self.boundary
    }

    /// Advance one page unless already at the end. Returns whether the
    /// offset moved.
    pub fn next(&mut self, total: u64) -> bool {
        if self.at_end(total) {
            return false;
        }
        self.window.offset += self.window.page_size;
        true
    }

    /// Go back one page, stopping at zero. Returns whether the offset moved.
    pub fn prev(&mut self) -> bool {
        if self.at_start() {
            return false;
        }
        self.window.offset = self.window.offset.saturating_sub(self.window.page_size);
        true
    }

    pub fn at_start(&self) -> bool {
        self.window.offset == 0
    }

    pub fn at_end(&self, total: u64) -> bool {
        if total == 0 {
            return true;
        }
        let PageWindow { offset, page_size } = self.window;
        match self.boundary {
            PageBoundary::Queue => offset > total,
            PageBoundary::Failed => offset + page_size >= total,
        }
    }

    pub fn reset(&mut self) {
        self.window.offset = 0;
    }

    /// One-based page number.
    pub fn page_number(&self) -> u64 {
        // ceil((offset + 1) / page_size)
        self.window.offset / self.window.page_size + 1
    }
}
