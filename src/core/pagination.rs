use std::ops::{Range, RangeInclusive};

pub const DEFAULT_PAGE_SIZE: usize = 11;
pub const DEFAULT_MAX_PAGE_BUTTONS: usize = 5;

/// Bounded page cursor over a list of `total_items`.
///
/// `current_page` is 1-based and always within `1..=total_pages`; transitions that
/// would leave that range are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
    total_pages: usize,
    total_items: usize,
    max_page_buttons: usize,
}

impl Pagination {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        Self {
            current_page: 1,
            page_size,
            total_pages,
            total_items,
            max_page_buttons: DEFAULT_MAX_PAGE_BUTTONS,
        }
    }

    /// Builds a cursor from a caller-supplied page count.
    pub fn with_total_pages(total_pages: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages.max(1);
        Self {
            current_page: 1,
            page_size,
            total_pages,
            total_items: total_pages.saturating_mul(page_size),
            max_page_buttons: DEFAULT_MAX_PAGE_BUTTONS,
        }
    }

    pub fn with_max_page_buttons(mut self, max_page_buttons: usize) -> Self {
        self.max_page_buttons = max_page_buttons;
        self
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns `true` when the page actually changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages || page == self.current_page {
            return false;
        }
        tracing::debug!("Page {} -> {}", self.current_page, page);
        self.current_page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous(&mut self) -> bool {
        // 第一頁時 0 會被 go_to_page 擋下
        self.go_to_page(self.current_page - 1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Half-open item range shown on `page`.
    pub fn window_for(&self, page: usize) -> Range<usize> {
        let start = page.saturating_sub(1).saturating_mul(self.page_size);
        let end = page
            .saturating_mul(self.page_size)
            .min(self.total_pages.saturating_mul(self.page_size))
            .min(self.total_items);
        start.min(end)..end
    }

    pub fn current_window(&self) -> Range<usize> {
        self.window_for(self.current_page)
    }

    /// Slices `items` to the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let window = self.current_window();
        let end = window.end.min(items.len());
        let start = window.start.min(end);
        &items[start..end]
    }

    /// Page numbers offered as direct-jump buttons.
    pub fn page_buttons(&self) -> RangeInclusive<usize> {
        1..=self.max_page_buttons.min(self.total_pages)
    }

    pub fn summary(&self) -> String {
        let window = self.current_window();
        if window.is_empty() {
            return format!("Displaying 0 - 0 out of {}", self.total_items);
        }
        format!(
            "Displaying {} - {} out of {}",
            window.start + 1,
            window.end,
            self.total_items
        )
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}
