//! Pagination controller.
//!
//! Tracks the page index and page size for a table and keeps the index
//! inside `[0, total_pages - 1]` whenever the item count changes.
//!
//! # Example
//!
//! ```rust
//! use tabula::paginator::Paginator;
//!
//! let mut paginator = Paginator::new().page_size(10);
//! paginator.set_total_items(25);
//! assert_eq!(paginator.total_pages(), 3);
//!
//! paginator.last();
//! assert_eq!(paginator.page_index(), 2);
//!
//! // A filter narrows the set; the index follows.
//! paginator.set_total_items(5);
//! assert_eq!(paginator.page_index(), 0);
//!
//! let items: Vec<u32> = (0..5).collect();
//! let (start, end) = paginator.slice_bounds();
//! assert_eq!(&items[start..end], &[0, 1, 2, 3, 4]);
//! ```

/// Pagination display type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// Arabic numerals: "1/5"
    #[default]
    Arabic,
    /// Dot indicators: "•○○○○"
    Dots,
}

/// Pagination model.
#[derive(Debug, Clone)]
pub struct Paginator {
    /// Display type (Arabic or Dots).
    pub display_type: Type,
    page_index: usize,
    page_size: usize,
    total_items: usize,
    /// Character for the active page in Dots mode.
    pub active_dot: String,
    /// Character for inactive pages in Dots mode.
    pub inactive_dot: String,
    /// Format string for Arabic mode.
    pub arabic_format: String,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    /// Page size used when none is given.
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Creates a paginator on page 0 with the default page size and no items.
    #[must_use]
    pub fn new() -> Self {
        Self {
            display_type: Type::Arabic,
            page_index: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
            total_items: 0,
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "{}/{}".to_string(),
        }
    }

    /// Sets the display type.
    #[must_use]
    pub fn display_type(mut self, t: Type) -> Self {
        self.display_type = t;
        self
    }

    /// Sets the page size (builder pattern). Zero is raised to one.
    #[must_use]
    pub fn page_size(mut self, n: usize) -> Self {
        self.set_page_size(n);
        self
    }

    /// Returns the current page (0-indexed).
    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the number of items per page.
    #[must_use]
    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the item count pages are computed from.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns the number of pages. Never less than one.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Updates the item count and clamps the page index into range.
    ///
    /// Returns whether the page index moved.
    pub fn set_total_items(&mut self, items: usize) -> bool {
        self.total_items = items;
        let last = self.total_pages() - 1;
        if self.page_index > last {
            tracing::debug!(
                from = self.page_index,
                to = last,
                total_items = items,
                "page index clamped"
            );
            self.page_index = last;
            return true;
        }
        false
    }

    /// Goes to page `n`. Out-of-range targets are ignored.
    ///
    /// Returns whether the page changed.
    pub fn go_to(&mut self, n: usize) -> bool {
        if n >= self.total_pages() || n == self.page_index {
            return false;
        }
        self.page_index = n;
        true
    }

    /// Navigates to the next page.
    pub fn next_page(&mut self) -> bool {
        if self.on_last_page() {
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Navigates to the previous page.
    pub fn prev_page(&mut self) -> bool {
        if self.on_first_page() {
            return false;
        }
        self.page_index -= 1;
        true
    }

    /// Navigates to the first page.
    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    /// Navigates to the last page.
    pub fn last(&mut self) -> bool {
        self.go_to(self.total_pages() - 1)
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, n: usize) {
        self.page_size = n.max(1);
        self.page_index = 0;
    }

    /// Returns whether we're on the last page.
    #[must_use]
    pub fn on_last_page(&self) -> bool {
        self.page_index + 1 >= self.total_pages()
    }

    /// Returns whether we're on the first page.
    #[must_use]
    pub fn on_first_page(&self) -> bool {
        self.page_index == 0
    }

    /// Returns `(start, end)` indices of the current page into the item list.
    #[must_use]
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = (self.page_index * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        (start, end)
    }

    /// Returns the number of items on the current page.
    #[must_use]
    pub fn items_on_page(&self) -> usize {
        let (start, end) = self.slice_bounds();
        end - start
    }

    /// Renders the position indicator.
    #[must_use]
    pub fn view(&self) -> String {
        match self.display_type {
            Type::Dots => self.dots_view(),
            Type::Arabic => self.arabic_view(),
        }
    }

    /// Renders a "Showing 11–20 of 25" summary.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return "No results".to_string();
        }
        let (start, end) = self.slice_bounds();
        format!("Showing {}–{} of {}", start + 1, end, self.total_items)
    }

    fn dots_view(&self) -> String {
        let mut s = String::new();
        for i in 0..self.total_pages() {
            if i == self.page_index {
                s.push_str(&self.active_dot);
            } else {
                s.push_str(&self.inactive_dot);
            }
        }
        s
    }

    fn arabic_view(&self) -> String {
        // First {} is the current page, second is the page count.
        self.arabic_format
            .replacen("{}", &(self.page_index + 1).to_string(), 1)
            .replacen("{}", &self.total_pages().to_string(), 1)
    }
}
