//! Client-side pagination over a cached collection.

/// Page sizes offered to the user.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Page size until the user picks another.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page and page size. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_items: 0,
        }
    }
}

impl Pagination {
    /// First page of `total_items` at the default size.
    pub fn new(total_items: usize) -> Self {
        Self {
            total_items,
            ..Self::default()
        }
    }

    /// Current page, from 1.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Items in the whole collection.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// At least one, so an empty list still shows "page 1 of 1".
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// The collection changed size; stay on the same page if it still exists.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page = self.page.min(self.total_pages());
    }

    /// Switch page size and go back to the first page. Sizes not offered are ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !PAGE_SIZES.contains(&page_size) {
            return false;
        }

        self.page_size = page_size;
        self.page = 1;

        true
    }

    /// Jump to `page`, clamped to the pages that exist.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    /// Next page, if any.
    pub fn next(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    /// Previous page, if any.
    pub fn prev(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Whether an earlier page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// The slice of `items` on the current page.
    pub fn page_items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(items.len());

        items.get(start..end).unwrap_or_default()
    }

    /// "11-20 of 42", as shown under a table.
    pub fn range_label(&self) -> String {
        if self.total_items == 0 {
            return "0 of 0".to_string();
        }

        let first = (self.page - 1) * self.page_size + 1;
        let last = (self.page * self.page_size).min(self.total_items);

        format!("{first}-{last} of {}", self.total_items)
    }
}
