use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Display window over the client-held result array.
///
/// The listing service returns the whole filtered set in one response, so
/// paging never goes back to the network. `total` is expected to equal the
/// length of the held array; when it does not, [`Pagination::visible`]
/// truncates to what is actually held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current_page: usize,
    total: usize,
}

/// The "Showing X–Y of Z" line under the filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl std::fmt::Display for PageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Showing {}–{} of {} {}",
            self.first,
            self.last,
            self.total,
            if self.total == 1 { "result" } else { "results" }
        )
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    /// New result set: record its total and jump back to the first page.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.current_page = 1;
    }

    /// Moves to page `page`, saturating at the first and last page.
    pub fn go_to_page(&mut self, page: i64) -> usize {
        let last = self.total_pages() as i64;
        self.current_page = page.clamp(1, last) as usize;
        self.current_page
    }

    pub fn next(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 + 1)
    }

    pub fn previous(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 - 1)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn window(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.page_size;
        start..start + self.page_size
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Range { start, end } = self.window();
        let start = start.min(items.len());
        let end = end.min(items.len());
        &items[start..end]
    }

    pub fn summary(&self) -> PageSummary {
        let start = self.window().start;
        PageSummary {
            first: if self.total == 0 { 0 } else { start + 1 },
            last: (start + self.page_size).min(self.total),
            total: self.total,
        }
    }

    /// Page numbers for the navigation strip; empty when everything fits on
    /// one page.
    pub fn page_numbers(&self) -> Vec<usize> {
        let pages = self.total_pages();
        if pages > 1 {
            (1..=pages).collect()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("u{}", i)).collect()
    }

    #[test]
    fn test_total_pages() {
        let mut p = Pagination::default();
        for (total, expected) in [(0, 1), (1, 1), (3, 1), (4, 2), (6, 2), (7, 3), (9, 3), (10, 4)] {
            p.reset(total);
            assert_eq!(p.total_pages(), expected, "total={}", total);
        }
    }

    #[test]
    fn test_seven_items_over_three_pages() {
        let data = items(7);
        let mut p = Pagination::default();
        p.reset(data.len());

        assert_eq!(p.visible(&data), &["u1", "u2", "u3"]);
        assert_eq!(p.go_to_page(3), 3);
        assert_eq!(p.visible(&data), &["u7"]);
        assert_eq!(p.go_to_page(5), 3);
    }

    #[test]
    fn test_go_to_page_saturates() {
        let mut p = Pagination::default();
        p.reset(7);
        assert_eq!(p.go_to_page(0), 1);
        assert_eq!(p.go_to_page(-42), 1);
        assert_eq!(p.go_to_page(i64::MAX), 3);
        assert_eq!(p.go_to_page(2), 2);

        p.reset(0);
        assert_eq!(p.go_to_page(4), 1);
    }

    #[test]
    fn test_next_and_previous_stop_at_edges() {
        let mut p = Pagination::default();
        p.reset(4);
        assert!(!p.has_previous());
        assert_eq!(p.previous(), 1);
        assert_eq!(p.next(), 2);
        assert!(!p.has_next());
        assert_eq!(p.next(), 2);
    }

    #[test]
    fn test_visible_truncates_when_total_overstates_items() {
        let data = items(4);
        let mut p = Pagination::default();
        p.reset(9);
        p.go_to_page(2);
        assert_eq!(p.visible(&data), &["u4"]);
        p.go_to_page(3);
        assert!(p.visible(&data).is_empty());
    }

    #[test]
    fn test_summary() {
        let mut p = Pagination::default();
        p.reset(0);
        assert_eq!(p.summary().to_string(), "Showing 0–0 of 0 results");

        p.reset(1);
        assert_eq!(p.summary().to_string(), "Showing 1–1 of 1 result");

        p.reset(7);
        p.go_to_page(3);
        assert_eq!(
            p.summary(),
            PageSummary {
                first: 7,
                last: 7,
                total: 7
            }
        );
    }

    #[test]
    fn test_page_numbers_hidden_for_single_page() {
        let mut p = Pagination::default();
        p.reset(3);
        assert!(p.page_numbers().is_empty());
        p.reset(7);
        assert_eq!(p.page_numbers(), vec![1, 2, 3]);
    }
}
