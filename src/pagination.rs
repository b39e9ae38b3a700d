//! Page-number control for browsing result pages
//!
//! The control owns no page state. It is a pure function of the result
//! count, the page size and the current page (owned by the search
//! controller), and turns activations of its buttons into page-change
//! requests.

/// Page sets up to this size are shown without collapsing
const MAX_UNCOLLAPSED_PAGES: usize = 5;

/// Number of pages shown on each side of the current page
const WINDOW_RADIUS: usize = 1;

/// One entry of the visible page-number sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// A control the user can activate on the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Prev,
    Next,
    Page(usize),
}

/// Number of pages needed for `total_count` items
pub fn total_pages(total_count: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        return 0;
    }
    total_count.div_ceil(items_per_page)
}

/// Compute the page numbers to display, collapsing gaps into ellipses.
///
/// Five pages or fewer are listed in full. Beyond that the first page, the
/// last page and a window of one page around `current_page` are kept.
pub fn compute_visible_pages(
    total_count: usize,
    items_per_page: usize,
    current_page: usize,
) -> Vec<PageItem> {
    let total = total_pages(total_count, items_per_page);

    if total <= MAX_UNCOLLAPSED_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }

    let current = current_page.clamp(1, total);
    let start = current.saturating_sub(WINDOW_RADIUS).max(2);
    let end = (current + WINDOW_RADIUS).min(total - 1);

    let mut pages = vec![PageItem::Page(1)];
    if start > 2 {
        pages.push(PageItem::Ellipsis);
    }
    pages.extend((start..=end).map(PageItem::Page));
    if end < total - 1 {
        pages.push(PageItem::Ellipsis);
    }
    pages.push(PageItem::Page(total));

    pages
}

/// Snapshot of the pagination bar for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total_count: usize,
    pub items_per_page: usize,
    pub current_page: usize,
}

impl Pagination {
    pub fn new(total_count: usize, items_per_page: usize, current_page: usize) -> Self {
        Self {
            total_count,
            items_per_page,
            current_page,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.items_per_page)
    }

    pub fn items(&self) -> Vec<PageItem> {
        compute_visible_pages(self.total_count, self.items_per_page, self.current_page)
    }

    /// The bar is omitted entirely when everything fits on one page
    pub fn is_visible(&self) -> bool {
        self.total_count > self.items_per_page
    }

    pub fn prev_disabled(&self) -> bool {
        self.current_page <= 1
    }

    pub fn next_disabled(&self) -> bool {
        let total = self.total_pages();
        total == 0 || self.current_page >= total
    }

    pub fn is_active(&self, page: usize) -> bool {
        self.current_page == page
    }

    /// Resolve an activated control into the requested page.
    ///
    /// Returns `None` for disabled controls so that they emit nothing.
    pub fn request(&self, control: PageControl) -> Option<usize> {
        match control {
            PageControl::Prev if !self.prev_disabled() => Some(self.current_page - 1),
            PageControl::Next if !self.next_disabled() => Some(self.current_page + 1),
            PageControl::Page(page) if (1..=self.total_pages()).contains(&page) => Some(page),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(110, 10), 11);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_first_page_collapses_tail() {
        assert_eq!(
            compute_visible_pages(110, 10, 1),
            vec![Page(1), Page(2), Ellipsis, Page(11)]
        );
    }

    #[test]
    fn test_middle_page_collapses_both_sides() {
        assert_eq!(
            compute_visible_pages(110, 10, 6),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(11)]
        );
    }

    #[test]
    fn test_last_page_collapses_head() {
        assert_eq!(
            compute_visible_pages(110, 10, 11),
            vec![Page(1), Ellipsis, Page(10), Page(11)]
        );
    }

    #[test]
    fn test_small_page_sets_are_listed_in_full() {
        assert_eq!(
            compute_visible_pages(50, 10, 3),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(compute_visible_pages(5, 10, 1), vec![Page(1)]);
        assert!(compute_visible_pages(0, 10, 1).is_empty());
    }

    #[test]
    fn test_window_adjacent_to_edges_has_no_ellipsis() {
        // Page 3 of 6: window 2..=4 touches page 1, gap before page 6
        assert_eq!(
            compute_visible_pages(60, 10, 3),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]
        );
        // Page 4 of 6: window 3..=5 touches page 6
        assert_eq!(
            compute_visible_pages(60, 10, 4),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn test_no_duplicate_entries() {
        for current in 1..=11 {
            let pages = compute_visible_pages(110, 10, current);
            for pair in pages.windows(2) {
                assert_ne!(pair[0], pair[1], "duplicate at page {}", current);
            }
        }
    }

    #[test]
    fn test_out_of_range_current_page_is_clamped() {
        assert_eq!(
            compute_visible_pages(110, 10, 0),
            compute_visible_pages(110, 10, 1)
        );
        assert_eq!(
            compute_visible_pages(110, 10, 99),
            compute_visible_pages(110, 10, 11)
        );
    }

    #[test]
    fn test_prev_next_disabled_states() {
        let first = Pagination::new(110, 10, 1);
        assert!(first.prev_disabled());
        assert!(!first.next_disabled());

        let last = Pagination::new(110, 10, 11);
        assert!(!last.prev_disabled());
        assert!(last.next_disabled());

        let single = Pagination::new(5, 10, 1);
        assert!(single.prev_disabled());
        assert!(single.next_disabled());

        let empty = Pagination::new(0, 10, 1);
        assert!(empty.next_disabled());
    }

    #[test]
    fn test_requests_emit_target_page() {
        let bar = Pagination::new(110, 10, 2);
        assert_eq!(bar.request(PageControl::Prev), Some(1));
        assert_eq!(bar.request(PageControl::Next), Some(3));
        assert_eq!(bar.request(PageControl::Page(11)), Some(11));
        assert_eq!(bar.request(PageControl::Page(2)), Some(2));
    }

    #[test]
    fn test_disabled_controls_emit_nothing() {
        assert_eq!(Pagination::new(110, 10, 1).request(PageControl::Prev), None);
        assert_eq!(Pagination::new(110, 10, 11).request(PageControl::Next), None);
        assert_eq!(Pagination::new(110, 10, 1).request(PageControl::Page(12)), None);
        assert_eq!(Pagination::new(110, 10, 1).request(PageControl::Page(0)), None);
    }

    #[test]
    fn test_visibility() {
        assert!(!Pagination::new(20, 20, 1).is_visible());
        assert!(Pagination::new(21, 20, 1).is_visible());
        assert!(!Pagination::new(0, 20, 1).is_visible());
    }
}
