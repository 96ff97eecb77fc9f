/// Number of pages needed for `total` items at `per_page` items each.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Clamp a user-supplied minimum relevance into the 0..=100 range.
pub fn clamp_relevance(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Pagination state for one rendered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl PageInfo {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        Self {
            page: page.max(1),
            per_page,
            total,
        }
    }

    /// Safe zero state shown after errors and before the first search.
    pub fn empty(per_page: u64) -> Self {
        Self {
            page: 1,
            per_page,
            total: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.per_page)
    }

    /// Controls are hidden entirely when there is nothing to page through.
    pub fn visible(&self) -> bool {
        self.total > 0 && self.total_pages() > 1
    }

    pub fn has_prev(&self) -> bool {
        self.total > 0 && self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total > 0 && self.page < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_results_at_twenty_five_per_page_is_two_pages() {
        assert_eq!(total_pages(30, 25), 2);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(total_pages(50, 25), 2);
    }

    #[test]
    fn zero_results_hides_controls_and_disables_both_directions() {
        let info = PageInfo::new(1, 25, 0);
        assert_eq!(info.total_pages(), 0);
        assert!(!info.visible());
        assert!(!info.has_prev());
        assert!(!info.has_next());
    }

    #[test]
    fn single_page_is_not_visible() {
        let info = PageInfo::new(1, 25, 2);
        assert!(!info.visible());
        assert!(!info.has_next());
    }

    #[test]
    fn boundaries_block_paging() {
        let info = PageInfo::new(1, 25, 30);
        assert!(info.has_next());
        assert!(!info.has_prev());
        let last = PageInfo::new(2, 25, 30);
        assert!(last.has_prev());
        assert!(!last.has_next());
    }

    #[test]
    fn relevance_clamps_to_percent_range() {
        assert_eq!(clamp_relevance(-5), 0);
        assert_eq!(clamp_relevance(10), 10);
        assert_eq!(clamp_relevance(250), 100);
    }
}
