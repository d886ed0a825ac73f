/// Page arithmetic over the ordered list of pairs.

use std::ops::Range;

/// Which navigation buttons are usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    pub first: bool,
    pub prev: bool,
    pub next: bool,
    pub last: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    total: usize,
    per_page: usize,
    current: usize,
}

impl Paginator {
    /// `per_page` must be at least 1
    pub fn new(total: usize, per_page: usize) -> Self {
        Self {
            total,
            per_page: per_page.max(1),
            current: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Always at least one page, even with nothing to show
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page).max(1)
    }

    fn last_index(&self) -> usize {
        self.page_count() - 1
    }

    /// Indices of the pairs on the current page
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.current * self.per_page).min(self.total);
        let end = (start + self.per_page).min(self.total);
        start..end
    }

    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    pub fn prev(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.last_index())
    }

    /// Move to `page` if it exists and differs from the current one
    fn go_to(&mut self, page: usize) -> bool {
        if page > self.last_index() || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    pub fn nav_state(&self) -> NavState {
        let back = self.current > 0;
        let forward = self.current < self.last_index();
        NavState {
            first: back,
            prev: back,
            next: forward,
            last: forward,
        }
    }

    /// Share of pairs reached so far, 0..=100
    pub fn progress(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let reached = self.current * self.per_page + self.per_page;
        (reached * 100 / self.total).min(100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(Paginator::new(0, 4).page_count(), 1);
        assert_eq!(Paginator::new(1, 4).page_count(), 1);
        assert_eq!(Paginator::new(4, 4).page_count(), 1);
        assert_eq!(Paginator::new(5, 4).page_count(), 2);
        assert_eq!(Paginator::new(10, 4).page_count(), 3);
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut pager = Paginator::new(10, 4);
        assert!(!pager.prev());
        assert!(!pager.first());
        assert_eq!(pager.current_page(), 0);

        assert!(pager.last());
        assert_eq!(pager.current_page(), 2);
        assert!(!pager.next());
        assert!(!pager.last());
        assert_eq!(pager.current_page(), 2);

        assert!(pager.prev());
        assert_eq!(pager.current_page(), 1);
        assert!(pager.first());
        assert_eq!(pager.current_page(), 0);
    }

    #[test]
    fn test_empty_has_no_navigation() {
        let mut pager = Paginator::new(0, 4);
        assert!(!pager.next());
        assert!(!pager.last());
        assert_eq!(pager.page_range(), 0..0);
        assert_eq!(pager.nav_state(), NavState::default());
        assert_eq!(pager.progress(), 0);
    }

    #[test]
    fn test_last_page_is_partial() {
        let mut pager = Paginator::new(10, 4);
        assert_eq!(pager.page_range(), 0..4);
        pager.next();
        assert_eq!(pager.page_range(), 4..8);
        pager.next();
        assert_eq!(pager.page_range(), 8..10);
    }

    #[test]
    fn test_progress_capped() {
        let mut pager = Paginator::new(10, 4);
        assert_eq!(pager.progress(), 40);
        pager.next();
        assert_eq!(pager.progress(), 80);
        pager.next();
        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.progress(), 100);

        assert_eq!(Paginator::new(3, 4).progress(), 100);
        assert_eq!(Paginator::new(12, 4).progress(), 33);
    }

    #[test]
    fn test_nav_state() {
        let mut pager = Paginator::new(9, 4);
        assert_eq!(
            pager.nav_state(),
            NavState { first: false, prev: false, next: true, last: true }
        );
        pager.next();
        assert_eq!(
            pager.nav_state(),
            NavState { first: true, prev: true, next: true, last: true }
        );
        pager.last();
        assert_eq!(
            pager.nav_state(),
            NavState { first: true, prev: true, next: false, last: false }
        );
    }
}
