//! Cursor state for the form's list panels.

use super::constants::PAGE_SIZE;

/// Cursor over a list of `total` items.
///
/// The cursor is kept on a valid row whenever the list is non-empty and
/// sits at 0 when it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub selected: usize,
    pub total: usize,
}

impl ListState {
    #[must_use]
    pub const fn with_total(total: usize) -> Self {
        Self { selected: 0, total }
    }

    /// Change the item count, keeping the cursor in range.
    pub fn reset_total(&mut self, total: usize) {
        self.total = total;
        self.selected = self.selected.min(self.last());
    }

    const fn last(&self) -> usize {
        self.total.saturating_sub(1)
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.last());
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        self.selected = (self.selected + PAGE_SIZE).min(self.last());
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE_SIZE);
    }

    pub fn go_first(&mut self) {
        self.selected = 0;
    }

    pub fn go_last(&mut self) {
        self.selected = self.last();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stops_at_both_ends() {
        let mut state = ListState::with_total(4);

        state.select_prev();
        assert_eq!(state.selected, 0);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 2);

        state.go_last();
        assert_eq!(state.selected, 3);
        state.select_next();
        assert_eq!(state.selected, 3);
        state.go_first();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_empty_list_keeps_cursor_at_zero() {
        let mut state = ListState::with_total(0);
        state.select_next();
        state.page_down();
        state.go_last();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_paging() {
        let mut state = ListState::with_total(25);
        state.page_down();
        assert_eq!(state.selected, PAGE_SIZE);
        state.page_down();
        state.page_down();
        assert_eq!(state.selected, 24);
        state.page_up();
        assert_eq!(state.selected, 24 - PAGE_SIZE);
    }

    #[test]
    fn test_shrinking_list_pulls_cursor_back() {
        let mut state = ListState::with_total(10);
        state.go_last();
        state.reset_total(3);
        assert_eq!(state.selected, 2);
        state.reset_total(0);
        assert_eq!(state.selected, 0);
    }
}
