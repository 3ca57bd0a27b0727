//! Row view: filtered data rows and their pagination.
//!
//! Indices held here are always DATA rows (positions in the grid). The
//! view never reorders rows; sorting permutes the grid itself.

use crate::filter::FilterSet;
use crate::grid::Grid;

/// Default rows per page.
pub const ROWS_PER_PAGE: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowView {
    /// Data rows that pass every active filter, in data order
    visible_rows: Vec<usize>,
    /// Total rows in the grid the view was built from
    row_count: usize,
}

impl RowView {
    /// Identity view: every row visible.
    pub fn new(row_count: usize) -> Self {
        Self {
            visible_rows: (0..row_count).collect(),
            row_count,
        }
    }

    pub fn build(grid: &Grid, filters: &FilterSet) -> Self {
        Self {
            visible_rows: filters.apply(grid),
            row_count: grid.row_count(),
        }
    }

    pub fn visible_rows(&self) -> &[usize] {
        &self.visible_rows
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_filtered(&self) -> bool {
        self.visible_rows.len() != self.row_count
    }

    /// Data row -> position among visible rows (None if hidden)
    pub fn position_of(&self, data_row: usize) -> Option<usize> {
        self.visible_rows.binary_search(&data_row).ok()
    }

    /// Number of pages; at least 1 so an empty view still has a page 0.
    pub fn page_count(&self, per_page: usize) -> usize {
        let per_page = per_page.max(1);
        self.visible_rows.len().div_ceil(per_page).max(1)
    }

    /// Clamp a page index into `0..page_count`.
    pub fn clamp_page(&self, page: usize, per_page: usize) -> usize {
        page.min(self.page_count(per_page) - 1)
    }

    /// Page holding `data_row`, if it is visible.
    pub fn page_of(&self, data_row: usize, per_page: usize) -> Option<usize> {
        self.position_of(data_row).map(|pos| pos / per_page.max(1))
    }

    /// Data rows displayed on `page`.
    ///
    /// With a freeze row set, the visible rows at or above it are pinned to
    /// the top of every page; the page's own slice follows without repeating
    /// them.
    pub fn page_rows(&self, page: usize, per_page: usize, freeze_row: Option<usize>) -> Vec<usize> {
        let per_page = per_page.max(1);
        let start = page.saturating_mul(per_page).min(self.visible_rows.len());
        let end = start.saturating_add(per_page).min(self.visible_rows.len());
        let slice = &self.visible_rows[start..end];

        let Some(freeze) = freeze_row else {
            return slice.to_vec();
        };

        let mut rows: Vec<usize> = self
            .visible_rows
            .iter()
            .copied()
            .take_while(|&r| r <= freeze)
            .collect();
        rows.extend(slice.iter().copied().filter(|&r| r > freeze));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn column(values: &[&str]) -> Grid {
        Grid::from_rows(values.iter().map(|v| vec![Cell::from(*v)]).collect()).unwrap()
    }

    #[test]
    fn test_identity_view() {
        let view = RowView::new(3);
        assert_eq!(view.visible_rows(), &[0, 1, 2]);
        assert!(!view.is_filtered());
        assert_eq!(view.page_count(1000), 1);
        assert_eq!(view.page_rows(0, 1000, None), vec![0, 1, 2]);
    }

    #[test]
    fn test_build_from_filters() {
        let g = column(&["a", "b", "a", "c"]);
        let mut filters = FilterSet::new();
        filters.toggle_value(&g, 0, "b").unwrap();
        filters.toggle_value(&g, 0, "c").unwrap();
        let view = RowView::build(&g, &filters);
        assert_eq!(view.visible_rows(), &[0, 2]);
        assert!(view.is_filtered());
        assert_eq!(view.position_of(2), Some(1));
        assert_eq!(view.position_of(1), None);
    }

    #[test]
    fn test_pagination() {
        let view = RowView::new(25);
        assert_eq!(view.page_count(10), 3);
        assert_eq!(view.page_rows(2, 10, None), (20..25).collect::<Vec<_>>());
        assert_eq!(view.page_of(19, 10), Some(1));
        assert_eq!(view.clamp_page(7, 10), 2);
        assert!(view.page_rows(9, 10, None).is_empty());
    }

    #[test]
    fn test_empty_view_has_one_page() {
        let view = RowView::new(0);
        assert_eq!(view.page_count(1000), 1);
        assert_eq!(view.clamp_page(3, 1000), 0);
        assert!(view.page_rows(0, 1000, Some(0)).is_empty());
    }

    #[test]
    fn test_frozen_rows_pinned_without_duplicates() {
        let view = RowView::new(25);
        // First page already holds the frozen rows
        assert_eq!(view.page_rows(0, 10, Some(1)), (0..10).collect::<Vec<_>>());
        // Later pages get them prepended
        let page = view.page_rows(1, 10, Some(1));
        assert_eq!(&page[..2], &[0, 1]);
        assert_eq!(&page[2..], &(10..20).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn test_frozen_rows_respect_filters() {
        let g = column(&["h", "x", "y", "x", "y"]);
        let mut filters = FilterSet::new();
        filters.toggle_value(&g, 0, "x").unwrap();
        let view = RowView::build(&g, &filters);
        assert_eq!(view.visible_rows(), &[0, 2, 4]);
        // Row 1 is frozen but hidden, so only row 0 pins
        assert_eq!(view.page_rows(1, 2, Some(1)), vec![0, 4]);
    }
}
