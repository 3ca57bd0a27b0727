//! Sort and filter operations
//!
//! Contains:
//! - Sort by column (undoable, permutes the grid)
//! - Column value filters (not undoable, view-only)
//! - Pagination over the filtered rows

use csvedit_engine::filter::{self, SortDirection, UniqueValue};

use crate::app::{Editor, EditorError};

impl Editor {
    // ========================================================================
    // Sort
    // ========================================================================

    /// Stable sort of all rows by `col`. One undo step.
    pub fn sort_by_column(&mut self, col: usize, direction: SortDirection) -> Result<bool, EditorError> {
        let grid = self.grid.sort_by_column(col, direction)?;
        Ok(self.commit(grid))
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Distinct values of `col` with counts, most frequent first. A non-empty
    /// `query` keeps only values containing it (case-insensitive).
    pub fn filter_values(&self, col: usize, query: &str) -> Result<Vec<UniqueValue>, EditorError> {
        let values = if query.is_empty() {
            filter::unique_values(&self.grid, col)?
        } else {
            filter::unique_values_matching(&self.grid, col, query)?
        };
        Ok(values)
    }

    pub fn is_filter_value_selected(&self, col: usize, value: &str) -> bool {
        self.filters.is_value_selected(col, value)
    }

    /// Flip one value in a column's filter. The first toggle on a column
    /// starts from "everything selected".
    pub fn toggle_filter_value(&mut self, col: usize, value: &str) -> Result<(), EditorError> {
        self.filters.toggle_value(&self.grid, col, value)?;
        self.refresh_view();
        Ok(())
    }

    /// Remove the filter on `col`.
    pub fn select_all_filter(&mut self, col: usize) {
        self.filters.select_all(col);
        self.refresh_view();
    }

    /// Hide every row (empty allowed set for `col`).
    pub fn clear_all_filter(&mut self, col: usize) {
        self.filters.clear_all(col);
        self.refresh_view();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refresh_view();
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn page_count(&self) -> usize {
        self.row_view.page_count(self.rows_per_page)
    }

    /// Jump to a page; out-of-range pages clamp to the last one.
    pub fn set_page(&mut self, page: usize) {
        self.page = self.row_view.clamp_page(page, self.rows_per_page);
    }

    /// Data rows to display on the current page, frozen rows first.
    pub fn page_rows(&self) -> Vec<usize> {
        self.row_view.page_rows(self.page, self.rows_per_page, self.freeze_row)
    }
}
