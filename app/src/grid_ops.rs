//! Grid structural operations
//!
//! Contains:
//! - Cell writes
//! - Insert/delete/move/append rows and columns
//! - Freeze row/column toggles
//!
//! Every operation is one undo step and returns whether anything changed.
//! Column operations clear all filters: filter keys are column positions.

use csvedit_engine::history::Snapshot;
use csvedit_engine::{Grid, GridError, InsertPosition};

use crate::app::{Editor, EditorError};

impl Editor {
    /// Write editor input into a cell (numeric text becomes a number).
    pub fn set_cell(&mut self, row: usize, col: usize, raw: &str) -> Result<bool, EditorError> {
        let grid = self.grid.set_cell(row, col, raw)?;
        Ok(self.commit(grid))
    }

    // =========================================================================
    // Rows
    // =========================================================================

    pub fn insert_row(&mut self, at: usize, position: InsertPosition) -> Result<bool, EditorError> {
        let grid = self.grid.insert_row(at, position)?;
        Ok(self.commit(grid))
    }

    pub fn delete_row(&mut self, at: usize) -> Result<bool, EditorError> {
        let grid = self.grid.delete_row(at)?;
        Ok(self.commit(grid))
    }

    pub fn move_row(&mut self, from: usize, to: usize) -> Result<bool, EditorError> {
        let grid = self.grid.move_row(from, to)?;
        Ok(self.commit(grid))
    }

    pub fn append_row(&mut self) -> bool {
        let grid = self.grid.append_row();
        self.commit(grid)
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn insert_column(&mut self, at: usize, position: InsertPosition) -> Result<bool, EditorError> {
        let grid = self.grid.insert_column(at, position)?;
        Ok(self.commit_column_change(grid))
    }

    pub fn delete_column(&mut self, at: usize) -> Result<bool, EditorError> {
        let grid = self.grid.delete_column(at)?;
        Ok(self.commit_column_change(grid))
    }

    pub fn move_column(&mut self, from: usize, to: usize) -> Result<bool, EditorError> {
        let grid = self.grid.move_column(from, to)?;
        Ok(self.commit_column_change(grid))
    }

    pub fn append_column(&mut self) -> bool {
        let grid = self.grid.append_column();
        self.commit_column_change(grid)
    }

    fn commit_column_change(&mut self, grid: Grid) -> bool {
        let next = Snapshot::new(grid, self.freeze_row, self.freeze_col).with_columns_changed(true);
        let changed = self.commit_state(next);
        if changed && !self.filters.is_empty() {
            self.filters.clear();
            self.refresh_view();
        }
        changed
    }

    // =========================================================================
    // Freeze
    // =========================================================================

    /// Freeze rows up to and including `at`; the same index again unfreezes.
    pub fn toggle_freeze_row(&mut self, at: usize) -> Result<bool, EditorError> {
        if at >= self.grid.row_count() {
            return Err(GridError::out_of_bounds(at, 0, self.grid.row_count(), self.grid.column_count()).into());
        }
        let freeze_row = if self.freeze_row == Some(at) { None } else { Some(at) };
        Ok(self.commit_state(Snapshot::new(self.grid.clone(), freeze_row, self.freeze_col)))
    }

    /// Freeze columns up to and including `at`; the same index again unfreezes.
    pub fn toggle_freeze_col(&mut self, at: usize) -> Result<bool, EditorError> {
        if at >= self.grid.column_count() {
            return Err(GridError::out_of_bounds(0, at, self.grid.row_count(), self.grid.column_count()).into());
        }
        let freeze_col = if self.freeze_col == Some(at) { None } else { Some(at) };
        Ok(self.commit_state(Snapshot::new(self.grid.clone(), self.freeze_row, freeze_col)))
    }
}
