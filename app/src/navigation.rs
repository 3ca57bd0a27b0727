//! Pointer and arrow-key selection.
//!
//! Mouse: down starts a drag (anchor = free = cell), enter extends the free
//! end while dragging, up ends the drag. Arrows move one cell from the
//! anchor; with shift only the free end moves. Steps past the grid edge are
//! ignored, as are arrows while a cell is being edited.

use csvedit_core::Selection;

use crate::app::Editor;
use crate::mode::InteractionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    fn delta(self) -> (isize, isize) {
        match self {
            Arrow::Up => (-1, 0),
            Arrow::Down => (1, 0),
            Arrow::Left => (0, -1),
            Arrow::Right => (0, 1),
        }
    }
}

impl Editor {
    pub fn mouse_down(&mut self, row: usize, col: usize) {
        if self.mode.is_editing() {
            if let Err(e) = self.commit_edit() {
                log::warn!("edit dropped on mouse down: {}", e);
            }
        }
        if !self.grid.contains(row, col) {
            return;
        }
        self.selection = Some(Selection::new(row, col));
        self.mode = InteractionMode::Selecting;
    }

    pub fn mouse_enter(&mut self, row: usize, col: usize) {
        if !self.mode.is_selecting() || !self.grid.contains(row, col) {
            return;
        }
        if let Some(sel) = self.selection.as_mut() {
            sel.extend_to(row, col);
        }
    }

    pub fn mouse_up(&mut self) {
        if self.mode.is_selecting() {
            self.mode = InteractionMode::Idle;
        }
    }

    /// Returns true if the selection moved.
    pub fn arrow(&mut self, arrow: Arrow, shift: bool) -> bool {
        if self.mode.is_editing() {
            return false;
        }
        let (rows, cols) = (self.grid.row_count(), self.grid.column_count());
        let (d_row, d_col) = arrow.delta();
        match self.selection.as_mut() {
            Some(sel) if shift => sel.extend_by(d_row, d_col, rows, cols),
            Some(sel) => sel.move_by(d_row, d_col, rows, cols),
            None => false,
        }
    }

    /// Select a single cell programmatically.
    pub fn select_cell(&mut self, row: usize, col: usize) -> bool {
        if !self.grid.contains(row, col) {
            return false;
        }
        self.selection = Some(Selection::new(row, col));
        true
    }
}
