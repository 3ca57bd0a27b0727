//! In-place cell editing.
//!
//! begin (click / Enter / F2) -> type into the buffer -> commit (Enter /
//! blur) or cancel (Escape). A commit is one undo step.

use csvedit_core::Selection;
use csvedit_engine::Coord;

use crate::app::{Editor, EditorError};
use crate::mode::InteractionMode;

impl Editor {
    /// Start editing a cell, seeding the buffer with its current text.
    /// Returns false for a cell outside the grid.
    pub fn begin_edit(&mut self, row: usize, col: usize) -> bool {
        let Some(cell) = self.grid.get(row, col) else {
            return false;
        };
        let buffer = cell.display();
        self.selection = Some(Selection::new(row, col));
        self.mode = InteractionMode::Editing { cell: Coord::new(row, col), buffer };
        true
    }

    /// Enter / F2: edit the selection's anchor cell.
    pub fn begin_edit_at_anchor(&mut self) -> bool {
        match self.selection.map(|sel| sel.anchor()) {
            Some((row, col)) => self.begin_edit(row, col),
            None => false,
        }
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        match &self.mode {
            InteractionMode::Editing { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    pub fn set_edit_buffer(&mut self, text: &str) {
        if let InteractionMode::Editing { buffer, .. } = &mut self.mode {
            *buffer = text.to_string();
        }
    }

    /// Write the buffer into the cell and return to idle.
    /// Ok(false) when not editing or the value is unchanged.
    pub fn commit_edit(&mut self) -> Result<bool, EditorError> {
        if !self.mode.is_editing() {
            return Ok(false);
        }
        let InteractionMode::Editing { cell, buffer } = std::mem::take(&mut self.mode) else {
            return Ok(false);
        };
        if self.grid.get(cell.row, cell.col).is_some_and(|c| c.display() == buffer) {
            return Ok(false);
        }
        self.set_cell(cell.row, cell.col, &buffer)
    }

    /// Discard the buffer.
    pub fn cancel_edit(&mut self) {
        if self.mode.is_editing() {
            self.mode = InteractionMode::Idle;
        }
    }
}
