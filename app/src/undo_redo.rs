//! Undo/Redo for Editor.
//!
//! History stores whole snapshots, so restoring is a swap. Derived state
//! (matches, filtered rows, selection) is rebuilt against the restored grid.
//! Filters are dropped when the step crosses a column insert, delete or
//! move, or the restored grid has a different width: their column indices
//! would point at other columns.

use crate::app::Editor;
use crate::mode::InteractionMode;

impl Editor {
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        self.abandon_edit();
        let current = self.snapshot();
        let previous = self.history.undo(current);
        self.restore(previous);
        self.status_message = Some("Undo".to_string());
        true
    }

    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        self.abandon_edit();
        let current = self.snapshot();
        let next = self.history.redo(current);
        self.restore(next);
        self.status_message = Some("Redo".to_string());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, snapshot: csvedit_engine::history::Snapshot) {
        if snapshot.columns_changed || snapshot.grid.column_count() != self.grid.column_count() {
            self.filters.clear();
        }
        let grid_changed = !snapshot.grid.ptr_eq(&self.grid) && snapshot.grid != self.grid;
        self.install(snapshot, grid_changed);
    }

    fn abandon_edit(&mut self) {
        if self.mode.is_editing() {
            self.mode = InteractionMode::Idle;
        }
    }
}
