//! Snapshot-based undo/redo.
//!
//! The caller owns the current state. Before every undoable mutation it
//! hands the pre-mutation snapshot to `record`; `undo`/`redo` take the
//! current snapshot and give back the one to install.

use std::collections::VecDeque;

use crate::grid::Grid;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Everything undo restores: the grid and the freeze anchors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,
    pub freeze_row: Option<usize>,
    pub freeze_col: Option<usize>,
    /// The step between this snapshot and its neighbour inserted, deleted or
    /// moved columns. Travels with the entry between the undo and redo stacks.
    pub columns_changed: bool,
}

impl Snapshot {
    pub fn new(grid: Grid, freeze_row: Option<usize>, freeze_col: Option<usize>) -> Self {
        Self { grid, freeze_row, freeze_col, columns_changed: false }
    }

    pub fn with_columns_changed(mut self, columns_changed: bool) -> Self {
        self.columns_changed = columns_changed;
        self
    }
}

#[derive(Debug, Clone)]
pub struct History {
    /// Oldest first; the back is the most recent state.
    past: VecDeque<Snapshot>,
    /// The front is the next state to redo.
    future: VecDeque<Snapshot>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record the state as it was before a forward mutation.
    /// Any redo branch is discarded.
    pub fn record(&mut self, before: Snapshot) {
        self.push_past(before);
        self.future.clear();
    }

    /// Step back. Returns `current` unchanged when there is nothing to undo.
    ///
    /// The returned snapshot's `columns_changed` describes the step undone.
    pub fn undo(&mut self, mut current: Snapshot) -> Snapshot {
        match self.past.pop_back() {
            Some(previous) => {
                current.columns_changed = previous.columns_changed;
                self.future.push_front(current);
                previous
            }
            None => current,
        }
    }

    /// Step forward. Returns `current` unchanged when there is nothing to redo.
    ///
    /// The returned snapshot's `columns_changed` describes the step redone.
    pub fn redo(&mut self, mut current: Snapshot) -> Snapshot {
        match self.future.pop_front() {
            Some(next) => {
                current.columns_changed = next.columns_changed;
                self.push_past(current);
                next
            }
            None => current,
        }
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.max_entries {
            self.past.pop_front();
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> usize {
        self.max_entries
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
