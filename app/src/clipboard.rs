//! Clipboard text protocol and the Editor's copy/cut/paste/delete.
//!
//! The wire format is plain TSV: one line per row, cells separated by tabs.
//! Pastes never grow the grid; anything that would land outside it is dropped.

use csvedit_core::CellRange;
use csvedit_engine::{Cell, Coord, Grid, GridError};

use crate::app::{Editor, EditorError};

/// Render a range as tab/newline text. Tabs inside values become spaces.
pub fn serialize_for_copy(grid: &Grid, range: CellRange) -> String {
    (range.start_row..=range.end_row)
        .map(|r| {
            (range.start_col..=range.end_col)
                .map(|c| grid.get(r, c).map(Cell::display).unwrap_or_default().replace('\t', " "))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split clipboard text into rows of fields. Accepts CRLF, LF and CR line
/// endings; trailing empty lines are dropped.
pub fn parse_clipboard(text: &str) -> Vec<Vec<&str>> {
    let mut lines: Vec<&str> = text
        .split("\r\n")
        .flat_map(|chunk| chunk.split(|c: char| c == '\n' || c == '\r'))
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.into_iter().map(|line| line.split('\t').collect()).collect()
}

/// Write clipboard text into `grid` starting at the range's top-left cell.
///
/// Values are coerced like typed input. Cells past the grid edge are
/// silently dropped.
pub fn apply_paste(grid: &Grid, range: CellRange, text: &str) -> Result<Grid, GridError> {
    let edits: Vec<(Coord, Cell)> = parse_clipboard(text)
        .into_iter()
        .enumerate()
        .flat_map(|(dr, fields)| {
            fields.into_iter().enumerate().map(move |(dc, value)| {
                (Coord::new(range.start_row + dr, range.start_col + dc), Cell::from_input(value))
            })
        })
        .filter(|(at, _)| grid.contains(at.row, at.col))
        .collect();
    grid.update_cells(edits)
}

/// Set every cell in the range to the empty string.
pub fn clear_range(grid: &Grid, range: CellRange) -> Result<Grid, GridError> {
    grid.update_cells(
        range
            .cells()
            .filter(|&(r, c)| grid.contains(r, c))
            .map(|(r, c)| (Coord::new(r, c), Cell::empty())),
    )
}

impl Editor {
    // Clipboard

    /// Text for the system clipboard, or None without a selection.
    pub fn copy(&self) -> Option<String> {
        let sel = self.selection?;
        Some(serialize_for_copy(&self.grid, sel.range()))
    }

    /// Copy, then clear the selection as one undo step.
    pub fn cut(&mut self) -> Result<Option<String>, EditorError> {
        let Some(text) = self.copy() else {
            return Ok(None);
        };
        self.delete_selection()?;
        Ok(Some(text))
    }

    /// Paste at the selection's top-left corner. One undo step.
    pub fn paste(&mut self, text: &str) -> Result<bool, EditorError> {
        let Some(sel) = self.selection else {
            return Ok(false);
        };
        let grid = apply_paste(&self.grid, sel.range(), text)?;
        Ok(self.commit(grid))
    }

    /// Delete/Backspace: empty every selected cell. One undo step.
    pub fn delete_selection(&mut self) -> Result<bool, EditorError> {
        let Some(sel) = self.selection else {
            return Ok(false);
        };
        let grid = clear_range(&self.grid, sel.range())?;
        Ok(self.commit(grid))
    }
}
