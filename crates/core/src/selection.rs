use serde::{Deserialize, Serialize};

/// A rectangular range of cells, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl CellRange {
    /// Create a new range, normalizing so start <= end.
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            start_row: r1.min(r2),
            start_col: c1.min(c2),
            end_row: r1.max(r2),
            end_col: c1.max(c2),
        }
    }

    pub fn single(row: usize, col: usize) -> Self {
        Self::new(row, col, row, col)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    pub fn row_count(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    pub fn col_count(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (start_col, end_col) = (self.start_col, self.end_col);
        (self.start_row..=self.end_row).flat_map(move |r| (start_col..=end_col).map(move |c| (r, c)))
    }

    pub fn is_single(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }
}

/// Anchor/free selection.
///
/// The anchor is where the gesture started; the free end follows the
/// pointer or shift-arrows. The covered range is the box spanned by both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    anchor: (usize, usize),
    free: (usize, usize),
}

impl Selection {
    /// Single-cell selection.
    pub fn new(row: usize, col: usize) -> Self {
        Self { anchor: (row, col), free: (row, col) }
    }

    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    pub fn free(&self) -> (usize, usize) {
        self.free
    }

    pub fn range(&self) -> CellRange {
        CellRange::new(self.anchor.0, self.anchor.1, self.free.0, self.free.1)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.range().contains(row, col)
    }

    pub fn is_single_cell(&self) -> bool {
        self.anchor == self.free
    }

    /// Collapse to a single cell (click).
    pub fn select_cell(&mut self, row: usize, col: usize) {
        self.anchor = (row, col);
        self.free = (row, col);
    }

    /// Move only the free end (drag, shift+click).
    pub fn extend_to(&mut self, row: usize, col: usize) {
        self.free = (row, col);
    }

    /// Move the anchor by one step and collapse onto it.
    ///
    /// Returns false, leaving the selection untouched, when the step would
    /// leave a `rows` x `cols` grid.
    pub fn move_by(&mut self, d_row: isize, d_col: isize, rows: usize, cols: usize) -> bool {
        match step(self.anchor, d_row, d_col, rows, cols) {
            Some((r, c)) => {
                self.select_cell(r, c);
                true
            }
            None => false,
        }
    }

    /// Move only the free end by one step. Edge behaviour as `move_by`.
    pub fn extend_by(&mut self, d_row: isize, d_col: isize, rows: usize, cols: usize) -> bool {
        match step(self.free, d_row, d_col, rows, cols) {
            Some(cell) => {
                self.free = cell;
                true
            }
            None => false,
        }
    }

    /// Pull both ends inside a `rows` x `cols` grid after a structural edit.
    /// None if the grid has no cells left.
    pub fn clamp_to(&self, rows: usize, cols: usize) -> Option<Selection> {
        if rows == 0 || cols == 0 {
            return None;
        }
        let clamp = |(r, c): (usize, usize)| (r.min(rows - 1), c.min(cols - 1));
        Some(Selection { anchor: clamp(self.anchor), free: clamp(self.free) })
    }
}

fn step(from: (usize, usize), d_row: isize, d_col: isize, rows: usize, cols: usize) -> Option<(usize, usize)> {
    let row = from.0.checked_add_signed(d_row)?;
    let col = from.1.checked_add_signed(d_col)?;
    (row < rows && col < cols).then_some((row, col))
}
