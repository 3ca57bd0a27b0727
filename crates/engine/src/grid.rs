//! Grid Store - the canonical 2-D table of cell values.
//!
//! Every mutator is pure: it takes `&Grid` and returns a new `Grid`.
//! Rows are `Arc<[Cell]>` and are never mutated once published, so a new
//! grid shares every row it did not touch with its predecessor. Cloning a
//! grid (taking a history snapshot) is a single reference-count bump.
//!
//! Invariant: all rows have the same width. Mutators assert this in debug
//! builds; external input goes through `Grid::from_rows`, which rejects
//! ragged tables.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::GridError;
use crate::filter::{SortDirection, SortKey};

/// One row of cells. Shared between grids, replaced wholesale on edit.
pub type Row = Arc<[Cell]>;

/// A (row, col) address into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Where a structural insert lands relative to the target index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    Before,
    After,
}

impl InsertPosition {
    fn resolve(self, at: usize) -> usize {
        match self {
            InsertPosition::Before => at,
            InsertPosition::After => at + 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Arc<Vec<Row>>,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.rows, &other.rows) {
            return true;
        }
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(other.rows.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b) || a[..] == b[..])
    }
}

impl Grid {
    /// An empty grid (no rows, no columns).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from owned rows. Ragged input is rejected.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
                return Err(GridError::InvariantViolation { row, expected, found: r.len() });
            }
        }
        Ok(Self::with_rows(rows.into_iter().map(Row::from).collect()))
    }

    fn with_rows(rows: Vec<Row>) -> Self {
        let grid = Self { rows: Arc::new(rows) };
        debug_assert!(grid.is_rectangular(), "row width mismatch after structural edit");
        grid
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of row 0; 0 for an empty grid.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(|r| &r[..])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Bounds-checked cell access.
    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell, GridError> {
        self.get(row, col).ok_or_else(|| self.out_of_bounds(row, col))
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.row_count() && col < self.column_count()
    }

    /// Iterate all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, cell)| (Coord::new(r, c), cell))
        })
    }

    /// Owned copy of the table.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows.iter().map(|r| r.to_vec()).collect()
    }

    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// True when both grids are the same published table (no comparison of cells).
    pub fn ptr_eq(&self, other: &Grid) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> GridError {
        GridError::out_of_bounds(row, col, self.row_count(), self.column_count())
    }

    fn check_row(&self, row: usize) -> Result<(), GridError> {
        if row < self.row_count() {
            Ok(())
        } else {
            Err(self.out_of_bounds(row, 0))
        }
    }

    fn check_col(&self, col: usize) -> Result<(), GridError> {
        if col < self.column_count() {
            Ok(())
        } else {
            Err(self.out_of_bounds(0, col))
        }
    }

    // -------------------------------------------------------------------------
    // Cell writes
    // -------------------------------------------------------------------------

    /// Set a cell from editor input, coercing numeric text to a number.
    pub fn set_cell(&self, row: usize, col: usize, raw: &str) -> Result<Grid, GridError> {
        self.set_value(row, col, Cell::from_input(raw))
    }

    /// Set a cell to an already-typed value.
    pub fn set_value(&self, row: usize, col: usize, value: Cell) -> Result<Grid, GridError> {
        self.update_cells([(Coord::new(row, col), value)])
    }

    /// Write several cells at once. Each touched row is copied exactly once.
    /// Fails without writing anything if any coordinate is out of bounds.
    pub fn update_cells<I>(&self, edits: I) -> Result<Grid, GridError>
    where
        I: IntoIterator<Item = (Coord, Cell)>,
    {
        let mut touched: BTreeMap<usize, Vec<Cell>> = BTreeMap::new();
        for (at, value) in edits {
            if !self.contains(at.row, at.col) {
                return Err(self.out_of_bounds(at.row, at.col));
            }
            let row = touched
                .entry(at.row)
                .or_insert_with(|| self.rows[at.row].to_vec());
            row[at.col] = value;
        }

        if touched.is_empty() {
            return Ok(self.clone());
        }

        let mut rows: Vec<Row> = Vec::clone(&self.rows);
        for (r, cells) in touched {
            rows[r] = Row::from(cells);
        }
        Ok(Self::with_rows(rows))
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Insert a row of empty strings before or after `at`.
    /// On an empty grid only `at == 0` is valid and the new row is one cell wide.
    pub fn insert_row(&self, at: usize, position: InsertPosition) -> Result<Grid, GridError> {
        let width = if self.is_empty() {
            if at != 0 {
                return Err(self.out_of_bounds(at, 0));
            }
            1
        } else {
            self.check_row(at)?;
            self.column_count()
        };

        let index = if self.is_empty() { 0 } else { position.resolve(at) };
        let mut rows: Vec<Row> = Vec::clone(&self.rows);
        rows.insert(index, empty_row(width));
        Ok(Self::with_rows(rows))
    }

    /// Remove a row. The grid may end up with zero rows.
    pub fn delete_row(&self, at: usize) -> Result<Grid, GridError> {
        self.check_row(at)?;
        let mut rows: Vec<Row> = Vec::clone(&self.rows);
        rows.remove(at);
        Ok(Self::with_rows(rows))
    }

    /// Relocate a row, preserving the order of all others.
    pub fn move_row(&self, from: usize, to: usize) -> Result<Grid, GridError> {
        self.check_row(from)?;
        self.check_row(to)?;
        if from == to {
            return Ok(self.clone());
        }
        let mut rows: Vec<Row> = Vec::clone(&self.rows);
        let moved = rows.remove(from);
        rows.insert(to, moved);
        Ok(Self::with_rows(rows))
    }

    /// Add a row at the bottom. An empty grid becomes a single empty cell.
    pub fn append_row(&self) -> Grid {
        if self.is_empty() {
            return Self::single_empty_cell();
        }
        let mut rows: Vec<Row> = Vec::clone(&self.rows);
        rows.push(empty_row(self.column_count()));
        Self::with_rows(rows)
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Insert an empty-string column before or after `at`, across every row.
    pub fn insert_column(&self, at: usize, position: InsertPosition) -> Result<Grid, GridError> {
        let width = self.column_count();
        let index = if width == 0 {
            if at != 0 || self.is_empty() {
                return Err(self.out_of_bounds(0, at));
            }
            0
        } else {
            self.check_col(at)?;
            position.resolve(at)
        };

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = row.to_vec();
                cells.insert(index, Cell::empty());
                Row::from(cells)
            })
            .collect();
        Ok(Self::with_rows(rows))
    }

    /// Remove a column from every row.
    pub fn delete_column(&self, at: usize) -> Result<Grid, GridError> {
        self.check_col(at)?;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = row.to_vec();
                cells.remove(at);
                Row::from(cells)
            })
            .collect();
        Ok(Self::with_rows(rows))
    }

    /// Relocate a column in every row.
    pub fn move_column(&self, from: usize, to: usize) -> Result<Grid, GridError> {
        self.check_col(from)?;
        self.check_col(to)?;
        if from == to {
            return Ok(self.clone());
        }
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = row.to_vec();
                let moved = cells.remove(from);
                cells.insert(to, moved);
                Row::from(cells)
            })
            .collect();
        Ok(Self::with_rows(rows))
    }

    /// Add a column at the right edge. An empty grid becomes a single empty cell.
    pub fn append_column(&self) -> Grid {
        if self.is_empty() {
            return Self::single_empty_cell();
        }
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = row.to_vec();
                cells.push(Cell::empty());
                Row::from(cells)
            })
            .collect();
        Self::with_rows(rows)
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Stable sort of all rows by one column.
    ///
    /// Blanks (null or empty string) go last in both directions. Numeric
    /// values compare numerically, text compares case-insensitively.
    /// Rows are moved, never copied.
    pub fn sort_by_column(&self, col: usize, direction: SortDirection) -> Result<Grid, GridError> {
        self.check_col(col)?;
        let mut keyed: Vec<(SortKey, Row)> = self
            .rows
            .iter()
            .map(|row| (SortKey::from_cell(&row[col]), Row::clone(row)))
            .collect();
        keyed.sort_by(|a, b| a.0.compare(&b.0, direction));
        Ok(Self::with_rows(keyed.into_iter().map(|(_, row)| row).collect()))
    }

    fn single_empty_cell() -> Grid {
        Self::with_rows(vec![empty_row(1)])
    }
}

fn empty_row(width: usize) -> Row {
    vec![Cell::empty(); width].into()
}
