//! Column filters and the sort comparator.
//!
//! Filters are keyed by positional column index and hold the set of
//! stringified values allowed through. A column without an entry passes
//! everything. Because entries are positional, any edit that shifts column
//! indices must drop the whole map (`FilterSet::clear`).

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::GridError;
use crate::grid::Grid;

// =============================================================================
// Sorting
// =============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Comparison key for one cell.
///
/// Blanks always sort after everything else, in either direction. Two
/// numbers compare numerically and two texts compare case-insensitively.
///
/// A number against a text does not compare string forms. Mixing numeric and
/// textual comparison is not transitive (`9 < 10` as numbers, `"10" < "9"` as
/// text), and `sort_by` needs a total order. Every number ranks ahead of every
/// text instead, so `5` sorts before `#tag` ascending even though `"#" < "5"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Number(OrderedFloat<f64>),
    /// Lowercased string form
    Text(String),
    Blank,
}

impl SortKey {
    pub fn from_cell(cell: &Cell) -> Self {
        if cell.is_blank() {
            return SortKey::Blank;
        }
        match cell.as_number() {
            Some(n) => SortKey::Number(OrderedFloat(n)),
            None => SortKey::Text(cell.display().to_lowercase()),
        }
    }

    /// Direction flips only non-blank comparisons.
    pub fn compare(&self, other: &SortKey, direction: SortDirection) -> Ordering {
        let ord = match (self, other) {
            (SortKey::Blank, SortKey::Blank) => return Ordering::Equal,
            (SortKey::Blank, _) => return Ordering::Greater,
            (_, SortKey::Blank) => return Ordering::Less,
            (SortKey::Number(a), SortKey::Number(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        };
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Compare two cells the way `Grid::sort_by_column` does.
pub fn compare_cells(a: &Cell, b: &Cell, direction: SortDirection) -> Ordering {
    SortKey::from_cell(a).compare(&SortKey::from_cell(b), direction)
}

// =============================================================================
// Unique values
// =============================================================================

/// One entry of a column's value list (filter dropdown)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueValue {
    pub value: String,
    pub count: usize,
}

/// Distinct stringified values of a column with their occurrence counts.
///
/// Sorted by count descending; ties keep first-seen order.
pub fn unique_values(grid: &Grid, col: usize) -> Result<Vec<UniqueValue>, GridError> {
    if col >= grid.column_count() {
        return Err(GridError::out_of_bounds(0, col, grid.row_count(), grid.column_count()));
    }

    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut entries: Vec<UniqueValue> = Vec::new();

    for row in grid.rows() {
        let value = row[col].display();
        match index.get(&value) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(value.clone(), entries.len());
                entries.push(UniqueValue { value, count: 1 });
            }
        }
    }

    // Stable: equal counts stay in first-seen order
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(entries)
}

/// `unique_values` narrowed to values containing `query` (case-insensitive).
pub fn unique_values_matching(
    grid: &Grid,
    col: usize,
    query: &str,
) -> Result<Vec<UniqueValue>, GridError> {
    let needle = query.to_lowercase();
    let mut values = unique_values(grid, col)?;
    values.retain(|v| v.value.to_lowercase().contains(&needle));
    Ok(values)
}

// =============================================================================
// FilterSet
// =============================================================================

/// Per-column allow-lists, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    columns: HashMap<usize, HashSet<String>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// No column has an entry.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Is this column filtered (has an entry, even a full one)?
    pub fn is_active(&self, col: usize) -> bool {
        self.columns.contains_key(&col)
    }

    pub fn allowed(&self, col: usize) -> Option<&HashSet<String>> {
        self.columns.get(&col)
    }

    /// Columns that currently carry an entry, ascending.
    pub fn active_columns(&self) -> Vec<usize> {
        let mut cols: Vec<usize> = self.columns.keys().copied().collect();
        cols.sort_unstable();
        cols
    }

    /// Would `value` pass the filter on `col`?
    pub fn is_value_selected(&self, col: usize, value: &str) -> bool {
        self.columns.get(&col).map_or(true, |set| set.contains(value))
    }

    /// Flip one value on or off.
    ///
    /// A column without an entry starts from every value currently in the
    /// column, so the first toggle on a value removes it.
    pub fn toggle_value(&mut self, grid: &Grid, col: usize, value: &str) -> Result<(), GridError> {
        if !self.columns.contains_key(&col) {
            let all: HashSet<String> = unique_values(grid, col)?.into_iter().map(|v| v.value).collect();
            self.columns.insert(col, all);
        }
        if let Some(set) = self.columns.get_mut(&col) {
            if !set.remove(value) {
                set.insert(value.to_string());
            }
        }
        Ok(())
    }

    /// Let everything through on `col` (drops the entry).
    pub fn select_all(&mut self, col: usize) {
        self.columns.remove(&col);
    }

    /// Let nothing through on `col`.
    pub fn clear_all(&mut self, col: usize) {
        self.columns.insert(col, HashSet::new());
    }

    /// Drop every entry. Required after any edit that shifts column indices.
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    /// Does a row pass every active column filter?
    ///
    /// A column index beyond the row's width reads as the empty string.
    pub fn row_passes(&self, row: &[Cell]) -> bool {
        self.columns.iter().all(|(&col, allowed)| {
            let value = row.get(col).map(Cell::display).unwrap_or_default();
            allowed.contains(&value)
        })
    }

    /// Data-row indices that pass, in grid order.
    pub fn apply(&self, grid: &Grid) -> Vec<usize> {
        grid.rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| self.row_passes(row))
            .map(|(i, _)| i)
            .collect()
    }
}
