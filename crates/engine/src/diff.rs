//! Cell-by-cell comparison of two grids.
//!
//! Used for the session diff (grid as loaded vs. grid now) and for
//! comparing two independently loaded files. Rows are aligned by index;
//! no attempt is made to detect moved rows.

use serde::Serialize;

use crate::cell::Cell;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Same,
    Added,
    Removed,
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Same,
    Added,
    Removed,
    Changed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellDiff {
    pub status: CellStatus,
    /// Value on the left side, if the cell exists there
    pub left: Option<Cell>,
    /// Value on the right side, if the cell exists there
    pub right: Option<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDiff {
    pub status: RowStatus,
    pub cells: Vec<CellDiff>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added_rows: usize,
    pub removed_rows: usize,
    pub modified_rows: usize,
    pub changed_cells: usize,
}

impl DiffSummary {
    pub fn is_clean(&self) -> bool {
        *self == DiffSummary::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridDiff {
    pub rows: Vec<RowDiff>,
    pub column_count: usize,
    pub summary: DiffSummary,
}

/// Compare `left` (before) against `right` (after).
///
/// Returns `None` when both grids are empty. The result spans the larger of
/// the two in each dimension. Cells are compared by their displayed text,
/// so a number and its textual spelling compare equal.
pub fn diff_grids(left: &Grid, right: &Grid) -> Option<GridDiff> {
    if left.is_empty() && right.is_empty() {
        return None;
    }

    let row_count = left.row_count().max(right.row_count());
    let column_count = left.column_count().max(right.column_count());
    let mut summary = DiffSummary::default();

    let rows = (0..row_count)
        .map(|r| {
            let side = if r >= left.row_count() {
                Some(CellStatus::Added)
            } else if r >= right.row_count() {
                Some(CellStatus::Removed)
            } else {
                None
            };

            let cells: Vec<CellDiff> = (0..column_count)
                .map(|c| {
                    let a = left.get(r, c).cloned();
                    let b = right.get(r, c).cloned();
                    let status = side.unwrap_or_else(|| {
                        if display_of(a.as_ref()) != display_of(b.as_ref()) {
                            CellStatus::Changed
                        } else {
                            CellStatus::Same
                        }
                    });
                    CellDiff { status, left: a, right: b }
                })
                .collect();

            let status = match side {
                Some(CellStatus::Added) => RowStatus::Added,
                Some(_) => RowStatus::Removed,
                None => {
                    let changed = cells.iter().filter(|c| c.status == CellStatus::Changed).count();
                    summary.changed_cells += changed;
                    if changed > 0 {
                        RowStatus::Modified
                    } else {
                        RowStatus::Same
                    }
                }
            };
            match status {
                RowStatus::Added => summary.added_rows += 1,
                RowStatus::Removed => summary.removed_rows += 1,
                RowStatus::Modified => summary.modified_rows += 1,
                RowStatus::Same => {}
            }

            RowDiff { status, cells }
        })
        .collect();

    Some(GridDiff { rows, column_count, summary })
}

fn display_of(cell: Option<&Cell>) -> Option<String> {
    cell.map(Cell::display)
}
