// Property-based tests for grid edits, history and filters.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::BTreeSet;

use proptest::prelude::*;
use csvedit_app::Editor;
use csvedit_engine::filter::{FilterSet, SortDirection};
use csvedit_engine::history::{History, Snapshot};
use csvedit_engine::{Cell, Grid, InsertPosition};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Arbitrary cell: every variant, small alphabets so values collide.
fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        1 => Just(Cell::Null),
        1 => any::<bool>().prop_map(Cell::Bool),
        3 => (-50i32..50).prop_map(|n| Cell::Number(n as f64 / 2.0)),
        3 => r"[a-cA-C]{0,3}".prop_map(Cell::Text),
    ]
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..8, 1usize..5)
        .prop_flat_map(|(rows, cols)| {
            prop::collection::vec(prop::collection::vec(arb_cell(), cols), rows)
        })
        .prop_map(|rows| Grid::from_rows(rows).expect("generator builds rectangular rows"))
}

#[derive(Debug, Clone)]
enum Op {
    SetCell(usize, usize, String),
    InsertRow(usize),
    DeleteRow(usize),
    MoveRow(usize, usize),
    AppendColumn,
    Sort(usize, bool),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..10, 0usize..6, r"[a-c0-9]{0,2}").prop_map(|(r, c, v)| Op::SetCell(r, c, v)),
        1 => (0usize..10).prop_map(Op::InsertRow),
        1 => (0usize..10).prop_map(Op::DeleteRow),
        1 => (0usize..10, 0usize..10).prop_map(|(a, b)| Op::MoveRow(a, b)),
        1 => Just(Op::AppendColumn),
        1 => (0usize..6, any::<bool>()).prop_map(|(c, asc)| Op::Sort(c, asc)),
    ]
}

/// Apply an op; true if it produced a history entry.
fn apply(editor: &mut Editor, op: &Op) -> bool {
    let result = match op {
        Op::SetCell(r, c, v) => editor.set_cell(*r, *c, v),
        Op::InsertRow(r) => editor.insert_row(*r, InsertPosition::After),
        Op::DeleteRow(r) => editor.delete_row(*r),
        Op::MoveRow(a, b) => editor.move_row(*a, *b),
        Op::AppendColumn => Ok(editor.append_column()),
        Op::Sort(c, asc) => {
            let dir = if *asc { SortDirection::Ascending } else { SortDirection::Descending };
            editor.sort_by_column(*c, dir)
        }
    };
    result.unwrap_or(false)
}

fn visible(filters: &FilterSet, grid: &Grid) -> BTreeSet<usize> {
    filters.apply(grid).into_iter().collect()
}

// ---------------------------------------------------------------------------
// Grid store
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn prop_insert_then_delete_column_roundtrips(grid in arb_grid(), at in 0usize..5) {
        let at = at % grid.column_count();
        let widened = grid.insert_column(at, InsertPosition::After).unwrap();
        prop_assert!(widened.is_rectangular());
        prop_assert_eq!(widened.column_count(), grid.column_count() + 1);
        let back = widened.delete_column(at + 1).unwrap();
        prop_assert_eq!(back, grid);
    }

    #[test]
    fn prop_sort_is_idempotent(grid in arb_grid(), col in 0usize..5, asc in any::<bool>()) {
        let col = col % grid.column_count();
        let dir = if asc { SortDirection::Ascending } else { SortDirection::Descending };
        let once = grid.sort_by_column(col, dir).unwrap();
        let twice = once.sort_by_column(col, dir).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_sort_keeps_blanks_last(grid in arb_grid(), col in 0usize..5, asc in any::<bool>()) {
        let col = col % grid.column_count();
        let dir = if asc { SortDirection::Ascending } else { SortDirection::Descending };
        let sorted = grid.sort_by_column(col, dir).unwrap();
        let blanks: Vec<bool> = sorted.rows().iter().map(|r| r[col].is_blank()).collect();
        let first_blank = blanks.iter().position(|b| *b).unwrap_or(blanks.len());
        prop_assert!(blanks[first_blank..].iter().all(|b| *b));
        prop_assert_eq!(sorted.row_count(), grid.row_count());
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn prop_undo_all_then_redo_all(grid in arb_grid(), ops in prop::collection::vec(arb_op(), 0..20)) {
        let mut editor = Editor::new();
        editor.open_grid("p.csv", grid.clone());

        let mut recorded = 0;
        for op in &ops {
            if apply(&mut editor, op) {
                recorded += 1;
            }
        }
        let final_grid = editor.grid().clone();
        prop_assert_eq!(editor.history().past_len(), recorded);

        for _ in 0..recorded {
            prop_assert!(editor.undo());
        }
        prop_assert!(!editor.can_undo());
        prop_assert_eq!(editor.grid(), &grid);

        for _ in 0..recorded {
            prop_assert!(editor.redo());
        }
        prop_assert!(!editor.can_redo());
        prop_assert_eq!(editor.grid(), &final_grid);
    }

    #[test]
    fn prop_undo_redo_roundtrip_is_noop(grid in arb_grid(), ops in prop::collection::vec(arb_op(), 1..10)) {
        let mut editor = Editor::new();
        editor.open_grid("p.csv", grid);
        for op in &ops {
            apply(&mut editor, op);
        }
        let before = (editor.grid().clone(), editor.freeze_row(), editor.freeze_col());
        if editor.undo() {
            prop_assert!(editor.redo());
        }
        prop_assert_eq!((editor.grid().clone(), editor.freeze_row(), editor.freeze_col()), before);
    }

    #[test]
    fn prop_history_is_bounded(extra in 0usize..30) {
        let mut history = History::new();
        let total = 50 + extra;
        for i in 0..total {
            let grid = Grid::from_rows(vec![vec![Cell::Number(i as f64)]]).unwrap();
            history.record(Snapshot::new(grid, None, None));
        }
        prop_assert_eq!(history.past_len(), 50);

        let mut current = Snapshot::new(Grid::new(), None, None);
        while history.can_undo() {
            current = history.undo(current);
        }
        // The oldest surviving snapshot is `extra`; everything before is gone
        prop_assert_eq!(current.grid.get(0, 0), Some(&Cell::Number(extra as f64)));
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn prop_filters_compose_with_and(
        grid in arb_grid(),
        toggles in prop::collection::vec((0usize..5, 0usize..8), 1..6),
    ) {
        let mut combined = FilterSet::new();
        let mut per_column: Vec<FilterSet> = Vec::new();

        for (col, row) in toggles {
            let col = col % grid.column_count();
            let row = row % grid.row_count();
            let value = grid.get(row, col).map(Cell::display).unwrap_or_default();
            combined.toggle_value(&grid, col, &value).unwrap();
        }

        for col in combined.active_columns() {
            let mut single = FilterSet::new();
            match combined.allowed(col) {
                Some(allowed) if allowed.is_empty() => single.clear_all(col),
                Some(allowed) => {
                    // Rebuild the same allow-list by toggling off everything else
                    for v in csvedit_engine::filter::unique_values(&grid, col).unwrap() {
                        if !allowed.contains(&v.value) {
                            single.toggle_value(&grid, col, &v.value).unwrap();
                        }
                    }
                }
                None => {}
            }
            per_column.push(single);
        }

        let all_rows: BTreeSet<usize> = (0..grid.row_count()).collect();
        let expected = per_column
            .iter()
            .fold(all_rows, |acc, f| acc.intersection(&visible(f, &grid)).copied().collect());
        prop_assert_eq!(visible(&combined, &grid), expected);
    }

    #[test]
    fn prop_removing_a_filter_never_hides_rows(
        grid in arb_grid(),
        toggles in prop::collection::vec((0usize..5, 0usize..8), 1..6),
        drop in 0usize..5,
    ) {
        let mut filters = FilterSet::new();
        for (col, row) in toggles {
            let col = col % grid.column_count();
            let row = row % grid.row_count();
            let value = grid.get(row, col).map(Cell::display).unwrap_or_default();
            filters.toggle_value(&grid, col, &value).unwrap();
        }
        let before = visible(&filters, &grid);
        filters.select_all(drop % grid.column_count());
        let after = visible(&filters, &grid);
        prop_assert!(before.is_subset(&after));
    }
}
