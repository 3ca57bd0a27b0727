//! The editor controller.
//!
//! `Editor` owns the current document state and every piece of state derived
//! from it. Public methods are split across modules by concern
//! (`grid_ops`, `clipboard`, `find_replace`, ...), all as `impl Editor`.
//!
//! Data flow for every mutation:
//! intent -> engine computes a new grid -> history records the prior snapshot
//! -> the new grid is installed -> derived state is recomputed explicitly.

use std::fmt;
use std::time::{Duration, Instant};

use csvedit_config::Settings;
use csvedit_core::Selection;
use csvedit_engine::filter::FilterSet;
use csvedit_engine::history::{History, Snapshot};
use csvedit_engine::search::MatchList;
use csvedit_engine::view::{RowView, ROWS_PER_PAGE};
use csvedit_engine::{Grid, GridError};
use csvedit_io::IoError;

use crate::dirty::DirtyTracker;
use crate::mode::InteractionMode;

/// Filename used after a reset.
pub const UNTITLED_FILENAME: &str = "untitled.csv";
/// Filename offered by export when nothing was loaded.
pub const EXPORT_FILENAME: &str = "export.csv";

#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    Grid(GridError),
    Parse(IoError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<GridError> for EditorError {
    fn from(e: GridError) -> Self {
        EditorError::Grid(e)
    }
}

impl From<IoError> for EditorError {
    fn from(e: IoError) -> Self {
        EditorError::Parse(e)
    }
}

/// Outcome of asking to leave the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackRequest {
    /// Nothing unsaved; the editor has been reset.
    Reset,
    /// Unsaved changes: call `confirm_discard` to proceed.
    NeedsConfirmation,
}

/// Search inputs plus the derived match list.
#[derive(Debug, Clone, Default)]
pub(crate) struct SearchState {
    pub term: String,
    pub replacement: String,
    pub use_regex: bool,
    pub matches: MatchList,
    /// Compile error for the current regex term
    pub pattern_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Editor {
    // Document
    pub(crate) grid: Grid,
    pub(crate) freeze_row: Option<usize>,
    pub(crate) freeze_col: Option<usize>,
    pub(crate) history: History,
    pub(crate) filename: Option<String>,
    /// Grid as loaded, for dirty tracking and the session diff
    pub(crate) original: Option<Grid>,
    pub(crate) dirty: DirtyTracker,

    // Interaction
    pub(crate) selection: Option<Selection>,
    pub(crate) mode: InteractionMode,

    // Filter + pagination
    pub(crate) filters: FilterSet,
    pub(crate) row_view: RowView,
    pub(crate) page: usize,
    pub(crate) rows_per_page: usize,

    // Find/replace
    pub(crate) search: SearchState,

    pub status_message: Option<String>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            grid: Grid::new(),
            freeze_row: None,
            freeze_col: None,
            history: History::with_limit(settings.history_limit),
            filename: None,
            original: None,
            dirty: DirtyTracker::new(Duration::from_millis(settings.dirty_check_delay_ms)),
            selection: None,
            mode: InteractionMode::Idle,
            filters: FilterSet::new(),
            row_view: RowView::new(0),
            page: 0,
            rows_per_page: if settings.rows_per_page == 0 { ROWS_PER_PAGE } else { settings.rows_per_page },
            search: SearchState::default(),
            status_message: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn freeze_row(&self) -> Option<usize> {
        self.freeze_row
    }

    pub fn freeze_col(&self) -> Option<usize> {
        self.freeze_col
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn original(&self) -> Option<&Grid> {
        self.original.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn row_view(&self) -> &RowView {
        &self.row_view
    }

    /// Last result of the debounced comparison.
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Run the pending dirty comparison if its delay has elapsed.
    pub fn poll_dirty(&mut self, now: Instant) -> bool {
        self.dirty.poll(now, &self.grid, self.original.as_ref())
    }

    // =========================================================================
    // State installation
    // =========================================================================

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.grid.clone(), self.freeze_row, self.freeze_col)
    }

    /// Install `grid` as one undoable step. Returns false (and records
    /// nothing) when the grid is unchanged.
    pub(crate) fn commit(&mut self, grid: Grid) -> bool {
        self.commit_state(Snapshot::new(grid, self.freeze_row, self.freeze_col))
    }

    /// Install a full snapshot (grid + freeze anchors) as one undoable step.
    /// `next.columns_changed` marks the step as a column-layout change.
    pub(crate) fn commit_state(&mut self, next: Snapshot) -> bool {
        let grid_changed = !next.grid.ptr_eq(&self.grid) && next.grid != self.grid;
        if !grid_changed && next.freeze_row == self.freeze_row && next.freeze_col == self.freeze_col {
            return false;
        }
        self.history.record(self.snapshot().with_columns_changed(next.columns_changed));
        self.install(next, grid_changed);
        true
    }

    /// Swap in a snapshot without touching history (undo/redo).
    pub(crate) fn install(&mut self, next: Snapshot, grid_changed: bool) {
        self.grid = next.grid;
        self.freeze_row = next.freeze_row;
        self.freeze_col = next.freeze_col;
        self.refresh_view();
        if grid_changed {
            self.dirty.schedule(Instant::now());
            self.recompute_matches();
        }
        self.clamp_selection();
    }

    /// Rebuild the filtered row list and keep the page in range.
    pub(crate) fn refresh_view(&mut self) {
        self.row_view = RowView::build(&self.grid, &self.filters);
        self.page = self.row_view.clamp_page(self.page, self.rows_per_page);
    }

    pub(crate) fn clamp_selection(&mut self) {
        let (rows, cols) = (self.grid.row_count(), self.grid.column_count());
        self.selection = self.selection.and_then(|sel| sel.clamp_to(rows, cols));
        if let Some(cell) = self.mode.editing_cell() {
            if !self.grid.contains(cell.row, cell.col) {
                self.mode = InteractionMode::Idle;
            }
        }
    }

    /// Drop every piece of document-derived state (load, reset).
    pub(crate) fn discard_derived(&mut self) {
        self.history.clear();
        self.freeze_row = None;
        self.freeze_col = None;
        self.filters.clear();
        self.selection = None;
        self.mode = InteractionMode::Idle;
        self.page = 0;
        self.dirty.reset();
        self.refresh_view();
        self.recompute_matches();
    }
}
