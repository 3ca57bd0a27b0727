//! File operations
//!
//! Contains:
//! - Load (bytes or path) and export
//! - Reset / back-navigation with unsaved-change confirmation
//! - Session diff (as loaded vs. now) and two-file diff

use std::path::Path;

use csvedit_engine::diff::{diff_grids, GridDiff};
use csvedit_engine::Grid;
use csvedit_io::csv::{self, ParseIssue};

use crate::app::{BackRequest, Editor, EditorError, EXPORT_FILENAME, UNTITLED_FILENAME};

impl Editor {
    // =========================================================================
    // Load / export
    // =========================================================================

    /// Parse `bytes` and make them the current document.
    ///
    /// On a parse error nothing changes. On success history, freeze anchors,
    /// filters and selection are discarded and the editor is clean.
    pub fn load(&mut self, filename: &str, bytes: &[u8]) -> Result<Vec<ParseIssue>, EditorError> {
        let outcome = csv::parse(bytes).map_err(|e| {
            log::warn!("Failed to load {}: {}", filename, e);
            e
        })?;
        if !outcome.issues.is_empty() {
            log::warn!("{}: {} row(s) padded to a common width", filename, outcome.issues.len());
        }

        self.open_grid(filename, outcome.grid);
        self.status_message = Some(format!("Opened {}", filename));
        Ok(outcome.issues)
    }

    pub fn load_path(&mut self, path: &Path) -> Result<Vec<ParseIssue>, EditorError> {
        let bytes = std::fs::read(path).map_err(|e| {
            log::warn!("Failed to read {}: {}", path.display(), e);
            csvedit_io::IoError::from(e)
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load(&name, &bytes)
    }

    /// Current grid as CSV, with the filename to save it under.
    pub fn export(&self) -> Result<(String, String), EditorError> {
        let text = csv::serialize(&self.grid)?;
        let filename = self.filename.clone().unwrap_or_else(|| EXPORT_FILENAME.to_string());
        Ok((filename, text))
    }

    pub fn export_to_path(&self, path: &Path) -> Result<(), EditorError> {
        csv::export_to_path(&self.grid, path)?;
        log::debug!("exported {} row(s) to {}", self.grid.row_count(), path.display());
        Ok(())
    }

    // =========================================================================
    // Reset / back
    // =========================================================================

    /// Start over with an empty, untitled document.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.original = None;
        self.filename = Some(UNTITLED_FILENAME.to_string());
        self.discard_derived();
        self.status_message = None;
    }

    /// Leave the current document, asking first if it has unsaved changes.
    pub fn request_back(&mut self) -> BackRequest {
        if self.has_unsaved_changes() {
            return BackRequest::NeedsConfirmation;
        }
        self.reset();
        BackRequest::Reset
    }

    /// Proceed after the user confirmed discarding changes.
    pub fn confirm_discard(&mut self) {
        self.reset();
    }

    /// Immediate comparison against the loaded grid, bypassing the debounce.
    pub fn has_unsaved_changes(&self) -> bool {
        self.original.as_ref().is_some_and(|orig| orig != &self.grid)
    }

    // =========================================================================
    // Diff
    // =========================================================================

    /// Differences between the grid as loaded and the grid now.
    pub fn session_diff(&self) -> Option<GridDiff> {
        diff_grids(self.original.as_ref()?, &self.grid)
    }

    /// Parse two files independently and compare them.
    pub fn diff_files(left: &[u8], right: &[u8]) -> Result<Option<GridDiff>, EditorError> {
        let left = csv::parse(left)?;
        let right = csv::parse(right)?;
        Ok(diff_grids(&left.grid, &right.grid))
    }

    /// Make an already-built grid the current document, as `load` does.
    pub fn open_grid(&mut self, filename: &str, grid: Grid) {
        self.original = Some(grid.clone());
        self.grid = grid;
        self.filename = Some(filename.to_string());
        self.discard_derived();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvedit_engine::diff::RowStatus;
    use csvedit_engine::Cell;
    use std::time::{Duration, Instant};
    use tempfile::tempdir;

    #[test]
    fn test_load_replaces_state() {
        let mut editor = Editor::new();
        editor.load("a.csv", b"a,b\n").unwrap();
        editor.set_cell(0, 0, "x").unwrap();
        editor.toggle_freeze_row(0).unwrap();
        editor.toggle_filter_value(1, "b").unwrap();

        editor.load("b.csv", b"1\n2\n").unwrap();
        assert_eq!(editor.filename(), Some("b.csv"));
        assert_eq!(editor.grid().row_count(), 2);
        assert!(!editor.can_undo());
        assert_eq!(editor.freeze_row(), None);
        assert!(editor.filters().is_empty());
        assert!(editor.selection().is_none());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_load_reports_ragged_rows() {
        let mut editor = Editor::new();
        let issues = editor.load("r.csv", b"a,b\nc\n").unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(editor.grid().get(1, 1), Some(&Cell::Null));
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let dir = tempdir().unwrap();
        let mut editor = Editor::new();
        editor.load("a.csv", b"a\n").unwrap();
        editor.set_cell(0, 0, "b").unwrap();
        let before = editor.grid().clone();

        assert!(editor.load_path(&dir.path().join("missing.csv")).is_err());
        assert_eq!(editor.grid(), &before);
        assert_eq!(editor.filename(), Some("a.csv"));
        assert!(editor.can_undo());
    }

    #[test]
    fn test_load_path_uses_file_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "x;y\n1;2\n").unwrap();
        let mut editor = Editor::new();
        editor.load_path(&path).unwrap();
        assert_eq!(editor.filename(), Some("data.csv"));
        assert_eq!(editor.grid().get(1, 1), Some(&Cell::Number(2.0)));
    }

    #[test]
    fn test_export_default_filename() {
        let editor = Editor::new();
        let (name, text) = editor.export().unwrap();
        assert_eq!(name, "export.csv");
        assert_eq!(text, "");

        let mut editor = Editor::new();
        editor.load("in.csv", b"a,1\n").unwrap();
        assert_eq!(editor.export().unwrap(), ("in.csv".to_string(), "a,1\n".to_string()));
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut editor = Editor::new();
        editor.load("in.csv", b"a,b\n").unwrap();
        editor.set_cell(0, 1, "2").unwrap();
        editor.export_to_path(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,2\n");
    }

    #[test]
    fn test_reset() {
        let mut editor = Editor::new();
        editor.load("a.csv", b"a\n").unwrap();
        editor.set_search_term("a");
        editor.reset();
        assert!(editor.grid().is_empty());
        assert_eq!(editor.filename(), Some("untitled.csv"));
        assert!(editor.original().is_none());
        assert!(editor.matches().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_request_back_clean_resets() {
        let mut editor = Editor::new();
        editor.load("a.csv", b"a\n").unwrap();
        assert_eq!(editor.request_back(), BackRequest::Reset);
        assert!(editor.grid().is_empty());
    }

    #[test]
    fn test_request_back_dirty_needs_confirmation() {
        let mut editor = Editor::new();
        editor.load("a.csv", b"a\n").unwrap();
        editor.set_cell(0, 0, "b").unwrap();
        assert_eq!(editor.request_back(), BackRequest::NeedsConfirmation);
        assert_eq!(editor.grid().get(0, 0), Some(&Cell::from("b")));
        editor.confirm_discard();
        assert!(editor.grid().is_empty());
    }

    #[test]
    fn test_dirty_after_debounce() {
        let mut editor = Editor::new();
        editor.load("a.csv", b"1\n").unwrap();
        editor.set_cell(0, 0, "2").unwrap();
        assert!(!editor.is_dirty());
        assert!(editor.poll_dirty(Instant::now() + Duration::from_secs(1)));
        editor.undo();
        assert!(!editor.poll_dirty(Instant::now() + Duration::from_secs(2)));
    }

    #[test]
    fn test_session_diff() {
        let mut editor = Editor::new();
        assert!(editor.session_diff().is_none());
        editor.load("a.csv", b"a\nb\n").unwrap();
        editor.delete_row(1).unwrap();
        let diff = editor.session_diff().unwrap();
        assert_eq!(diff.rows[1].status, RowStatus::Removed);
        assert_eq!(diff.summary.removed_rows, 1);
    }

    #[test]
    fn test_diff_files() {
        let diff = Editor::diff_files(b"a,b\n", b"a,c\nd,e\n").unwrap().unwrap();
        assert_eq!(diff.rows[0].status, RowStatus::Modified);
        assert_eq!(diff.rows[1].status, RowStatus::Added);
        assert!(Editor::diff_files(b"", b"").unwrap().is_none());
    }
}
