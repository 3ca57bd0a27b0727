//! Find and Replace for Editor.
//!
//! Matches always cover the full grid, including rows hidden by filters.
//! The match list is recomputed whenever the term, the regex flag or the
//! grid changes, and the cursor goes back to the first match.

use csvedit_engine::search::{self, MatchList};
use csvedit_engine::{Coord, GridError};

use crate::app::{Editor, EditorError};

impl Editor {
    // =========================================================================
    // Inputs
    // =========================================================================

    pub fn set_search_term(&mut self, term: &str) {
        if self.search.term != term {
            self.search.term = term.to_string();
            self.recompute_matches();
        }
    }

    pub fn set_use_regex(&mut self, use_regex: bool) {
        if self.search.use_regex != use_regex {
            self.search.use_regex = use_regex;
            self.recompute_matches();
        }
    }

    pub fn set_replacement(&mut self, replacement: &str) {
        self.search.replacement = replacement.to_string();
    }

    pub fn search_term(&self) -> &str {
        &self.search.term
    }

    pub fn replacement(&self) -> &str {
        &self.search.replacement
    }

    pub fn use_regex(&self) -> bool {
        self.search.use_regex
    }

    // =========================================================================
    // Results
    // =========================================================================

    pub fn matches(&self) -> &[Coord] {
        self.search.matches.matches()
    }

    pub fn match_cursor(&self) -> usize {
        self.search.matches.cursor()
    }

    pub fn current_match(&self) -> Option<Coord> {
        self.search.matches.current()
    }

    /// Compile error for the current regex term, if any.
    pub fn pattern_error(&self) -> Option<&str> {
        self.search.pattern_error.as_deref()
    }

    pub fn find_next(&mut self) {
        self.search.matches.next();
        self.focus_current_match();
    }

    pub fn find_prev(&mut self) {
        self.search.matches.prev();
        self.focus_current_match();
    }

    // =========================================================================
    // Replace
    // =========================================================================

    /// Replace inside the focused match only. One undo step.
    ///
    /// An invalid pattern is not an error here: the grid is left untouched
    /// and `Ok(false)` is returned.
    pub fn replace_current(&mut self) -> Result<bool, EditorError> {
        if self.search.matches.is_empty() {
            return Ok(false);
        }
        let result = search::replace_one(
            &self.grid,
            self.search.matches.matches(),
            self.search.matches.cursor(),
            &self.search.term,
            &self.search.replacement,
            self.search.use_regex,
        );
        self.finish_replace(result)
    }

    /// Replace in every matching cell. One undo step.
    pub fn replace_all(&mut self) -> Result<bool, EditorError> {
        let result = search::replace_all(
            &self.grid,
            &self.search.term,
            &self.search.replacement,
            self.search.use_regex,
        );
        self.finish_replace(result)
    }

    fn finish_replace(&mut self, result: Result<csvedit_engine::Grid, GridError>) -> Result<bool, EditorError> {
        match result {
            Ok(grid) => Ok(self.commit(grid)),
            Err(GridError::Pattern(msg)) => {
                log::debug!("replace skipped, invalid pattern: {}", msg);
                self.status_message = Some(format!("Invalid pattern: {}", msg));
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    pub(crate) fn recompute_matches(&mut self) {
        let term = &self.search.term;
        self.search.pattern_error = if self.search.use_regex && !term.is_empty() {
            search::validate_pattern(term).err().map(|e| match e {
                GridError::Pattern(msg) => msg,
                other => other.to_string(),
            })
        } else {
            None
        };
        if let Some(msg) = &self.search.pattern_error {
            log::debug!("invalid search pattern {:?}: {}", term, msg);
        }

        self.search.matches = MatchList::new(search::find(&self.grid, term, self.search.use_regex));
        self.focus_current_match();
    }

    /// Page to the focused match if a filter is not hiding it.
    fn focus_current_match(&mut self) {
        if let Some(at) = self.search.matches.current() {
            if let Some(page) = self.row_view.page_of(at.row, self.rows_per_page) {
                self.page = page;
            }
        }
    }
}
