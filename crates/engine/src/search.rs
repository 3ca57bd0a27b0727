//! Find and replace over every cell of the grid.
//!
//! Matching always runs against the stringified cell value of the full,
//! unfiltered grid.
//!
//! Two patterns are in play in regex mode:
//! - matching (find, and deciding which cells replace-all touches) is
//!   case-insensitive and tests for a single match;
//! - substitution is case-sensitive and replaces every match in the cell.
//!
//! Literal mode mirrors this: matching is a case-insensitive substring
//! test, substitution replaces every case-sensitive occurrence.

use regex::{Regex, RegexBuilder};

use crate::cell::Cell;
use crate::error::GridError;
use crate::grid::{Coord, Grid};

/// How cells are matched
enum Matcher {
    Literal(String),
    Pattern(Regex),
}

impl Matcher {
    fn new(term: &str, use_regex: bool) -> Result<Self, GridError> {
        if use_regex {
            let re = RegexBuilder::new(term)
                .case_insensitive(true)
                .build()
                .map_err(|e| GridError::Pattern(e.to_string()))?;
            Ok(Matcher::Pattern(re))
        } else {
            Ok(Matcher::Literal(term.to_lowercase()))
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Literal(needle) => text.to_lowercase().contains(needle.as_str()),
            Matcher::Pattern(re) => re.is_match(text),
        }
    }
}

/// How a matched cell is rewritten
enum Replacer {
    Literal(String),
    Pattern(Regex),
}

/// Rewrite a replacement template into the regex crate's syntax.
///
/// Templates use the familiar find/replace dialect: `$1`..`$99` (two digits
/// only when that group exists), `$&` for the whole match, `$<name>` for a
/// named group and `$$` for a dollar sign. A `$` that starts none of these,
/// including a reference to a missing group, stays literal. The result
/// braces every reference, so `$1x` means group 1 followed by `x`.
fn to_regex_template(template: &str, groups: usize) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '$' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            out.push_str("$$");
            break;
        };
        match next {
            '$' => {
                out.push_str("$$");
                i += 2;
            }
            '&' => {
                out.push_str("${0}");
                i += 2;
            }
            '<' => match chars[i + 2..].iter().position(|&c| c == '>') {
                Some(len) => {
                    let name: String = chars[i + 2..i + 2 + len].iter().collect();
                    out.push_str(&format!("${{{}}}", name));
                    i += len + 3;
                }
                None => {
                    out.push_str("$$");
                    i += 1;
                }
            },
            _ => {
                let first = next.to_digit(10).map(|d| d as usize);
                let second = chars.get(i + 2).and_then(|c| c.to_digit(10)).map(|d| d as usize);
                match (first, second) {
                    (Some(a), Some(b)) if (1..=groups).contains(&(a * 10 + b)) => {
                        out.push_str(&format!("${{{}}}", a * 10 + b));
                        i += 3;
                    }
                    (Some(a), _) if (1..=groups).contains(&a) => {
                        out.push_str(&format!("${{{}}}", a));
                        i += 2;
                    }
                    _ => {
                        out.push_str("$$");
                        i += 1;
                    }
                }
            }
        }
    }
    out
}

impl Replacer {
    fn new(term: &str, use_regex: bool) -> Result<Self, GridError> {
        if use_regex {
            let re = Regex::new(term).map_err(|e| GridError::Pattern(e.to_string()))?;
            Ok(Replacer::Pattern(re))
        } else {
            Ok(Replacer::Literal(term.to_string()))
        }
    }

    /// Replace every occurrence within one cell's text.
    /// Regex replacements expand group references, see `to_regex_template`.
    fn apply(&self, text: &str, replacement: &str) -> String {
        match self {
            Replacer::Literal(term) => text.replace(term.as_str(), replacement),
            Replacer::Pattern(re) => {
                let template = to_regex_template(replacement, re.captures_len() - 1);
                re.replace_all(text, template.as_str()).into_owned()
            }
        }
    }
}

/// Coordinates of every matching cell, row-major.
///
/// An empty term or an invalid pattern yields no matches.
pub fn find(grid: &Grid, term: &str, use_regex: bool) -> Vec<Coord> {
    if term.is_empty() {
        return Vec::new();
    }
    let Ok(matcher) = Matcher::new(term, use_regex) else {
        return Vec::new();
    };
    grid.cells()
        .filter(|(_, cell)| matcher.is_match(&cell.display()))
        .map(|(at, _)| at)
        .collect()
}

/// Check a pattern without searching.
pub fn validate_pattern(term: &str) -> Result<(), GridError> {
    Matcher::new(term, true).map(|_| ())
}

/// Rewrite the single cell at `matches[cursor]`.
///
/// Every occurrence inside that cell is replaced and the cell becomes text.
/// In regex mode `replacement` may reference groups as `$1`, `$&` or
/// `$<name>`; the regex crate's own `${name}` form is not recognised.
/// A cursor past the end of `matches` (including an empty list) leaves the
/// grid as is. An invalid pattern returns `GridError::Pattern` and a stale
/// coordinate returns `GridError::OutOfBounds`; in both cases no cell changes.
pub fn replace_one(
    grid: &Grid,
    matches: &[Coord],
    cursor: usize,
    term: &str,
    replacement: &str,
    use_regex: bool,
) -> Result<Grid, GridError> {
    let Some(&at) = matches.get(cursor) else {
        return Ok(grid.clone());
    };
    if term.is_empty() {
        return Ok(grid.clone());
    }
    let replacer = Replacer::new(term, use_regex)?;
    let text = grid.cell(at.row, at.col)?.display();
    grid.set_value(at.row, at.col, Cell::Text(replacer.apply(&text, replacement)))
}

/// Rewrite every cell that currently matches `term`.
///
/// Eligibility is re-evaluated per cell rather than taken from an earlier
/// match list. The replacement follows the same template rules as
/// `replace_one`. An invalid pattern aborts with `GridError::Pattern` before
/// any cell changes.
pub fn replace_all(grid: &Grid, term: &str, replacement: &str, use_regex: bool) -> Result<Grid, GridError> {
    if term.is_empty() {
        return Ok(grid.clone());
    }
    let replacer = Replacer::new(term, use_regex)?;
    let matcher = Matcher::new(term, use_regex)?;

    let edits: Vec<(Coord, Cell)> = grid
        .cells()
        .filter_map(|(at, cell)| {
            let text = cell.display();
            matcher
                .is_match(&text)
                .then(|| (at, Cell::Text(replacer.apply(&text, replacement))))
        })
        .collect();

    grid.update_cells(edits)
}

// =============================================================================
// MatchList
// =============================================================================

/// Current matches plus a cursor that wraps in both directions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchList {
    matches: Vec<Coord>,
    cursor: usize,
}

impl MatchList {
    /// Cursor starts at the first match.
    pub fn new(matches: Vec<Coord>) -> Self {
        Self { matches, cursor: 0 }
    }

    pub fn matches(&self) -> &[Coord] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The focused match, if any.
    pub fn current(&self) -> Option<Coord> {
        self.matches.get(self.cursor).copied()
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.matches.contains(&at)
    }

    pub fn next(&mut self) {
        if !self.matches.is_empty() {
            self.cursor = (self.cursor + 1) % self.matches.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.matches.is_empty() {
            let len = self.matches.len();
            self.cursor = (self.cursor + len - 1) % len;
        }
    }
}
