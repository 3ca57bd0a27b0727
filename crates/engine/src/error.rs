use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// A coordinate outside the current grid bounds.
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// A search pattern that failed to compile.
    Pattern(String),
    /// A row whose width differs from the rest of the grid.
    InvariantViolation {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl GridError {
    pub fn out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self::OutOfBounds { row, col, rows, cols }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { row, col, rows, cols } => {
                write!(f, "cell ({row}, {col}) is outside a {rows}x{cols} grid")
            }
            Self::Pattern(msg) => write!(f, "invalid search pattern: {msg}"),
            Self::InvariantViolation { row, expected, found } => {
                write!(f, "row {row} has {found} cell(s), expected {expected}")
            }
        }
    }
}

impl std::error::Error for GridError {}
