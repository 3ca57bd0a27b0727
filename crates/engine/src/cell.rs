use serde::{Deserialize, Serialize};

/// A single grid value.
///
/// Serializes untagged so a row reads as a plain JSON array
/// (`["a", 1.5, true, null]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    /// The value an empty editor produces: an empty string, not `Null`.
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    /// Coerce raw editor input.
    ///
    /// Input whose trimmed form is a finite number becomes `Number`; anything
    /// else (including the empty string) is kept verbatim as `Text`.
    pub fn from_input(raw: &str) -> Self {
        match parse_number(raw) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(raw.to_string()),
        }
    }

    /// Null or empty string. Blanks always sort last.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric interpretation used by sorting: numbers as-is, text that
    /// parses as a finite number, nothing else.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// Stringified form shared by search, filters, clipboard and diff.
    pub fn display(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Number(n) => format_number(*n),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

/// Parse text as a finite number after trimming. Empty text is not a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Canonical decimal rendering: shortest round-trip form, `-0` normalized to `0`.
pub fn format_number(n: f64) -> String {
    let n = if n == 0.0 { 0.0 } else { n };
    format!("{}", n)
}
