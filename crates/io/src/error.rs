use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum IoError {
    /// Input that could not be read as delimited text.
    Parse { message: String, line: Option<u64> },
    /// Filesystem failure.
    Io(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { message, line: Some(line) } => write!(f, "parse error on line {line}: {message}"),
            Self::Parse { message, line: None } => write!(f, "parse error: {message}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io(e.to_string())
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            return IoError::Io(e.to_string());
        }
        let line = e.position().map(|p| p.line());
        IoError::Parse { message: e.to_string(), line }
    }
}
