pub mod selection;

pub use selection::{CellRange, Selection};
