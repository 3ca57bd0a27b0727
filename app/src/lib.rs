pub mod app;
pub mod clipboard;
pub mod dirty;
mod editing;
mod file_ops;
mod find_replace;
mod grid_ops;
pub mod mode;
mod navigation;
mod sort_filter;
mod undo_redo;

pub use app::{BackRequest, Editor, EditorError};
pub use mode::InteractionMode;
pub use navigation::Arrow;
