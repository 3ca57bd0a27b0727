pub mod cell;
pub mod diff;
pub mod error;
pub mod filter;
pub mod grid;
pub mod history;
pub mod search;
pub mod view;

pub use cell::Cell;
pub use error::GridError;
pub use grid::{Coord, Grid, InsertPosition};
