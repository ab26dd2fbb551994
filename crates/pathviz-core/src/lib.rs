//! **pathviz-core**: the grid model behind the pathfinding visualiser.
//!
//! This crate provides the cell and grid types the search engine walks over:
//! positions, cell roles and visitation marks, start/end designation,
//! editing tools, neighbour queries and bulk resets.

pub mod cell;
pub mod config;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellState};
pub use config::GridConfig;
pub use geom::{DIRS_4, Pos, manhattan};
pub use grid::{Grid, GridError, Tool};
