//! Game of Life core functionality

pub mod error;
pub mod grid;
pub mod io;
pub mod world;
pub mod zoo;

pub use error::{GridError, GridResult};
pub use grid::{Cell, Grid};
pub use io::{
    load_ascii, load_binary, load_grid, load_grid_as, save_ascii, save_binary, save_grid, save_grid_as,
    GridFormat,
};
pub use world::World;
pub use zoo::{create_example_patterns, Pattern};
