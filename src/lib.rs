//! Perfect-maze generation and path search on character grids.
//!
//! A maze is a [`Grid`] of walls (`1`), open cells (`0`), one start (`S`) and one goal (`G`).
//! [`generate`] carves a perfect maze with randomized depth-first backtracking, and a
//! [`Strategy`] searches a grid for a path from start to goal breadth-first, depth-first or
//! greedy best-first. [`Game`] keeps a player session on a grid, and the [`cli`] module drives
//! the terminal interface and the printing subcommands of the `mazeseek` binary.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod cli;
pub mod engine;
pub mod generator;
pub mod grid;
pub mod search;

mod app;
mod events;
mod file_loader;
mod logging;
mod map;
mod types;
mod ui;

pub use engine::Game;
pub use generator::{generate, generate_with_rng, InvalidDimensions};
pub use grid::{Cell, Coord, Direction, Grid, ParseError, Path};
pub use search::Strategy;
