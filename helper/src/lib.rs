//! Grid and graph building blocks shared by the 2023 puzzle crates.

pub mod beam;
pub mod cycle;
pub mod geometry;
pub mod grid;
pub mod math;
pub mod memo;
pub mod pathfinding;
pub mod reach;

pub use geometry::{Direction, Point};
pub use grid::{Grid, GridError};
