//! **maze-core** — grid containers and geometry for grid puzzles.
//!
//! This crate provides the foundational types used by the search engines in
//! `maze-paths`: geometry primitives, a dense fixed-size [`Grid`], integer
//! terrain markers, and helpers for turning puzzle text into grids.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod parse;

pub use cell::Cell;
pub use error::{GridError, ParseError};
pub use geom::{Direction, Point, Range};
pub use grid::Grid;
pub use parse::{parse_char_grid, parse_grid, parse_points};
