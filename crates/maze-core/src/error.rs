//! Error types shared by the grid container and the search engines.

use thiserror::Error;

use crate::geom::Point;

/// Errors raised by [`Grid`](crate::Grid) access and search construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate lies outside the grid.
    #[error("point {pos} is outside a {width}x{height} grid")]
    OutOfBounds { pos: Point, width: i32, height: i32 },
    /// Malformed dimensions, coordinates or settings at construction.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A flat cell sequence does not match `width * height`.
    #[error("expected {expected} cells, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// A path was requested to a cell the search never reached.
    #[error("no path to {0}")]
    ReconstructionFailure(Point),
}

/// Errors raised while turning puzzle text into grids or points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A row's width differs from the first row.
    #[error("line {line} has {actual} columns, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// The character mapping rejected a character.
    #[error("invalid character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Point },
    /// A coordinate line was not of the form `x,y`.
    #[error("line {line}: expected `x,y`, got \u{201c}{content}\u{201d}")]
    InvalidPoint { line: usize, content: String },
    #[error(transparent)]
    Grid(#[from] GridError),
}
