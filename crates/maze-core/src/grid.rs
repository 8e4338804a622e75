//! The [`Grid`] type — a dense, fixed-size 2D container.
//!
//! Cells are stored row-major (`index = y * width + x`). Width and height are
//! fixed at construction. The checked accessors ([`get`](Grid::get),
//! [`set`](Grid::set)) report out-of-bounds coordinates as
//! [`GridError::OutOfBounds`]; [`at`](Grid::at) is the non-failing lookup.

use std::fmt;

use crate::error::GridError;
use crate::geom::{Point, Range};

/// A dense 2D grid of `T` values addressed by [`Point`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "GridRepr<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

/// Validate dimensions and return the cell count.
///
/// The cell count must fit an `i32` so every flat index maps back to a
/// [`Point`], and the backing buffer must fit in `isize::MAX` bytes.
fn checked_len<T>(width: i32, height: i32) -> Result<usize, GridError> {
    if width < 0 || height < 0 {
        return Err(GridError::InvalidArgument(format!(
            "negative grid size {width}x{height}"
        )));
    }
    let overflow = || GridError::InvalidArgument(format!("grid size {width}x{height} overflows"));
    let len = width.checked_mul(height).ok_or_else(overflow)? as usize;
    match len.checked_mul(size_of::<T>()) {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(len),
        _ => Err(overflow()),
    }
}

impl<T: Clone> Grid<T> {
    /// Create a new grid of the given dimensions, filled with `fill`.
    ///
    /// Zero-sized grids are allowed.
    pub fn new(width: i32, height: i32, fill: T) -> Result<Self, GridError> {
        let len = checked_len::<T>(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![fill; len],
        })
    }
}

impl<T> Grid<T> {
    /// Build a grid from a row-major sequence of cells.
    pub fn from_vec(width: i32, height: i32, cells: Vec<T>) -> Result<Self, GridError> {
        let expected = checked_len::<T>(width, height)?;
        if cells.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The bounding range `[(0, 0), (width, height))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Point at a flat row-major index. The index must be below [`len`](Grid::len).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    fn out_of_bounds(&self, pos: Point) -> GridError {
        GridError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        }
    }

    /// Read the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Read the cell at `p`.
    pub fn get(&self, p: Point) -> Result<&T, GridError> {
        self.at(p).ok_or_else(|| self.out_of_bounds(p))
    }

    /// Mutable access to the cell at `p`.
    pub fn get_mut(&mut self, p: Point) -> Result<&mut T, GridError> {
        match self.index(p) {
            Some(i) => Ok(&mut self.cells[i]),
            None => Err(self.out_of_bounds(p)),
        }
    }

    /// Overwrite the cell at `p`.
    pub fn set(&mut self, p: Point, value: T) -> Result<(), GridError> {
        *self.get_mut(p)? = value;
        Ok(())
    }

    /// Row-major cells.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Mutable row-major cells. The length is fixed.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Row-major iterator over `(Point, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }

    /// Produce a same-sized grid by applying `f` to every cell.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// First point, in row-major order, whose cell satisfies `pred`.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Point> {
        self.iter().find(|(_, v)| pred(*v)).map(|(p, _)| p)
    }

    /// Render the grid as text, one line per row, one character per cell.
    pub fn render(&self, mut f: impl FnMut(Point, &T) -> char) -> String {
        let mut out = String::with_capacity(self.len() + self.height.max(0) as usize);
        for (p, v) in self.iter() {
            out.push(f(p, v));
            if p.x + 1 == self.width {
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for Grid<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_, &c| c))
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<GridRepr<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(r: GridRepr<T>) -> Result<Self, GridError> {
        Grid::from_vec(r.width, r.height, r.cells)
    }
}
