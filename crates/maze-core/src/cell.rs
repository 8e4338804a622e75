//! Terrain markers for integer grids.
//!
//! [`Cell`] is a newtype over `i32`. Zero marks impassable terrain and any
//! other value is passable; callers are free to use further non-zero values
//! as tags (start, end, ...) without affecting searches.

/// A map cell value, wrapping an `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell(pub i32);

impl Cell {
    /// Impassable terrain.
    pub const BLOCKED: Cell = Cell(0);
    /// Plain passable terrain.
    pub const WALKABLE: Cell = Cell(1);

    /// Create a new cell with the given value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the underlying integer value.
    pub const fn value(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_walkable(self) -> bool {
        self.0 != Self::BLOCKED.0
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<Cell> for i32 {
    fn from(c: Cell) -> Self {
        c.0
    }
}

impl From<bool> for Cell {
    /// `true` maps to [`Cell::WALKABLE`], `false` to [`Cell::BLOCKED`].
    fn from(walkable: bool) -> Self {
        if walkable { Self::WALKABLE } else { Self::BLOCKED }
    }
}
