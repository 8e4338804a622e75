use maze_core::Cell;

/// How a search engine interprets a grid cell.
pub trait Terrain {
    /// Whether a path may enter this cell.
    fn is_walkable(&self) -> bool;

    /// Cost of entering this cell. Must be > 0, [`GridShortestPath::new`]
    /// fails otherwise.
    ///
    /// [`GridShortestPath::new`]: crate::GridShortestPath::new
    #[inline]
    fn step_cost(&self) -> i32 {
        1
    }
}

impl Terrain for Cell {
    #[inline]
    fn is_walkable(&self) -> bool {
        Cell::is_walkable(*self)
    }
}

/// `true` is walkable.
impl Terrain for bool {
    #[inline]
    fn is_walkable(&self) -> bool {
        *self
    }
}

/// Puzzle text: `#` is a wall, everything else is open floor.
impl Terrain for char {
    #[inline]
    fn is_walkable(&self) -> bool {
        *self != '#'
    }
}
