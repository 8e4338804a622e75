use std::collections::BinaryHeap;

use maze_core::{Direction, Grid, GridError, Point};

use crate::frontier::{NodeRef, UNREACHABLE};
use crate::traits::Terrain;

/// Single-source uniform-cost search over a grid.
///
/// The whole distance field is computed eagerly by [`new`](Self::new). A step
/// to an orthogonal neighbour costs that neighbour's
/// [`Terrain::step_cost`]; blocked cells are never entered.
///
/// Ties in the frontier resolve by ascending row-major index, so results are
/// deterministic, but [`path_to`](Self::path_to) only promises *a* shortest
/// path among equal-length alternatives.
#[derive(Debug, Clone)]
pub struct GridShortestPath<T> {
    grid: Grid<T>,
    source: Point,
    dist: Grid<i32>,
}

impl<T: Terrain> GridShortestPath<T> {
    /// Run the search from `source`.
    ///
    /// Fails with [`GridError::InvalidArgument`] if `source` lies outside
    /// the grid, or if a reachable cell has a non-positive step cost.
    pub fn new(grid: Grid<T>, source: Point) -> Result<Self, GridError> {
        let Some(si) = grid.index(source) else {
            return Err(GridError::InvalidArgument(format!(
                "source {source} is outside a {}x{} grid",
                grid.width(),
                grid.height()
            )));
        };

        let mut dist = grid.map(|_| UNREACHABLE);
        let mut settled = vec![false; grid.len()];
        let mut open = BinaryHeap::new();
        let mut settled_count = 0usize;

        dist.cells_mut()[si] = 0;
        open.push(NodeRef { idx: si, cost: 0 });

        while let Some(current) = open.pop() {
            let ci = current.idx;
            if settled[ci] {
                continue;
            }
            settled[ci] = true;
            settled_count += 1;

            let cp = grid.point(ci);
            for np in cp.neighbors_4() {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                let cell = &grid.cells()[ni];
                if settled[ni] || !cell.is_walkable() {
                    continue;
                }
                let step = cell.step_cost();
                if step <= 0 {
                    return Err(GridError::InvalidArgument(format!(
                        "step cost into {np} must be positive, got {step}"
                    )));
                }
                let tentative = current.cost.saturating_add(step);
                let d = &mut dist.cells_mut()[ni];
                if tentative < *d {
                    *d = tentative;
                    open.push(NodeRef {
                        idx: ni,
                        cost: tentative,
                    });
                }
            }
        }

        log::debug!(
            "shortest-path search from {source} settled {settled_count} of {} cells",
            grid.len()
        );

        Ok(Self { grid, source, dist })
    }

    /// Cost of the cheapest path to `target`, or [`UNREACHABLE`].
    ///
    /// Out-of-bounds targets are unreachable.
    pub fn distance_to(&self, target: Point) -> i32 {
        self.dist.at(target).copied().unwrap_or(UNREACHABLE)
    }

    /// Whether any path reaches `target`.
    pub fn is_reachable(&self, target: Point) -> bool {
        self.distance_to(target) != UNREACHABLE
    }

    /// Reconstruct one shortest path, ordered from the source to `target`.
    ///
    /// Walks back from `target`, at each step taking the first neighbour (in
    /// north, east, south, west order) whose distance is exactly one step
    /// cheaper. Fails with [`GridError::ReconstructionFailure`] if `target`
    /// was never reached.
    pub fn path_to(&self, target: Point) -> Result<Vec<Point>, GridError> {
        if !self.is_reachable(target) {
            return Err(GridError::ReconstructionFailure(target));
        }

        let mut path = vec![target];
        let mut cur = target;
        while cur != self.source {
            let step = self.grid.at(cur).map_or(1, Terrain::step_cost);
            let want = self.distance_to(cur) - step;
            let prev = Direction::ALL
                .into_iter()
                .map(|d| cur.step(d))
                .find(|&n| self.dist.at(n) == Some(&want))
                .ok_or(GridError::ReconstructionFailure(target))?;
            path.push(prev);
            cur = prev;
        }
        path.reverse();

        log::trace!("path to {target}: {} points", path.len());
        Ok(path)
    }

    /// Every reached cell with its cost, in row-major order.
    pub fn reachable(&self) -> impl Iterator<Item = (Point, i32)> + '_ {
        self.dist
            .iter()
            .filter(|&(_, &d)| d != UNREACHABLE)
            .map(|(p, &d)| (p, d))
    }

    #[inline]
    pub fn source(&self) -> Point {
        self.source
    }

    /// The terrain the search ran on.
    #[inline]
    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    /// The distance field: per-cell cost from the source, or [`UNREACHABLE`].
    #[inline]
    pub fn distances(&self) -> &Grid<i32> {
        &self.dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use maze_core::{Cell, parse_grid};
    use proptest::prelude::*;

    fn maze(text: &str) -> Grid<Cell> {
        parse_grid(text, |c| Some(Cell::from(c != '#'))).unwrap()
    }

    fn assert_valid_path(sp: &GridShortestPath<Cell>, path: &[Point], target: Point) {
        assert_eq!(path.first(), Some(&sp.source()));
        assert_eq!(path.last(), Some(&target));
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1, "{} -> {} not adjacent", w[0], w[1]);
        }
        for p in path {
            assert!(sp.grid().get(*p).unwrap().is_walkable(), "{p} is blocked");
        }
    }

    #[test]
    fn open_5x5_corner_to_corner() {
        let g = Grid::new(5, 5, Cell::WALKABLE).unwrap();
        let sp = GridShortestPath::new(g, Point::new(0, 0)).unwrap();
        let target = Point::new(4, 4);
        assert_eq!(sp.distance_to(target), 8);
        let path = sp.path_to(target).unwrap();
        assert_eq!(path.len(), 9);
        assert_valid_path(&sp, &path, target);
    }

    #[test]
    fn wall_with_single_gap_forces_detour() {
        let g = maze(
            "\
.....
.....
####.
.....
.....
",
        );
        let sp = GridShortestPath::new(g, Point::new(0, 0)).unwrap();
        let target = Point::new(0, 4);
        // Across to the gap at x = 4 and back: 4 + 4 + 4.
        assert_eq!(sp.distance_to(target), 12);
        let path = sp.path_to(target).unwrap();
        assert!(path.contains(&Point::new(4, 2)));
        assert_eq!(path.len() as i32 - 1, sp.distance_to(target));
        assert_valid_path(&sp, &path, target);
    }

    #[test]
    fn enclosed_target_is_unreachable() {
        let g = maze(
            "\
.....
.###.
.#.#.
.###.
.....
",
        );
        let sp = GridShortestPath::new(g, Point::new(0, 0)).unwrap();
        let target = Point::new(2, 2);
        assert_eq!(sp.distance_to(target), UNREACHABLE);
        assert!(!sp.is_reachable(target));
        assert_eq!(
            sp.path_to(target),
            Err(GridError::ReconstructionFailure(target))
        );
        assert_eq!(sp.distances().get(Point::new(2, 1)), Ok(&UNREACHABLE));
    }

    #[test]
    fn source_out_of_bounds_is_rejected() {
        let g = Grid::new(3, 3, Cell::WALKABLE).unwrap();
        assert!(matches!(
            GridShortestPath::new(g.clone(), Point::new(3, 0)),
            Err(GridError::InvalidArgument(_))
        ));
        assert!(matches!(
            GridShortestPath::new(g, Point::new(0, -1)),
            Err(GridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn out_of_bounds_target_is_unreachable() {
        let g = Grid::new(3, 3, Cell::WALKABLE).unwrap();
        let sp = GridShortestPath::new(g, Point::ZERO).unwrap();
        assert_eq!(sp.distance_to(Point::new(9, 9)), UNREACHABLE);
        assert!(sp.path_to(Point::new(-1, 0)).is_err());
    }

    #[test]
    fn path_to_source_is_single_point() {
        let g = Grid::new(2, 2, Cell::WALKABLE).unwrap();
        let sp = GridShortestPath::new(g, Point::new(1, 1)).unwrap();
        assert_eq!(sp.distance_to(Point::new(1, 1)), 0);
        assert_eq!(sp.path_to(Point::new(1, 1)).unwrap(), vec![Point::new(1, 1)]);
    }

    #[test]
    fn char_grids_treat_hash_as_wall() {
        let g = maze_core::parse_char_grid("S.#\n#.E\n").unwrap();
        let start = g.find(|&c| c == 'S').unwrap();
        let end = g.find(|&c| c == 'E').unwrap();
        let sp = GridShortestPath::new(g, start).unwrap();
        assert_eq!(sp.distance_to(end), 3);
        assert_eq!(
            sp.path_to(end).unwrap(),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(2, 1)
            ]
        );
    }

    #[test]
    fn reachable_skips_walls_and_islands() {
        let g = maze("..#.\n");
        let sp = GridShortestPath::new(g, Point::ZERO).unwrap();
        let reached: Vec<_> = sp.reachable().collect();
        assert_eq!(reached, vec![(Point::new(0, 0), 0), (Point::new(1, 0), 1)]);
    }

    /// Mud costs three to enter.
    #[derive(Clone, Copy)]
    enum Ground {
        Rock,
        Grass,
        Mud,
    }

    impl Terrain for Ground {
        fn is_walkable(&self) -> bool {
            !matches!(self, Ground::Rock)
        }

        fn step_cost(&self) -> i32 {
            match self {
                Ground::Mud => 3,
                _ => 1,
            }
        }
    }

    #[test]
    fn weighted_terrain_prefers_cheap_detour() {
        let g = parse_grid("..~..\n.....\n", |c| match c {
            '.' => Some(Ground::Grass),
            '~' => Some(Ground::Mud),
            '#' => Some(Ground::Rock),
            _ => None,
        })
        .unwrap();
        let sp = GridShortestPath::new(g, Point::new(0, 0)).unwrap();
        let target = Point::new(4, 0);
        // Straight through the mud costs 6, around it also 6, but the
        // reconstructed path must be consistent with the costs either way.
        assert_eq!(sp.distance_to(target), 6);
        let path = sp.path_to(target).unwrap();
        let cost: i32 = path[1..]
            .iter()
            .map(|p| sp.grid().get(*p).unwrap().step_cost())
            .sum();
        assert_eq!(cost, 6);
        assert_eq!(sp.distance_to(Point::new(2, 0)), 4);
    }

    /// Costs nothing to enter.
    #[derive(Clone, Copy)]
    struct Ice;

    impl Terrain for Ice {
        fn is_walkable(&self) -> bool {
            true
        }

        fn step_cost(&self) -> i32 {
            0
        }
    }

    #[test]
    fn zero_step_cost_is_rejected() {
        let g = Grid::new(3, 1, Ice).unwrap();
        assert!(matches!(
            GridShortestPath::new(g, Point::ZERO),
            Err(GridError::InvalidArgument(_))
        ));
    }

    proptest! {
        #[test]
        fn open_grid_distance_is_manhattan(w in 1i32..12, h in 1i32..12, tx in 0i32..12, ty in 0i32..12) {
            let target = Point::new(tx % w, ty % h);
            let g = Grid::new(w, h, Cell::WALKABLE).unwrap();
            let sp = GridShortestPath::new(g, Point::ZERO).unwrap();
            prop_assert_eq!(sp.distance_to(target), manhattan(Point::ZERO, target));
        }

        #[test]
        fn path_length_matches_distance(cells in proptest::collection::vec(proptest::bool::weighted(0.7), 64)) {
            let g = Grid::from_vec(8, 8, cells.into_iter().map(Cell::from).collect()).unwrap();
            let sp = GridShortestPath::new(g, Point::ZERO).unwrap();
            for p in Point::ZERO.neighbors_4().into_iter().chain([Point::new(7, 7), Point::new(3, 5)]) {
                match sp.path_to(p) {
                    Ok(path) => {
                        prop_assert_eq!(path.len() as i32 - 1, sp.distance_to(p));
                        prop_assert_eq!(path[0], Point::ZERO);
                        prop_assert_eq!(*path.last().unwrap(), p);
                        for w in path.windows(2) {
                            prop_assert_eq!(manhattan(w[0], w[1]), 1);
                        }
                        for q in &path[1..] {
                            prop_assert!(sp.grid().get(*q).unwrap().is_walkable());
                        }
                    }
                    Err(_) => {
                        prop_assert_eq!(sp.distance_to(p), UNREACHABLE);
                    }
                }
            }
        }
    }
}
