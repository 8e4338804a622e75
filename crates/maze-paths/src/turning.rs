//! Shortest paths where changing direction costs extra.
//!
//! The search state is a cell plus the direction the walker faces. Every
//! move costs [`TurnConfig::step_cost`]; a move in any direction other than
//! the current facing additionally costs [`TurnConfig::turn_penalty`]. A
//! quarter turn and a reversal are charged the same single penalty.

use std::collections::{BTreeSet, BinaryHeap};
use std::fmt;

use maze_core::{Direction, Grid, GridError, Point};

use crate::frontier::{NodeRef, UNREACHABLE};
use crate::traits::Terrain;

const DIRS: usize = Direction::ALL.len();

/// Costs for [`TurnAwareShortestPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnConfig {
    /// Cost of one step forward. Must be > 0.
    pub step_cost: i32,
    /// Extra cost when a step changes the facing. Must be ≥ 0.
    pub turn_penalty: i32,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            step_cost: 1,
            turn_penalty: 1000,
        }
    }
}

impl TurnConfig {
    /// Cost of stepping in direction `to` while facing `from`.
    #[inline]
    pub fn move_cost(&self, from: Direction, to: Direction) -> i32 {
        if from == to {
            self.step_cost
        } else {
            self.step_cost + self.turn_penalty
        }
    }

    /// Check the costs, and that no cheapest route over `states` search
    /// states can reach [`UNREACHABLE`].
    fn validate(&self, states: usize) -> Result<(), GridError> {
        if self.step_cost <= 0 {
            return Err(GridError::InvalidArgument(format!(
                "step cost must be positive, got {}",
                self.step_cost
            )));
        }
        if self.turn_penalty < 0 {
            return Err(GridError::InvalidArgument(format!(
                "turn penalty must not be negative, got {}",
                self.turn_penalty
            )));
        }
        // A cheapest route visits each state at most once.
        let worst = i64::from(self.step_cost) + i64::from(self.turn_penalty);
        let fits = i64::try_from(states)
            .ok()
            .and_then(|n| n.checked_mul(worst))
            .is_some_and(|total| total < i64::from(UNREACHABLE));
        if !fits {
            return Err(GridError::InvalidArgument(format!(
                "step cost {} and turn penalty {} can overflow route costs over {states} states",
                self.step_cost, self.turn_penalty
            )));
        }
        Ok(())
    }
}

/// A cell together with a facing.
///
/// A `None` facing means "direction irrelevant": as a source it lets the
/// first step go any way without a turn penalty, and in queries it stands
/// for the cheapest facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectedState {
    pub pos: Point,
    pub facing: Option<Direction>,
}

impl DirectedState {
    #[inline]
    pub const fn new(pos: Point, facing: Direction) -> Self {
        Self {
            pos,
            facing: Some(facing),
        }
    }

    /// A state whose facing does not matter.
    #[inline]
    pub const fn any(pos: Point) -> Self {
        Self { pos, facing: None }
    }
}

impl fmt::Display for DirectedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.facing {
            Some(d) => write!(f, "{} facing {d}", self.pos),
            None => write!(f, "{}", self.pos),
        }
    }
}

/// Single-source search over (cell, facing) states with a turn penalty.
///
/// Costs live in a dense array indexed by `cell * 4 + direction`. The search
/// runs to completion in [`new`](Self::new); the target only matters for the
/// query methods.
#[derive(Debug, Clone)]
pub struct TurnAwareShortestPath<T> {
    grid: Grid<T>,
    source: DirectedState,
    target: Point,
    config: TurnConfig,
    costs: Vec<i32>,
}

impl<T: Terrain> TurnAwareShortestPath<T> {
    /// Run the search from `source` towards `target`.
    ///
    /// Fails with [`GridError::InvalidArgument`] if either point lies outside
    /// the grid or `config` is malformed.
    pub fn new(
        grid: Grid<T>,
        source: DirectedState,
        target: Point,
        config: TurnConfig,
    ) -> Result<Self, GridError> {
        config.validate(grid.len() * DIRS)?;
        for (what, p) in [("source", source.pos), ("target", target)] {
            if !grid.contains(p) {
                return Err(GridError::InvalidArgument(format!(
                    "{what} {p} is outside a {}x{} grid",
                    grid.width(),
                    grid.height()
                )));
            }
        }

        let mut search = Self {
            costs: vec![UNREACHABLE; grid.len() * DIRS],
            grid,
            source,
            target,
            config,
        };
        search.run();
        Ok(search)
    }

    #[inline]
    fn state_index(&self, p: Point, d: Direction) -> Option<usize> {
        self.grid.index(p).map(|ci| ci * DIRS + d.index())
    }

    fn run(&mut self) {
        let mut settled = vec![false; self.costs.len()];
        let mut open = BinaryHeap::new();
        let mut settled_count = 0usize;

        let seeds = match self.source.facing {
            Some(d) => vec![d],
            None => Direction::ALL.to_vec(),
        };
        for d in seeds {
            if let Some(si) = self.state_index(self.source.pos, d) {
                self.costs[si] = 0;
                open.push(NodeRef { idx: si, cost: 0 });
            }
        }

        while let Some(current) = open.pop() {
            let si = current.idx;
            if settled[si] {
                continue;
            }
            settled[si] = true;
            settled_count += 1;

            let facing = Direction::ALL[si % DIRS];
            let cp = self.grid.point(si / DIRS);
            for d in Direction::ALL {
                let np = cp.step(d);
                let Some(ni) = self.grid.index(np) else {
                    continue;
                };
                if !self.grid.cells()[ni].is_walkable() {
                    continue;
                }
                let nsi = ni * DIRS + d.index();
                if settled[nsi] {
                    continue;
                }
                let tentative = current
                    .cost
                    .saturating_add(self.config.move_cost(facing, d));
                if tentative < self.costs[nsi] {
                    self.costs[nsi] = tentative;
                    open.push(NodeRef {
                        idx: nsi,
                        cost: tentative,
                    });
                }
            }
        }

        log::debug!(
            "turn-aware search from {} settled {settled_count} states, cost to {} is {}",
            self.source,
            self.target,
            self.shortest_cost()
        );
    }

    /// Cheapest cost to reach the target in any facing, or [`UNREACHABLE`].
    pub fn shortest_cost(&self) -> i32 {
        self.cost_at(DirectedState::any(self.target))
    }

    /// Recorded cost of a state. A `None` facing gives the cheapest facing.
    /// Out-of-bounds states are [`UNREACHABLE`].
    pub fn cost_at(&self, state: DirectedState) -> i32 {
        match state.facing {
            Some(d) => self
                .state_index(state.pos, d)
                .map_or(UNREACHABLE, |i| self.costs[i]),
            None => Direction::ALL
                .into_iter()
                .map(|d| self.cost_at(DirectedState::new(state.pos, d)))
                .min()
                .unwrap_or(UNREACHABLE),
        }
    }

    /// Direction from which a reached state was entered.
    ///
    /// A state facing `d` was entered by a move in direction `d`, so it came
    /// from `d.opposite()`. Returns `None` for unreached states and for the
    /// zero-cost source states. A `None` facing resolves to the cheapest
    /// facing.
    pub fn came_from(&self, state: DirectedState) -> Option<Direction> {
        let facing = match state.facing {
            Some(d) => d,
            None => Direction::ALL
                .into_iter()
                .min_by_key(|&d| self.cost_at(DirectedState::new(state.pos, d)))?,
        };
        let cost = self.cost_at(DirectedState::new(state.pos, facing));
        if cost == UNREACHABLE || cost == 0 {
            return None;
        }
        Some(facing.opposite())
    }

    /// States at `state`'s predecessor cell whose cost plus the move into
    /// `state` equals `state`'s recorded cost.
    fn optimal_predecessors(&self, si: usize) -> impl Iterator<Item = usize> + '_ {
        let cost = self.costs[si];
        let entered = Direction::ALL[si % DIRS];
        let prev = self.grid.point(si / DIRS).step(entered.opposite());
        let prev_cell = if cost == 0 || cost == UNREACHABLE {
            None
        } else {
            self.grid.index(prev)
        };
        prev_cell.into_iter().flat_map(move |pi| {
            Direction::ALL.into_iter().filter_map(move |f| {
                let psi = pi * DIRS + f.index();
                let pc = self.costs[psi];
                (pc != UNREACHABLE && pc.saturating_add(self.config.move_cost(f, entered)) == cost)
                    .then_some(psi)
            })
        })
    }

    /// Indices of the target states achieving [`shortest_cost`](Self::shortest_cost).
    fn best_target_states(&self) -> Vec<usize> {
        let best = self.shortest_cost();
        if best == UNREACHABLE {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.state_index(self.target, d))
            .filter(|&i| self.costs[i] == best)
            .collect()
    }

    /// Every cell lying on at least one minimum-cost path from the source to
    /// the target. Empty if the target is unreachable.
    pub fn optimal_cells(&self) -> BTreeSet<Point> {
        let mut cells = BTreeSet::new();
        if self.target == self.source.pos {
            cells.insert(self.target);
            return cells;
        }

        let mut visited = vec![false; self.costs.len()];
        let mut stack = self.best_target_states();
        while let Some(si) = stack.pop() {
            if visited[si] {
                continue;
            }
            visited[si] = true;
            cells.insert(self.grid.point(si / DIRS));
            stack.extend(self.optimal_predecessors(si).filter(|&p| !visited[p]));
        }

        log::trace!("{} cells on optimal paths to {}", cells.len(), self.target);
        cells
    }

    /// One minimum-cost route as a sequence of states, from the source to
    /// the target.
    ///
    /// Fails with [`GridError::ReconstructionFailure`] if the target was
    /// never reached.
    pub fn optimal_path(&self) -> Result<Vec<DirectedState>, GridError> {
        let failure = || GridError::ReconstructionFailure(self.target);
        let to_state =
            |si: usize| DirectedState::new(self.grid.point(si / DIRS), Direction::ALL[si % DIRS]);

        if self.target == self.source.pos {
            return Ok(vec![self.source]);
        }
        let mut si = *self.best_target_states().first().ok_or_else(failure)?;
        let mut path = vec![to_state(si)];
        while self.costs[si] != 0 {
            si = self.optimal_predecessors(si).next().ok_or_else(failure)?;
            path.push(to_state(si));
        }
        path.reverse();
        Ok(path)
    }

    #[inline]
    pub fn source(&self) -> DirectedState {
        self.source
    }

    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    #[inline]
    pub fn config(&self) -> TurnConfig {
        self.config
    }

    /// The terrain the search ran on.
    #[inline]
    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    /// Per-cell cheapest cost over all facings, or [`UNREACHABLE`].
    pub fn distances(&self) -> Grid<i32> {
        let mut out = self.grid.map(|_| UNREACHABLE);
        for (ci, d) in out.cells_mut().iter_mut().enumerate() {
            *d = self.costs[ci * DIRS..(ci + 1) * DIRS]
                .iter()
                .copied()
                .min()
                .unwrap_or(UNREACHABLE);
        }
        out
    }
}
