//! Shortest-path searches over dense grids.
//!
//! - **Uniform-cost search** with distance field and path reconstruction
//!   ([`GridShortestPath`])
//! - **Turn-aware search** over (cell, facing) states, with enumeration of
//!   every cell on some optimal route ([`TurnAwareShortestPath`])
//!
//! Both engines run to completion when constructed and are read-only
//! afterwards. How a cell is interpreted (walkable or not, cost to enter) is
//! given by the [`Terrain`] trait, implemented for [`maze_core::Cell`],
//! `bool` and `char`.

mod distance;
mod frontier;
mod shortest;
mod traits;
mod turning;

pub use distance::manhattan;
pub use frontier::UNREACHABLE;
pub use shortest::GridShortestPath;
pub use traits::Terrain;
pub use turning::{DirectedState, TurnAwareShortestPath, TurnConfig};
