//! Puzzle drivers shared by the `maze` command-line tool.
//!
//! Each driver takes raw puzzle text, builds a grid, runs one of the search
//! engines and returns a small report; printing is left to the binary.

use std::collections::BTreeSet;

use anyhow::{Context, Result, bail};
use maze_core::{Cell, Direction, Grid, Point, parse_char_grid};
use maze_paths::{
    DirectedState, GridShortestPath, TurnAwareShortestPath, TurnConfig, UNREACHABLE, manhattan,
};

/// Result of a plain shortest-path run between `S` and `E`.
#[derive(Debug, Clone)]
pub struct WalkReport {
    pub start: Point,
    pub end: Point,
    /// `None` if `E` cannot be reached.
    pub distance: Option<i32>,
    pub path: Vec<Point>,
    /// Number of cells reachable from `S`.
    pub reachable: usize,
    pub map: Grid<char>,
}

/// Result of a turn-aware run between `S` and `E`.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub start: DirectedState,
    pub end: Point,
    pub cost: Option<i32>,
    pub optimal_cells: BTreeSet<Point>,
    pub map: Grid<char>,
}

/// Result of dropping obstacles on an open square grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesReport {
    /// Corner-to-corner distance after the first `take` obstacles.
    pub distance: Option<i32>,
    /// First obstacle after which the far corner becomes unreachable.
    pub first_blocking: Option<Point>,
}

/// Result of counting shortcuts on a single-lane race track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatReport {
    /// Track length from `S` to `E` without cheating.
    pub distance: i32,
    /// Number of distinct shortcuts saving at least the requested time.
    pub count: usize,
}

/// Locate the `S` and `E` markers.
pub fn find_markers(map: &Grid<char>) -> Result<(Point, Point)> {
    let start = map.find(|&c| c == 'S').context("map has no start marker `S`")?;
    let end = map.find(|&c| c == 'E').context("map has no end marker `E`")?;
    Ok((start, end))
}

fn finite(cost: i32) -> Option<i32> {
    (cost != UNREACHABLE).then_some(cost)
}

/// Shortest route from `S` to `E`, walls are `#`.
pub fn walk(text: &str) -> Result<WalkReport> {
    let map = parse_char_grid(text).context("failed to parse map")?;
    let (start, end) = find_markers(&map)?;
    let search = GridShortestPath::new(map.clone(), start)?;
    let distance = finite(search.distance_to(end));
    let path = match distance {
        Some(_) => search.path_to(end)?,
        None => Vec::new(),
    };
    Ok(WalkReport {
        start,
        end,
        distance,
        path,
        reachable: search.reachable().count(),
        map,
    })
}

/// Cheapest route from `S` to `E` when turning costs extra, plus every cell
/// on some cheapest route.
pub fn turns(text: &str, facing: Option<Direction>, config: TurnConfig) -> Result<TurnReport> {
    let map = parse_char_grid(text).context("failed to parse map")?;
    let (start, end) = find_markers(&map)?;
    let start = DirectedState { pos: start, facing };
    let search = TurnAwareShortestPath::new(map.clone(), start, end, config)?;
    Ok(TurnReport {
        start,
        end,
        cost: finite(search.shortest_cost()),
        optimal_cells: search.optimal_cells(),
        map,
    })
}

/// Distance field from `S` plus the track itself.
fn race_track(text: &str) -> Result<(GridShortestPath<char>, Vec<Point>)> {
    let map = parse_char_grid(text).context("failed to parse track")?;
    let (start, end) = find_markers(&map)?;
    let search = GridShortestPath::new(map, start)?;
    let track = search
        .path_to(end)
        .context("the end of the track is unreachable")?;
    Ok((search, track))
}

/// Count two-step jumps through a single wall that save at least
/// `min_save` steps.
///
/// A jump goes from a track cell straight across one `#` to the track cell
/// behind it. It saves the difference of the two distances from `S`, minus
/// the two steps the jump itself takes.
pub fn cheats(text: &str, min_save: i32) -> Result<CheatReport> {
    let (search, track) = race_track(text)?;
    let map = search.grid();
    let mut count = 0;
    for &p in &track {
        let from = search.distance_to(p);
        for d in Direction::ALL {
            let jump = d.offset() * 2;
            if map.at(p + jump / 2) != Some(&'#') {
                continue;
            }
            let landing = p + jump;
            let Some(to) = finite(search.distance_to(landing)) else {
                continue;
            };
            if to - from - manhattan(p, landing) >= min_save {
                count += 1;
            }
        }
    }
    log::info!("{count} wall jumps save at least {min_save}");
    Ok(CheatReport {
        distance: track.len() as i32 - 1,
        count,
    })
}

/// Count shortcuts of up to `max_len` steps, walls or not, between two
/// track cells that save at least `min_save` steps.
pub fn long_cheats(text: &str, max_len: i32, min_save: i32) -> Result<CheatReport> {
    if max_len < 2 {
        bail!("a shortcut needs at least 2 steps, got {max_len}");
    }
    let (search, track) = race_track(text)?;
    let mut count = 0;
    for (i, &a) in track.iter().enumerate() {
        let from = search.distance_to(a);
        for &b in &track[i + 1..] {
            let len = manhattan(a, b);
            if len <= max_len && search.distance_to(b) - from - len >= min_save {
                count += 1;
            }
        }
    }
    log::info!("{count} shortcuts of up to {max_len} steps save at least {min_save}");
    Ok(CheatReport {
        distance: track.len() as i32 - 1,
        count,
    })
}

fn memory_grid(size: i32, obstacles: &[Point]) -> Result<Grid<Cell>> {
    let mut grid = Grid::new(size, size, Cell::WALKABLE)?;
    for &p in obstacles {
        grid.set(p, Cell::BLOCKED)
            .with_context(|| format!("obstacle {p} does not fit a {size}x{size} grid"))?;
    }
    Ok(grid)
}

fn corner_distance(size: i32, obstacles: &[Point]) -> Result<i32> {
    let grid = memory_grid(size, obstacles)?;
    if !grid.get(Point::ZERO)?.is_walkable() {
        return Ok(UNREACHABLE);
    }
    let search = GridShortestPath::new(grid, Point::ZERO)?;
    Ok(search.distance_to(Point::new(size - 1, size - 1)))
}

/// Drop obstacles on a `size`×`size` grid and route from the top-left to
/// the bottom-right corner.
pub fn bytes(obstacles: &[Point], size: i32, take: usize) -> Result<BytesReport> {
    if size <= 0 {
        bail!("grid size must be positive, got {size}");
    }
    let take = take.min(obstacles.len());
    let distance = finite(corner_distance(size, &obstacles[..take])?);

    if corner_distance(size, obstacles)? != UNREACHABLE {
        return Ok(BytesReport {
            distance,
            first_blocking: None,
        });
    }
    // Smallest prefix length that cuts the route.
    let (mut lo, mut hi) = (0usize, obstacles.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if corner_distance(size, &obstacles[..mid])? == UNREACHABLE {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    log::info!("route cut after {lo} obstacles");
    Ok(BytesReport {
        distance,
        first_blocking: lo.checked_sub(1).map(|i| obstacles[i]),
    })
}

/// Overlay `marks` onto a map with `O`, keeping the `S`/`E` markers.
pub fn overlay(map: &Grid<char>, marks: impl IntoIterator<Item = Point>) -> Grid<char> {
    let mut out = map.clone();
    for p in marks {
        if let Ok(c) = out.get_mut(p) {
            if *c != 'S' && *c != 'E' {
                *c = 'O';
            }
        }
    }
    out
}
