//! Command-line puzzle driver for the grid searches.
//!
//! Run: cargo run --bin maze -- turns input.txt --show

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use maze_core::{Direction, parse_points};
use maze_demos::{bytes, cheats, long_cheats, overlay, turns, walk};
use maze_paths::TurnConfig;

/// Shortest paths through puzzle mazes.
#[derive(Parser, Debug)]
#[command(name = "maze", about = "Shortest paths through puzzle mazes", version)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortest route from S to E, one step per move
    Walk {
        /// Map file: `#` walls, `S` start, `E` end
        file: PathBuf,
        /// Print the map with the route marked
        #[arg(long)]
        show: bool,
    },
    /// Cheapest route from S to E when turning costs extra
    Turns {
        /// Map file: `#` walls, `S` start, `E` end
        file: PathBuf,
        /// Initial facing at S
        #[arg(long, value_enum, default_value = "east")]
        facing: Facing,
        /// Extra cost of a step that changes direction
        #[arg(long, default_value_t = TurnConfig::default().turn_penalty)]
        turn_penalty: i32,
        /// Cost of a single step
        #[arg(long, default_value_t = TurnConfig::default().step_cost)]
        step_cost: i32,
        /// Print the map with every optimal cell marked
        #[arg(long)]
        show: bool,
    },
    /// Drop `x,y` obstacles on a square grid and route corner to corner
    Bytes {
        /// Obstacle list, one `x,y` per line
        file: PathBuf,
        /// Grid width and height
        #[arg(long, default_value_t = 71)]
        size: i32,
        /// Number of obstacles to drop before routing
        #[arg(long, default_value_t = 1024)]
        take: usize,
    },
    /// Count race-track shortcuts that save at least `--min-save` steps
    Cheats {
        /// Track file: `#` walls, `S` start, `E` end
        file: PathBuf,
        /// Minimum number of steps a shortcut must save
        #[arg(long, default_value_t = 100)]
        min_save: i32,
        /// Allow shortcuts of up to this many steps instead of single wall jumps
        #[arg(long)]
        max_len: Option<i32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Facing {
    North,
    East,
    South,
    West,
    /// First step may go any way without a turn
    Any,
}

impl From<Facing> for Option<Direction> {
    fn from(f: Facing) -> Self {
        match f {
            Facing::North => Some(Direction::North),
            Facing::East => Some(Direction::East),
            Facing::South => Some(Direction::South),
            Facing::West => Some(Direction::West),
            Facing::Any => None,
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(args.command) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Walk { file, show } => {
            let report = walk(&read(&file)?)?;
            log::info!("{} cells reachable from {}", report.reachable, report.start);
            match report.distance {
                Some(d) => println!("Shortest path: {d}"),
                None => println!("No path from {} to {}", report.start, report.end),
            }
            if show {
                print!("{}", overlay(&report.map, report.path.iter().copied()));
            }
        }
        Command::Turns {
            file,
            facing,
            turn_penalty,
            step_cost,
            show,
        } => {
            let config = TurnConfig {
                step_cost,
                turn_penalty,
            };
            let report = turns(&read(&file)?, facing.into(), config)?;
            match report.cost {
                Some(c) => println!("Lowest score: {c}"),
                None => println!("No path from {} to {}", report.start, report.end),
            }
            println!("Cells on optimal paths: {}", report.optimal_cells.len());
            if show {
                print!("{}", overlay(&report.map, report.optimal_cells.iter().copied()));
            }
        }
        Command::Bytes { file, size, take } => {
            let obstacles = parse_points(&read(&file)?)
                .with_context(|| format!("invalid obstacle list {}", file.display()))?;
            let report = bytes(&obstacles, size, take)?;
            match report.distance {
                Some(d) => println!("Shortest path after {take} obstacles: {d}"),
                None => println!("No path after {take} obstacles"),
            }
            match report.first_blocking {
                Some(p) => println!("First blocking obstacle: {},{}", p.x, p.y),
                None => println!("The route is never cut"),
            }
        }
        Command::Cheats {
            file,
            min_save,
            max_len,
        } => {
            let text = read(&file)?;
            let report = match max_len {
                Some(n) => long_cheats(&text, n, min_save)?,
                None => cheats(&text, min_save)?,
            };
            println!("Track length: {}", report.distance);
            println!("Cheats saving at least {min_save}: {}", report.count);
        }
    }
    Ok(())
}
