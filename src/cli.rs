//! Command-line entry point.
//!
//! Without a subcommand the terminal interface starts. `generate` and `solve` print to standard
//! output instead, which makes them usable in scripts and pipes.

use std::{
    collections::HashSet,
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use log::{info, LevelFilter};
use rand::{rngs::StdRng, SeedableRng as _};

use crate::{
    app::{App, Settings},
    file_loader,
    grid::{Cell, Coord, Grid, Path},
    logging,
    map::Map,
    search::Strategy,
};

/// Generate perfect mazes and solve them with breadth-first, depth-first or greedy best-first
/// search.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// What to do; the terminal interface when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
    /// Rows of generated mazes.
    #[arg(long, global = true, default_value_t = 21)]
    pub rows: usize,
    /// Columns of generated mazes.
    #[arg(long, global = true, default_value_t = 21)]
    pub cols: usize,
    /// Seed for maze generation; fresh entropy when omitted.
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Search strategy used to solve the maze.
    #[arg(long, global = true, value_enum, default_value_t = Strategy::BreadthFirst)]
    pub algorithm: Strategy,
    /// Load the maze from a `.maze` file instead of generating one.
    #[arg(long, global = true)]
    pub map: Option<PathBuf>,
    /// Directory scanned for `.maze` files by the map menu.
    #[arg(long, global = true, default_value = ".")]
    pub maps_dir: PathBuf,
    /// Minimum level of log records; `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,
    /// Write log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Subcommands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Walk and solve mazes in the terminal interface.
    #[default]
    Play,
    /// Print a maze.
    Generate,
    /// Print a maze with its solution drawn as `*`.
    Solve,
}

/// Runs the command selected on the command line.
///
/// # Errors
///
/// This function may return errors if the logger cannot be installed, the map file is invalid,
/// the dimensions cannot hold a maze, writing the output fails, the terminal interface fails, or
/// `solve` finds no path.
pub fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or_default();
    logging::init(
        cli.log_level,
        cli.log_file.as_deref(),
        command == Command::Play,
    )?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let map = match &cli.map {
        Some(path) => file_loader::load_file(path)?,
        None => Map::default(),
    };
    info!(
        "{command:?} on map {:?} ({}x{}, {})",
        map.key, cli.rows, cli.cols, cli.algorithm
    );

    match command {
        Command::Play => {
            let settings = Settings {
                rows: cli.rows,
                cols: cli.cols,
                strategy: cli.algorithm,
                maps_dir: cli.maps_dir,
                map,
            };
            let mut app = App::new(settings, rng)?;

            let mut terminal = ratatui::init();
            let result = app.run(&mut terminal);
            ratatui::restore();

            result
        }
        Command::Generate => {
            let grid = map.grid(cli.rows, cli.cols, &mut rng)?;
            writeln!(io::stdout().lock(), "{grid}")?;

            Ok(())
        }
        Command::Solve => {
            let grid = map.grid(cli.rows, cli.cols, &mut rng)?;
            solve(&grid, cli.algorithm, &mut io::stdout().lock())
        }
    }
}

/// Writes the solved maze and a summary line to `out`.
///
/// # Errors
///
/// This function may return errors if writing fails or no path exists.
fn solve(grid: &Grid, strategy: Strategy, out: &mut impl Write) -> Result<()> {
    let Some(path) = strategy.search(grid) else {
        writeln!(out, "{grid}")?;
        writeln!(out, "No path found.")?;
        return Err(eyre!("{strategy} found no path from start to goal"));
    };

    writeln!(out, "{}", overlay(grid, &path))?;
    writeln!(
        out,
        "{strategy}: {} cells, {} steps",
        path.len(),
        path.steps()
    )?;

    Ok(())
}

/// Renders `grid` as text with the open cells of `path` replaced by `*`.
///
/// The start and goal markers keep their symbols.
#[must_use]
pub fn overlay(grid: &Grid, path: &Path) -> String {
    let on_path: HashSet<Coord> = path.cells().iter().copied().collect();

    grid.iter_rows()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    if *cell == Cell::Open && on_path.contains(&Coord::new(row, col)) {
                        '*'
                    } else {
                        cell.symbol()
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    fn sample() -> Grid {
        "S01\n010\n00G".parse().expect("valid grid")
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mazeseek"]).expect("no arguments are needed");

        assert_eq!(cli.command, None);
        assert_eq!((cli.rows, cli.cols), (21, 21));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.algorithm, Strategy::BreadthFirst);
        assert_eq!(cli.maps_dir, PathBuf::from("."));
        assert_eq!(cli.log_level, LevelFilter::Warn);
        assert!(cli.map.is_none() && cli.log_file.is_none());
    }

    #[test]
    fn test_subcommand_with_global_options() {
        let cli = Cli::try_parse_from([
            "mazeseek",
            "solve",
            "--rows",
            "9",
            "--cols",
            "15",
            "--algorithm",
            "greedy",
            "--seed",
            "3",
            "--log-level",
            "debug",
        ])
        .expect("valid arguments");

        assert_eq!(cli.command, Some(Command::Solve));
        assert_eq!((cli.rows, cli.cols), (9, 15));
        assert_eq!(cli.algorithm, Strategy::BestFirst);
        assert_eq!(cli.seed, Some(3));
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        assert!(Cli::try_parse_from(["mazeseek", "--algorithm", "dijkstra"]).is_err());
        assert!(Cli::try_parse_from(["mazeseek", "--rows", "many"]).is_err());
    }

    #[test]
    fn test_overlay_marks_open_path_cells() {
        let grid = sample();
        let path = Strategy::BreadthFirst
            .search(&grid)
            .expect("sample grid is solvable");

        assert_eq!(overlay(&grid, &path), "S01\n*10\n**G");
    }

    #[test]
    fn test_solve_prints_summary() {
        let mut out = Vec::new();

        solve(&sample(), Strategy::BreadthFirst, &mut out).expect("sample grid is solvable");

        let text = String::from_utf8(out).expect("output is utf-8");
        assert_eq!(text, "S01\n*10\n**G\nBFS: 5 cells, 4 steps\n");
    }

    #[test]
    fn test_solve_reports_missing_path() {
        let grid: Grid = "S1G".parse().expect("valid grid");
        let mut out = Vec::new();

        let result = solve(&grid, Strategy::DepthFirst, &mut out);

        assert!(result.is_err(), "an unsolvable maze should fail");
        let text = String::from_utf8(out).expect("output is utf-8");
        assert_eq!(text, "S1G\nNo path found.\n");
    }
}
