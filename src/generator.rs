//! Perfect-maze generation by randomized depth-first carving.
//!
//! Only positions with even row and column indices act as cell centers. Starting from `(0, 0)`,
//! the carver opens the current center, shuffles the four two-step directions and, for every
//! target center that is still a wall, opens the wall between them and descends into the target.
//! The descent is driven by an explicit stack so large grids cannot exhaust the call stack.

use log::debug;
use rand::{seq::SliceRandom as _, Rng};
use thiserror::Error;

use crate::grid::{Cell, Coord, Direction, Grid};

/// Returned when the requested dimensions cannot hold a start and a distinct goal.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot generate a {rows}x{cols} maze: both dimensions must be at least 1 and the grid must hold between 2 and usize::MAX cells")]
pub struct InvalidDimensions {
    /// Requested row count.
    pub rows: usize,
    /// Requested column count.
    pub cols: usize,
}

/// Carving order before shuffling.
const CARVE_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// A center being carved, together with the directions it has yet to try.
struct Frame {
    /// The center this frame carves from.
    center: Coord,
    /// Directions in the order this frame tries them.
    directions: [Direction; 4],
    /// Index of the next direction to try.
    cursor: usize,
}

impl Frame {
    /// Opens `center` and draws a fresh direction order for it.
    fn enter<R: Rng + ?Sized>(grid: &mut Grid, center: Coord, rng: &mut R) -> Self {
        grid.set(center, Cell::Open);

        let mut directions = CARVE_ORDER;
        directions.shuffle(rng);

        Self {
            center,
            directions,
            cursor: 0,
        }
    }
}

/// Generates a maze using thread-local entropy.
///
/// # Errors
///
/// - [`InvalidDimensions`] if either dimension is zero, the grid is `1x1`, or `rows * cols`
///   overflows `usize`.
pub fn generate(rows: usize, cols: usize) -> Result<Grid, InvalidDimensions> {
    generate_with_rng(rows, cols, &mut rand::thread_rng())
}

/// Generates a maze drawing every random decision from `rng`.
///
/// The same seeded generator always yields the same grid. The start is `(0, 0)`; the goal is the
/// bottom-right corner, or the last open cell in reverse row-major order when the carve never
/// reached that corner.
///
/// # Errors
///
/// - [`InvalidDimensions`] if either dimension is zero, the grid is `1x1`, or `rows * cols`
///   overflows `usize`.
pub fn generate_with_rng<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Grid, InvalidDimensions> {
    if !rows.checked_mul(cols).is_some_and(|cells| cells >= 2) {
        return Err(InvalidDimensions { rows, cols });
    }

    let mut grid = Grid::filled(rows, cols, Cell::Wall);
    carve(&mut grid, rng);

    let start = Coord::new(0, 0);
    grid.set(start, Cell::Start);

    let goal = place_goal(&grid, start);
    grid.set(goal, Cell::Goal);

    debug!("generated {rows}x{cols} maze with goal at {goal}");

    Ok(grid)
}

/// Carves passages from `(0, 0)` until every reachable center has been visited.
fn carve<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut stack = vec![Frame::enter(grid, Coord::new(0, 0), rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.cursor) else {
            let _ = stack.pop();
            continue;
        };
        frame.cursor += 1;

        let center = frame.center;
        let Some(target) = center.offset(direction, 2) else {
            continue;
        };
        if grid.get(target) != Some(Cell::Wall) {
            continue;
        }

        if let Some(between) = center.step(direction) {
            grid.set(between, Cell::Open);
        }
        stack.push(Frame::enter(grid, target, rng));
    }
}

/// Picks the goal cell of a freshly carved grid whose start is already marked.
fn place_goal(grid: &Grid, start: Coord) -> Coord {
    let corner = Coord::new(grid.rows() - 1, grid.cols() - 1);
    if grid.get(corner) != Some(Cell::Wall) && corner != start {
        return corner;
    }

    let last_open = (0..grid.rows())
        .rev()
        .flat_map(|row| (0..grid.cols()).rev().map(move |col| Coord::new(row, col)))
        .find(|coord| grid.get(*coord) == Some(Cell::Open));

    // Grids no larger than 2x2 carve nothing but the start.
    last_open.unwrap_or_else(|| {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| start.step(direction))
            .find(|coord| grid.contains(*coord))
            .unwrap_or(corner)
    })
}

#[cfg(test)]
mod tests {
    use rand::{rngs::mock::StepRng, rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::search;

    #[test]
    fn test_generate_rejects_invalid_dimensions() {
        assert_eq!(
            generate(0, 5),
            Err(InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(
            generate(5, 0),
            Err(InvalidDimensions { rows: 5, cols: 0 })
        );
        assert_eq!(
            generate(1, 1),
            Err(InvalidDimensions { rows: 1, cols: 1 })
        );
    }

    #[test]
    fn test_generate_rejects_overflowing_dimensions() {
        assert_eq!(
            generate(usize::MAX, 2),
            Err(InvalidDimensions {
                rows: usize::MAX,
                cols: 2
            }),
            "a cell count that overflows usize should be rejected, not wrapped"
        );
    }

    #[test]
    fn test_generate_exact_shape_with_constant_rng() {
        // A constant zero source turns the shuffle into a fixed rotation: down, left, right, up.
        let mut rng = StepRng::new(0, 0);

        let grid = generate_with_rng(3, 3, &mut rng).expect("3x3 is a valid size");

        assert_eq!(grid.to_string(), "S10\n010\n00G");
    }

    #[test]
    fn test_generate_same_seed_same_grid() {
        let first = generate_with_rng(15, 21, &mut StdRng::seed_from_u64(42))
            .expect("valid dimensions");
        let second = generate_with_rng(15, 21, &mut StdRng::seed_from_u64(42))
            .expect("valid dimensions");

        assert_eq!(first, second, "equal seeds should carve equal mazes");
    }

    #[test]
    fn test_generate_markers_and_reachability() {
        let sizes = [
            (1, 2),
            (2, 1),
            (2, 2),
            (1, 7),
            (7, 1),
            (2, 6),
            (3, 3),
            (4, 4),
            (5, 8),
            (8, 5),
            (10, 10),
            (21, 21),
        ];

        for (rows, cols) in sizes {
            for seed in 0..8 {
                let grid = generate_with_rng(rows, cols, &mut StdRng::seed_from_u64(seed))
                    .expect("all listed sizes are valid");

                assert_eq!(grid.rows(), rows);
                assert_eq!(grid.cols(), cols);
                assert_eq!(grid.validate(), Ok(()), "{rows}x{cols} seed {seed}");
                assert_eq!(grid.start(), Some(Coord::new(0, 0)));
                assert!(
                    search::breadth_first(&grid).is_some(),
                    "goal should be reachable on {rows}x{cols} seed {seed}:\n{grid}"
                );
            }
        }
    }

    #[test]
    fn test_generate_odd_grid_goal_in_corner() {
        let grid = generate_with_rng(9, 13, &mut StdRng::seed_from_u64(7)).expect("valid size");

        assert_eq!(grid.goal(), Some(Coord::new(8, 12)));
    }

    #[test]
    fn test_generate_even_grid_goal_falls_back() {
        let grid = generate_with_rng(4, 4, &mut StdRng::seed_from_u64(3)).expect("valid size");

        assert_eq!(
            grid.goal(),
            Some(Coord::new(2, 2)),
            "the last carved center should hold the goal when the corner is a wall"
        );
    }

    #[test]
    fn test_generate_tiny_grids_keep_goal_adjacent() {
        let grid = generate_with_rng(2, 2, &mut StdRng::seed_from_u64(0)).expect("valid size");
        assert_eq!(grid.to_string(), "S1\nG1");

        let corridor = generate_with_rng(1, 2, &mut StdRng::seed_from_u64(0)).expect("valid size");
        assert_eq!(corridor.to_string(), "SG");
    }

    #[test]
    fn test_generate_corridor() {
        let grid = generate_with_rng(1, 7, &mut StdRng::seed_from_u64(1)).expect("valid size");

        assert_eq!(grid.to_string(), "S00000G");
    }

    #[test]
    fn test_generate_perfect_maze_has_no_cycles() {
        let grid = generate_with_rng(11, 15, &mut StdRng::seed_from_u64(99)).expect("valid size");

        let open = grid.rows() * grid.cols() - grid.count(Cell::Wall);
        let mut edges = 0;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let coord = Coord::new(row, col);
                if grid.is_traversable(coord) {
                    edges += [Direction::Down, Direction::Right]
                        .into_iter()
                        .filter_map(|direction| coord.step(direction))
                        .filter(|next| grid.is_traversable(*next))
                        .count();
                }
            }
        }

        assert_eq!(
            edges + 1,
            open,
            "a connected acyclic maze is a tree with one edge fewer than it has cells"
        );
    }
}
