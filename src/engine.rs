//! Game session state: the current maze, the player walking it and the last solution.

use log::info;

use crate::{
    grid::{Coord, Direction, Grid, Path},
    search::Strategy,
};

/// A playable maze together with the player's position and the most recent search result.
#[derive(Clone, Debug)]
pub struct Game {
    /// The maze being played.
    grid: Grid,
    /// Where the player stands.
    player: Coord,
    /// Where the player has to go.
    goal: Coord,
    /// Path found by the last successful solve, cleared on every new solve or reset.
    path: Option<Path>,
}

impl Game {
    /// Starts a session on `grid`.
    ///
    /// The player begins on the start marker, or `(0, 0)` when there is none. The goal is the
    /// goal marker, or the bottom-right corner when there is none.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let player = grid.start().unwrap_or_default();
        let goal = grid.goal().unwrap_or_else(|| {
            Coord::new(
                grid.rows().saturating_sub(1),
                grid.cols().saturating_sub(1),
            )
        });

        Self {
            grid,
            player,
            goal,
            path: None,
        }
    }

    /// Replaces the maze and restarts the session on it.
    pub fn reset(&mut self, grid: Grid) {
        *self = Self::new(grid);
    }

    /// The maze being played.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current player position.
    #[must_use]
    pub const fn player(&self) -> Coord {
        self.player
    }

    /// Goal position.
    #[must_use]
    pub const fn goal(&self) -> Coord {
        self.goal
    }

    /// Path from the last successful solve, if any.
    #[must_use]
    pub const fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Returns whether the player stands on the goal.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.player == self.goal
    }

    /// Moves the player one cell, returning whether the move happened.
    ///
    /// Moves off the grid or into walls are refused and leave the player in place.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        match self.player.step(direction) {
            Some(next) if self.grid.is_traversable(next) => {
                self.player = next;
                true
            }
            _ => false,
        }
    }

    /// Solves the maze from its start marker with `strategy` and keeps the result.
    ///
    /// Any previous path is discarded first, so a failed solve leaves no path behind.
    pub fn solve(&mut self, strategy: Strategy) -> Option<&Path> {
        self.path = strategy.search(&self.grid);
        match &self.path {
            Some(path) => info!("{strategy} solved the maze in {} steps", path.steps()),
            None => info!("{strategy} found no path"),
        }

        self.path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(input: &str) -> Game {
        Game::new(input.parse().expect("test grid should parse"))
    }

    #[test]
    fn test_new_places_player_on_start() {
        let game = game("0S1\n00G");

        assert_eq!(game.player(), Coord::new(0, 1));
        assert_eq!(game.goal(), Coord::new(1, 2));
        assert!(game.path().is_none());
        assert!(!game.has_won());
    }

    #[test]
    fn test_new_falls_back_without_markers() {
        let game = game("000\n000");

        assert_eq!(game.player(), Coord::new(0, 0));
        assert_eq!(game.goal(), Coord::new(1, 2));
    }

    #[test]
    fn test_move_player_blocked_by_walls_and_edges() {
        let mut game = game("S1\n0G");

        assert!(!game.move_player(Direction::Up), "edge should block");
        assert!(!game.move_player(Direction::Left), "edge should block");
        assert!(!game.move_player(Direction::Right), "wall should block");
        assert_eq!(game.player(), Coord::new(0, 0));

        assert!(game.move_player(Direction::Down));
        assert!(game.move_player(Direction::Right));
        assert!(game.has_won());
    }

    #[test]
    fn test_solve_keeps_path() {
        let mut game = game("S01\n010\n00G");

        let steps = game
            .solve(Strategy::BreadthFirst)
            .map(Path::steps)
            .expect("maze is solvable");

        assert_eq!(steps, 4);
        assert!(game.path().is_some_and(|path| path.contains(Coord::new(2, 1))));
    }

    #[test]
    fn test_failed_solve_clears_previous_path() {
        let mut game = game("S0G");
        assert!(game.solve(Strategy::DepthFirst).is_some());

        game.reset("S1G".parse().expect("test grid should parse"));
        assert!(game.path().is_none(), "reset should drop the old path");

        assert!(game.solve(Strategy::BestFirst).is_none());
        assert!(game.path().is_none());
    }
}
