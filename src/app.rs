//! Core application state and logic for the terminal interface.

use std::path::PathBuf;

use color_eyre::eyre::Result;
use rand::rngs::StdRng;
use ratatui::DefaultTerminal;

use crate::{
    engine::Game,
    events,
    map::Map,
    search::Strategy,
    types::{MainMenuItem, Screen, Status},
    ui,
};

/// Start-up options for the terminal interface, taken from the command line.
#[derive(Debug)]
pub(crate) struct Settings {
    /// Rows of generated mazes.
    pub(crate) rows: usize,
    /// Columns of generated mazes.
    pub(crate) cols: usize,
    /// Strategy used by the solve key.
    pub(crate) strategy: Strategy,
    /// Directory scanned for `.maze` files when the map menu opens.
    pub(crate) maps_dir: PathBuf,
    /// Map to start on.
    pub(crate) map: Map,
}

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub(crate) struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Currently active map.
    ///
    /// This field holds the map the game is played on, either the generated one or one loaded and
    /// selected by the user.
    pub(crate) map: Map,
    /// Collection of all available maps.
    ///
    /// This field holds the generated map followed by every valid `.maze` file found in
    /// [`maps_dir`](App::maps_dir), stored within an ordered collection.
    pub(crate) maps: Vec<Map>,
    /// Map currently selected in the viewport.
    ///
    /// This field holds the map that is currently selected in the viewport by the user cursor. This
    /// means the currently selected model in the maps menu.
    pub(crate) viewport_map: Option<Map>,
    /// Scrolling offset for the map list viewport.
    ///
    /// This field holds the offset by which to scroll the sliding window into the
    /// [`maps`](App::maps) vector in the maps menu's viewport.
    pub(crate) viewport_offset: usize,
    /// Height of the map list rendering area.
    ///
    /// This field holds the height of the area in which the list of maps are being rendered as a
    /// measure of terminal cells during the last redraw of the on-screen frame.
    pub(crate) viewport_height: usize,
    /// Directory scanned for `.maze` files.
    pub(crate) maps_dir: PathBuf,
    /// Game session on the current maze.
    pub(crate) game: Game,
    /// Strategy used by the solve key.
    pub(crate) strategy: Strategy,
    /// Outcome of the last in-game action.
    pub(crate) status: Status,
    /// Rows of generated mazes.
    pub(crate) rows: usize,
    /// Columns of generated mazes.
    pub(crate) cols: usize,
    /// Random source for maze generation.
    pub(crate) rng: StdRng,
}

impl App {
    /// Creates a new instance of the App structure and builds the first maze.
    ///
    /// # Errors
    ///
    /// This function may return errors if the configured dimensions cannot hold a maze.
    pub(crate) fn new(settings: Settings, mut rng: StdRng) -> Result<Self> {
        let grid = settings
            .map
            .grid(settings.rows, settings.cols, &mut rng)?;

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            map: settings.map,
            maps: Vec::new(),
            viewport_map: None,
            viewport_offset: 0,
            viewport_height: 0,
            maps_dir: settings.maps_dir,
            game: Game::new(grid),
            strategy: settings.strategy,
            status: Status::Ready,
            rows: settings.rows,
            cols: settings.cols,
            rng,
        })
    }

    /// Restarts the game on the current map, carving a new maze for the generated map.
    ///
    /// # Errors
    ///
    /// This function may return errors if the configured dimensions cannot hold a maze.
    pub(crate) fn restart(&mut self) -> Result<()> {
        let grid = self.map.grid(self.rows, self.cols, &mut self.rng)?;
        self.game.reset(grid);
        self.status = Status::Ready;

        Ok(())
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::SeedableRng as _;

    use super::*;

    /// Builds an app on a small generated maze with a fixed seed.
    pub(crate) fn create_test_app() -> App {
        let settings = Settings {
            rows: 7,
            cols: 9,
            strategy: Strategy::BreadthFirst,
            maps_dir: std::env::temp_dir(),
            map: Map::default(),
        };
        App::new(settings, StdRng::seed_from_u64(11)).expect("7x9 is a valid size")
    }

    #[test]
    fn test_new_app_starts_in_main_menu() {
        let app = create_test_app();

        assert!(!app.exit);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
        assert_eq!(app.status, Status::Ready);
        assert_eq!(app.game.grid().rows(), 7);
        assert_eq!(app.game.grid().cols(), 9);
    }

    #[test]
    fn test_new_app_rejects_bad_dimensions() {
        let settings = Settings {
            rows: 0,
            cols: 9,
            strategy: Strategy::DepthFirst,
            maps_dir: std::env::temp_dir(),
            map: Map::default(),
        };

        assert!(App::new(settings, StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut app = create_test_app();
        let _ = app.game.solve(Strategy::BreadthFirst);
        app.status = Status::Won;

        app.restart().expect("restart should succeed");

        assert!(app.game.path().is_none());
        assert_eq!(app.status, Status::Ready);
    }
}
