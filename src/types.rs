//! Type definitions and enums for the application state and navigation.

use crate::search::Strategy;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    OptionsMenu(OptionsMenuItem),
    /// In-game maze screen.
    ///
    /// This variant represents the screen where the maze is displayed, walked and solved.
    InGame,
    /// Map selection screen.
    ///
    /// This variant represents the map menu screen of the game. It contains a list of the maps
    /// available to the user.
    MapMenu,
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

/// Options menu navigation choices.
///
/// This enumeration holds the different items in the options menu. It is used to determine which
/// items can the user select in the options menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OptionsMenuItem {
    /// Search strategy option; selecting it cycles through the strategies.
    Algorithm,
    /// "Map" selection option.
    Map,
    /// "Back" navigation option.
    Back,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    MainMenu(u8),
    /// Options menu configuration.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

/// Outcome of the last in-game action, shown in the status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    /// Nothing has happened on this maze yet.
    Ready,
    /// A strategy found a path taking the given number of moves, one less than its cell count.
    Solved(Strategy, usize),
    /// A strategy found no path.
    NoPath(Strategy),
    /// The player reached the goal.
    Won,
}

impl Status {
    /// Returns the status bar text.
    pub(crate) fn message(self) -> String {
        match self {
            Self::Ready => "Ready".to_owned(),
            Self::Solved(strategy, steps) => format!("{strategy}: goal reached in {steps} steps"),
            Self::NoPath(strategy) => format!("{strategy}: no path found"),
            Self::Won => "You won!".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::StartGame);
        let options_menu = Screen::OptionsMenu(OptionsMenuItem::Algorithm);

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::StartGame));
        assert_ne!(main_menu, Screen::InGame);
        assert_ne!(options_menu, Screen::MapMenu);
    }

    #[test]
    fn test_menu_type_repr() {
        assert_eq!(MenuType::MainMenu(3).repr(), "Main Menu");
        assert_eq!(MenuType::OptionsMenu(3).repr(), "Options Menu");
    }

    #[test]
    fn test_menu_type_value() {
        assert_eq!(MenuType::MainMenu(3).value(), 3);
        assert_eq!(MenuType::OptionsMenu(0).value(), 0);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(Status::Ready.message(), "Ready");
        assert_eq!(
            Status::Solved(Strategy::DepthFirst, 12).message(),
            "DFS: goal reached in 12 steps"
        );
        assert_eq!(
            Status::NoPath(Strategy::BestFirst).message(),
            "Greedy: no path found"
        );
        assert_eq!(Status::Won.message(), "You won!");
    }
}
