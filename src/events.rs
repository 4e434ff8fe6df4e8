//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    app::App,
    file_loader,
    grid::{Direction, Path},
    map::Map,
    types::{MainMenuItem, OptionsMenuItem, Screen, Status},
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to [`handle_key`]. It uses a
/// timeout to avoid blocking the UI.
///
/// # Errors
///
/// This function may return errors from reading terminal events or from the key handlers.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    Ok(())
}

/// Dispatches a single key press to the handler for the current screen.
///
/// # Errors
///
/// This function may return errors from the key handlers.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app)?,
        KeyCode::Char('k') => handle_k_events(app)?,
        KeyCode::Char('l') => handle_l_events(app)?,
        KeyCode::Char('h') => handle_h_events(app),
        code if app.screen == Screen::InGame => handle_game_key(app, code)?,
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// The behavior varies depending on the current screen, handling menu navigation and viewport
/// scrolling in the map list.
///
/// # Errors
///
/// This function may return errors if the cursor-selected map cannot be found.
pub(crate) fn handle_j_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Algorithm) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Map);
        }
        Screen::OptionsMenu(OptionsMenuItem::Map) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        Screen::MapMenu => {
            let index = viewport_index(app)?;
            if let Some(next) = app.maps.get(index + 1) {
                app.viewport_map = Some(next.clone());
                if index + 1 >= app.viewport_offset + app.viewport_height.max(1) {
                    app.viewport_offset += 1;
                }
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'k' key press events for upward navigation.
///
/// Like the 'j' handler, behavior varies by screen and includes viewport management for the
/// scrollable map list.
///
/// # Errors
///
/// This function may return errors if the cursor-selected map cannot be found.
pub(crate) fn handle_k_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Map);
        }
        Screen::OptionsMenu(OptionsMenuItem::Map) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);
        }
        Screen::MapMenu => {
            let index = viewport_index(app)?;
            if let Some(previous) = index.checked_sub(1) {
                app.viewport_map = app.maps.get(previous).cloned();
                app.viewport_offset = app.viewport_offset.min(previous);
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function handles screen transitions, strategy cycling, map loading, and selection
/// confirmation across different contexts.
///
/// # Errors
///
/// This function may return errors if the maps directory cannot be read, the cursor-selected map
/// cannot be found, or the selected map cannot be started.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Algorithm) => {
            app.strategy = app.strategy.next();
        }
        Screen::OptionsMenu(OptionsMenuItem::Map) => {
            app.screen = Screen::MapMenu;

            let first = Map::default();
            app.maps.clear();
            app.maps.push(first.clone());
            file_loader::fetch_files(&app.maps_dir, &mut app.maps)?;
            if !app.maps.contains(&app.map) {
                app.maps.insert(1, app.map.clone());
            }
            app.viewport_map = Some(first);
            app.viewport_offset = 0;
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::MapMenu => {
            app.map = app
                .viewport_map
                .clone()
                .ok_or_eyre("failed to retrieve cursor-selected map")?;
            app.restart()?;
        }
        Screen::InGame => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// This function handles returning from the in-game screen to the main menu and from the map menu
/// to the options menu.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::MapMenu => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Map);
        }
        _ => {}
    }
}

/// Handles the in-game keys: arrows move the player, 's' solves, 'a' switches strategy and 'r'
/// starts over.
fn handle_game_key(app: &mut App, code: KeyCode) -> Result<()> {
    let direction = match code {
        KeyCode::Down => Direction::Down,
        KeyCode::Up => Direction::Up,
        KeyCode::Right => Direction::Right,
        KeyCode::Left => Direction::Left,
        KeyCode::Char('s') => {
            app.status = match app.game.solve(app.strategy).map(Path::steps) {
                Some(steps) => Status::Solved(app.strategy, steps),
                None => Status::NoPath(app.strategy),
            };
            return Ok(());
        }
        KeyCode::Char('a') => {
            app.strategy = app.strategy.next();
            return Ok(());
        }
        KeyCode::Char('r') => return app.restart(),
        _ => return Ok(()),
    };

    if app.game.move_player(direction) && app.game.has_won() {
        app.status = Status::Won;
    }

    Ok(())
}

/// Position of the cursor-selected map within the map list.
fn viewport_index(app: &App) -> Result<usize> {
    let viewport_map = app
        .viewport_map
        .as_ref()
        .ok_or_eyre("failed to retrieve cursor-selected map")?;

    app.maps
        .iter()
        .position(|map| map == viewport_map)
        .ok_or_eyre("cursor-selected map is not in the map list")
}
