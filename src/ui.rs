//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    app::App,
    grid::{Cell, Coord, Grid},
    map::Map,
    search::Strategy,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
};

/// Key hints shown under the maze.
const GAME_KEYS: &str = "(arrows) move / (s) solve / (a) algorithm / (r) new maze / (h) menu";

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item, app.strategy),
        Screen::InGame => in_game(app, frame)?,
        Screen::MapMenu => map_menu(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// rendered by the caller into the returned rows.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders the labels of a menu into its rows, highlighting the one at `active`.
fn menu_items(frame: &mut Frame, rows: &[Rect], labels: &[String], active: usize) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (idx, (label, row)) in labels.iter().zip(rows).enumerate() {
        let style = if idx == active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(label.as_str(), style).centered(), *row);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game", "Options", and "Quit". It
/// highlights the currently selected option.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let rows = init_menu(frame, MenuType::MainMenu(3));
    let labels = ["Start Game", "Options", "Quit"].map(str::to_owned);
    let active = match item {
        MainMenuItem::StartGame => 0,
        MainMenuItem::Options => 1,
        MainMenuItem::Quit => 2,
    };

    menu_items(frame, &rows, &labels, active);
}

/// Renders the options menu screen with configuration choices.
///
/// The first entry shows the strategy the solve key will use; selecting it switches to the next
/// one.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem, strategy: Strategy) {
    clear(frame);

    let rows = init_menu(frame, MenuType::OptionsMenu(3));
    let labels = [
        format!("Algorithm: {strategy}"),
        "Map".to_owned(),
        "Return".to_owned(),
    ];
    let active = match item {
        OptionsMenuItem::Algorithm => 0,
        OptionsMenuItem::Map => 1,
        OptionsMenuItem::Back => 2,
    };

    menu_items(frame, &rows, &labels, active);
}

/// Renders the map selection menu with scrollable list of available maps.
///
/// This function displays a viewport containing the generated map and all loadable maze files. It
/// provides scrolling functionality and visual indicators for the currently selected map and the
/// map that's actively being used.
///
/// # Errors
///
/// This function may return errors if the viewport map cannot be retrieved.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn map_menu(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())[1];
    let space = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(space)[1];

    let block = Block::bordered()
        .title_top("Map list")
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(space);

    frame.render_widget(block, space);

    app.viewport_height = inner_space.height.into();

    let [selector_column, list_column] =
        Layout::horizontal([Constraint::Length(2), Constraint::Fill(1)]).areas(inner_space);
    let selectors =
        Layout::vertical(vec![Constraint::Length(1); app.viewport_height]).split(selector_column);
    let entries =
        Layout::vertical(vec![Constraint::Length(1); app.viewport_height]).split(list_column);

    let viewport_map = app
        .viewport_map
        .as_ref()
        .ok_or_eyre("failed to retrieve cursor-selected map")?;

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let visible: Vec<&Map> = app
        .maps
        .iter()
        .skip(app.viewport_offset)
        .take(app.viewport_height)
        .collect();
    let rows = selectors.iter().zip(entries.iter());
    for (map, (selector_row, entry_row)) in visible.into_iter().zip(rows) {
        let style = if map == viewport_map {
            active_content_style
        } else {
            content_style
        };
        let marker = if *map == app.map { DOT } else { " " };

        frame.render_widget(Line::styled(marker, style).centered(), *selector_row);
        frame.render_widget(Line::styled(map.key.as_str(), style), *entry_row);
    }

    Ok(())
}

/// Renders the in-game screen with the maze, the last solution, and the player.
///
/// The maze is painted on a [`Canvas`] with one point per cell, layering walls, the solution
/// path, the start and goal markers, and the player on top. A status bar at the bottom shows the
/// outcome of the last action and the available keys.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
pub(crate) fn in_game(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let grid = app.game.grid();
    let maze_rows = u16::try_from(grid.rows())?;
    let maze_columns = u16::try_from(grid.cols())?;

    let overall_layout =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(frame.area());
    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let maze_area = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(maze_rows),
        Constraint::Min(1),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;
    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(maze_columns),
        Constraint::Min(1),
    ])
    .split(maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    let walls = cells_of(grid, Cell::Wall);
    let route: Vec<Coord> = app
        .game
        .path()
        .map(|path| path.cells().to_vec())
        .unwrap_or_default();
    let markers = [grid.start(), Some(app.game.goal())];

    let wall_points = to_screen_coords(&walls, grid)?;
    let route_points = to_screen_coords(&route, grid)?;
    let markers: Vec<Coord> = markers.into_iter().flatten().collect();
    let marker_points = to_screen_coords(&markers, grid)?;
    let player_points = to_screen_coords(&[app.game.player()], grid)?;

    let x_bound = f64::from(rounded_div::i32(space.width.into(), 2));
    let y_bound = f64::from(rounded_div::i32(space.height.into(), 2));
    let maze = Canvas::default()
        .x_bounds([-x_bound, x_bound])
        .y_bounds([-y_bound, y_bound])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_points,
                color: Color::Green,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &route_points,
                color: Color::Red,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &marker_points,
                color: Color::Yellow,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &player_points,
                color: Color::White,
            });
        });

    frame.render_widget(maze, space);

    let tooltip_block = Block::bordered()
        .title(GAME_KEYS)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status_area = tooltip_block.inner(tooltip_area);

    frame.render_widget(tooltip_block, tooltip_area);
    frame.render_widget(
        Line::raw(format!("[{}] {}", app.strategy, app.status.message())).centered(),
        status_area,
    );

    Ok(())
}

/// Collects the coordinates of every cell holding `cell`.
fn cells_of(grid: &Grid, cell: Cell) -> Vec<Coord> {
    grid.iter_rows()
        .enumerate()
        .flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(move |(_, current)| **current == cell)
                .map(move |(col, _)| Coord::new(row, col))
        })
        .collect()
}

/// Transforms maze coordinates to canvas coordinates centered on the origin.
///
/// Rows map to `y = (rows - 1) / 2 - row`, so the first row is drawn at the top, and columns map
/// to `x = col - (cols - 1) / 2`.
///
/// # Errors
///
/// This function may return errors if a dimension or coordinate does not fit in a `u16`.
pub(crate) fn to_screen_coords(coords: &[Coord], grid: &Grid) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(grid.rows())?);
    let cols_n = f64::from(u16::try_from(grid.cols())?);

    coords
        .iter()
        .map(|coord| {
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(coord.row)?);
            let screen_x = f64::from(u16::try_from(coord.col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}
