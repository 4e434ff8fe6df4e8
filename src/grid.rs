//! Grid, coordinate and path types shared by the generator and the search strategies.
//!
//! A [`Grid`] is a rectangular block of [`Cell`]s stored row-major. Its text form is one line per
//! row using the symbols `1` (wall), `0` (open), `S` (start) and `G` (goal), which is also the
//! format of `.maze` files.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Contents of a single grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable position, written as `1`.
    Wall,
    /// Passable position, written as `0`.
    Open,
    /// Passable position where searches begin, written as `S`.
    Start,
    /// Passable position where searches end, written as `G`.
    Goal,
}

impl Cell {
    /// Returns the text symbol of the cell.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '1',
            Self::Open => '0',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }

    /// Parses a text symbol, returning [`None`] for anything outside `1`, `0`, `S` and `G`.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '1' => Some(Self::Wall),
            '0' => Some(Self::Open),
            'S' => Some(Self::Start),
            'G' => Some(Self::Goal),
            _ => None,
        }
    }

    /// Returns whether a walker may stand on this cell.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// One of the four orthogonal moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards higher row indices.
    Down,
    /// Towards lower row indices.
    Up,
    /// Towards higher column indices.
    Right,
    /// Towards lower column indices.
    Left,
}

impl Direction {
    /// Every direction in the fixed order used for neighbour expansion.
    ///
    /// Searches discover neighbours in exactly this order, so it decides which of several equally
    /// good moves a strategy takes.
    pub const ALL: [Self; 4] = [Self::Down, Self::Up, Self::Right, Self::Left];

    /// Returns the `(row, col)` delta of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Down => (1, 0),
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Left => (0, -1),
        }
    }
}

/// A `(row, col)` position on a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Moves `distance` cells in `direction`, or returns [`None`] if that would leave the
    /// non-negative quadrant. Upper bounds are the grid's concern.
    #[must_use]
    pub const fn offset(self, direction: Direction, distance: isize) -> Option<Self> {
        let (row_delta, col_delta) = direction.delta();
        let Some(row) = self.row.checked_add_signed(row_delta * distance) else {
            return None;
        };
        let Some(col) = self.col.checked_add_signed(col_delta * distance) else {
            return None;
        };

        Some(Self { row, col })
    }

    /// Moves a single cell in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        self.offset(direction, 1)
    }

    /// Sum of the absolute row and column differences to `other`.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// Errors produced while reading a grid from text or checking its markers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input held no rows.
    #[error("grid has no rows")]
    Empty,
    /// A row's width differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character outside the grid alphabet was found.
    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol {
        /// The rejected character.
        symbol: char,
        /// Row of the character.
        row: usize,
        /// Column of the character.
        col: usize,
    },
    /// The grid has no cell holding the given marker.
    #[error("grid has no {} marker", .marker.symbol())]
    MissingMarker {
        /// [`Cell::Start`] or [`Cell::Goal`].
        marker: Cell,
    },
    /// The grid holds the given marker more than once.
    #[error("grid has {count} {} markers, expected one", .marker.symbol())]
    DuplicateMarker {
        /// [`Cell::Start`] or [`Cell::Goal`].
        marker: Cell,
        /// How many times the marker occurs.
        count: usize,
    },
}

/// A rectangular maze layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Row-major cell storage of length `rows * cols`.
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid with every position set to `cell`. Both dimensions must be non-zero.
    pub(crate) fn filled(rows: usize, cols: usize, cell: Cell) -> Self {
        Self {
            rows,
            cols,
            cells: vec![cell; rows * cols],
        }
    }

    /// Builds a grid from explicit rows.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Empty`] if there are no rows or the first row is empty.
    /// - [`ParseError::Ragged`] if the rows differ in width.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ParseError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(ParseError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ParseError::Ragged {
                    row: idx,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether `coord` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Flat storage index of `coord`, or [`None`] if it lies outside the grid.
    pub(crate) const fn index(&self, coord: Coord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.row * self.cols + coord.col)
        } else {
            None
        }
    }

    /// Returns the cell at `coord`, or [`None`] if it lies outside the grid.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    /// Overwrites the cell at `coord`. Out-of-bounds writes are ignored.
    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        if let Some(slot) = self
            .index(coord)
            .and_then(|idx| self.cells.get_mut(idx))
        {
            *slot = cell;
        }
    }

    /// Returns whether `coord` is in bounds and not a wall.
    #[must_use]
    pub fn is_traversable(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Cell::is_traversable)
    }

    /// Returns the first coordinate holding `cell` in row-major order.
    #[must_use]
    pub fn find(&self, cell: Cell) -> Option<Coord> {
        self.cells
            .iter()
            .position(|candidate| *candidate == cell)
            .map(|idx| Coord::new(idx / self.cols, idx % self.cols))
    }

    /// First start marker in row-major order.
    #[must_use]
    pub fn start(&self) -> Option<Coord> {
        self.find(Cell::Start)
    }

    /// First goal marker in row-major order.
    #[must_use]
    pub fn goal(&self) -> Option<Coord> {
        self.find(Cell::Goal)
    }

    /// Counts the positions holding `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .filter(|candidate| **candidate == cell)
            .count()
    }

    /// Traversable orthogonal neighbours of `coord`, in [`Direction::ALL`] order.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| coord.step(direction))
            .filter(|next| self.is_traversable(*next))
    }

    /// Iterates over the rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols.max(1))
    }

    /// Checks that the grid holds exactly one start and exactly one goal.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingMarker`] if a marker is absent.
    /// - [`ParseError::DuplicateMarker`] if a marker occurs more than once.
    pub fn validate(&self) -> Result<(), ParseError> {
        for marker in [Cell::Start, Cell::Goal] {
            match self.count(marker) {
                0 => return Err(ParseError::MissingMarker { marker }),
                1 => {}
                count => return Err(ParseError::DuplicateMarker { marker, count }),
            }
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rows = input
            .trim()
            .lines()
            .enumerate()
            .map(|(row, line)| {
                line.trim_end()
                    .chars()
                    .enumerate()
                    .map(|(col, symbol)| {
                        Cell::from_symbol(symbol)
                            .ok_or(ParseError::UnknownSymbol { symbol, row, col })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.iter_rows().enumerate() {
            if idx > 0 {
                writeln!(formatter)?;
            }
            for cell in row {
                write!(formatter, "{}", cell.symbol())?;
            }
        }

        Ok(())
    }
}

/// A walk from a start cell to a goal cell, both included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path(Vec<Coord>);

impl Path {
    /// Wraps an ordered list of coordinates.
    pub(crate) const fn new(cells: Vec<Coord>) -> Self {
        Self(cells)
    }

    /// The coordinates in walking order.
    #[must_use]
    pub fn cells(&self) -> &[Coord] {
        &self.0
    }

    /// Number of cells on the path, start and goal included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the path holds no cells. Paths returned by a search never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves, one less than [`Path::len`].
    #[must_use]
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// First coordinate.
    #[must_use]
    pub fn start(&self) -> Option<Coord> {
        self.0.first().copied()
    }

    /// Last coordinate.
    #[must_use]
    pub fn goal(&self) -> Option<Coord> {
        self.0.last().copied()
    }

    /// Returns whether the path passes through `coord`.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.0.contains(&coord)
    }
}
