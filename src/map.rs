//! Map data and management module.
//!
//! This module contains the `Map` struct, which names a maze layout the player can pick from the
//! map menu: either the built-in randomly generated layout or a fixed grid read from a `.maze`
//! file.

use std::ffi::OsString;

use color_eyre::eyre::{OptionExt as _, Result};
use rand::Rng;

use crate::{generator, grid::Grid};

/// File extension of maze layout files.
pub(crate) const MAP_EXTENSION: &str = ".maze";

/// Where a map's grid comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Source {
    /// A fresh maze is carved every time the map is (re)started.
    Generated,
    /// The same grid is replayed every time.
    Fixed(Grid),
}

/// Maze layout container.
///
/// This structure represents a named entry of the map menu. It is used within a vector to get a
/// kind of ordered hashmap keyed by the display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Map {
    /// Display name of the map.
    ///
    /// For file maps this is the file name without the `.maze` extension.
    pub(crate) key: String,
    /// Layout of the map.
    pub(crate) source: Source,
}

impl Default for Map {
    fn default() -> Self {
        Self {
            key: "Generated".to_owned(),
            source: Source::Generated,
        }
    }
}

impl Map {
    /// Builds a fixed map from a file name and the file's contents.
    ///
    /// The contents must parse as a grid holding exactly one start and one goal.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The `OsString` cannot be converted to a string slice
    /// - The file name doesn't carry the `.maze` extension
    /// - The contents are not a well-formed grid
    pub(crate) fn from_file(key: OsString, data: &str) -> Result<Self> {
        let mut file_name = key
            .to_str()
            .ok_or_eyre("failed to convert osstring to string slice")?
            .to_owned();
        file_name.truncate(
            file_name
                .rfind(MAP_EXTENSION)
                .ok_or_eyre("failed to find extension in file name")?,
        );

        let grid: Grid = data.parse()?;
        grid.validate()?;

        Ok(Self {
            key: file_name,
            source: Source::Fixed(grid),
        })
    }

    /// Produces the grid to play on, carving a new one for generated maps.
    ///
    /// # Errors
    ///
    /// This function may return errors if the requested dimensions cannot hold a maze.
    pub(crate) fn grid<R: Rng + ?Sized>(
        &self,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Grid> {
        match &self.source {
            Source::Generated => Ok(generator::generate_with_rng(rows, cols, rng)?),
            Source::Fixed(grid) => Ok(grid.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    #[test]
    fn test_map_default() {
        let map = Map::default();

        assert_eq!(map.key, "Generated");
        assert_eq!(map.source, Source::Generated);
    }

    #[test]
    fn test_map_from_file_valid_input() {
        let map = Map::from_file(OsString::from("test.maze"), "S01\n010\n00G\n")
            .expect("Failed to create map");

        assert_eq!(map.key, "test");
        let Source::Fixed(grid) = map.source else {
            panic!("file maps should be fixed");
        };
        assert_eq!(grid.to_string(), "S01\n010\n00G");
    }

    #[test]
    fn test_map_from_file_multiple_extensions() {
        let map = Map::from_file(OsString::from("test.backup.maze"), "SG")
            .expect("Failed to create map");

        assert_eq!(map.key, "test.backup");
    }

    #[test]
    fn test_map_from_file_missing_extension() {
        assert!(Map::from_file(OsString::from("noextension"), "SG").is_err());
        assert!(Map::from_file(OsString::from("test.txt"), "SG").is_err());
    }

    #[test]
    fn test_map_from_file_invalid_contents() {
        assert!(Map::from_file(OsString::from("bad.maze"), "S0x\n00G").is_err());
        assert!(Map::from_file(OsString::from("bad.maze"), "S00\n000").is_err());
        assert!(Map::from_file(OsString::from("bad.maze"), "").is_err());
    }

    #[test]
    fn test_map_grid_sources() {
        let mut rng = StdRng::seed_from_u64(5);

        let generated = Map::default()
            .grid(7, 9, &mut rng)
            .expect("7x9 is a valid size");
        assert_eq!((generated.rows(), generated.cols()), (7, 9));

        let fixed = Map::from_file(OsString::from("fixed.maze"), "S0G").expect("valid map");
        let grid = fixed.grid(21, 21, &mut rng).expect("fixed maps ignore dimensions");
        assert_eq!(grid.to_string(), "S0G");

        assert!(Map::default().grid(0, 3, &mut rng).is_err());
    }
}
