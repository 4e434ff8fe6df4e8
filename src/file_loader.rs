//! File loading utilities for maze layout files.

use std::{fs, path::Path};

use color_eyre::eyre::{OptionExt as _, Result, WrapErr as _};
use log::warn;

use crate::map::{Map, MAP_EXTENSION};

/// Scans `dir` for `.maze` files and loads them.
///
/// This function searches for files with the `.maze` extension in the given directory, validates
/// their format, and appends them to the maps collection for user selection in name order. It
/// skips invalid files with a warning and continues processing valid ones.
///
/// # Errors
///
/// This function may return errors if the directory cannot be listed. Map files that cannot be
/// read or parsed are skipped.
pub(crate) fn fetch_files(dir: &Path, maps: &mut Vec<Map>) -> Result<()> {
    let mut found = Vec::new();

    let entries =
        fs::read_dir(dir).wrap_err_with(|| format!("failed to read {}", dir.display()))?;
    for file in entries {
        let file = file?;
        let is_map = !file.file_type()?.is_dir()
            && file
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(MAP_EXTENSION));
        if !is_map {
            continue;
        }

        let loaded = fs::read_to_string(file.path())
            .map_err(Into::into)
            .and_then(|contents| Map::from_file(file.file_name(), &contents));
        match loaded {
            Ok(map) => found.push(map),
            Err(err) => warn!("skipping {}: {err}", file.path().display()),
        }
    }

    found.sort_by(|left, right| left.key.cmp(&right.key));
    maps.extend(found);

    Ok(())
}

/// Loads a single maze file chosen on the command line.
///
/// # Errors
///
/// This function may return errors if the file cannot be read, has no `.maze` extension, or does
/// not hold a well-formed grid.
pub(crate) fn load_file(path: &Path) -> Result<Map> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .ok_or_eyre("map path has no file name")?
        .to_owned();

    Map::from_file(name, &contents).wrap_err_with(|| format!("invalid map {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{env, path::PathBuf};

    use super::*;
    use crate::map::Source;

    /// Creates an empty scratch directory unique to `name`.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("mazeseek-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("failed to create scratch directory");
        dir
    }

    #[test]
    fn test_fetch_files_keeps_valid_maps_only() {
        let dir = scratch_dir("fetch");
        fs::write(dir.join("b_valid.maze"), "S01\n010\n00G\n").expect("write");
        fs::write(dir.join("a_valid.maze"), "SG").expect("write");
        fs::write(dir.join("ragged.maze"), "S0\n0G0").expect("write");
        fs::write(dir.join("no_goal.maze"), "S00").expect("write");
        fs::write(dir.join("notes.txt"), "S0G").expect("write");
        fs::create_dir_all(dir.join("folder.maze")).expect("mkdir");

        let mut maps = vec![Map::default()];
        fetch_files(&dir, &mut maps).expect("directory should be readable");

        let keys: Vec<&str> = maps.iter().map(|map| map.key.as_str()).collect();
        assert_eq!(keys, vec!["Generated", "a_valid", "b_valid"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_fetch_files_skips_undecodable_map() {
        let dir = scratch_dir("undecodable");
        fs::write(dir.join("good.maze"), "S0G").expect("write");
        fs::write(dir.join("bad.maze"), [0xff, 0xfe, b'\n']).expect("write");

        let mut maps = vec![Map::default()];
        fetch_files(&dir, &mut maps).expect("an unreadable map should not abort the scan");

        let keys: Vec<&str> = maps.iter().map(|map| map.key.as_str()).collect();
        assert_eq!(keys, vec!["Generated", "good"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_fetch_files_missing_directory() {
        let dir = env::temp_dir().join("mazeseek-definitely-missing-directory");
        let mut maps = Vec::new();

        assert!(fetch_files(&dir, &mut maps).is_err());
        assert!(maps.is_empty());
    }

    #[test]
    fn test_load_file() {
        let dir = scratch_dir("load");
        let path = dir.join("corridor.maze");
        fs::write(&path, "S000G\n").expect("write");

        let map = load_file(&path).expect("valid map file");

        assert_eq!(map.key, "corridor");
        assert!(matches!(map.source, Source::Fixed(ref grid) if grid.cols() == 5));
        assert!(load_file(&dir.join("absent.maze")).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
