//! Logger setup.
//!
//! Records go through the `log` facade and are written by `env_logger`. `RUST_LOG` overrides the
//! level given on the command line. While the terminal interface owns the screen, records are only
//! written when a log file was requested.

use std::{fs::File, path::Path};

use color_eyre::eyre::{Result, WrapErr as _};
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Installs the global logger.
///
/// With `interactive` set and no `file`, no logger is installed and every record is dropped.
///
/// # Errors
///
/// This function may return errors if the log file cannot be created or a logger is already
/// installed.
pub(crate) fn init(level: LevelFilter, file: Option<&Path>, interactive: bool) -> Result<()> {
    let target = match file {
        Some(path) => Target::Pipe(Box::new(
            File::create(path)
                .wrap_err_with(|| format!("failed to create log file {}", path.display()))?,
        )),
        None if interactive => return Ok(()),
        None => Target::Stderr,
    };

    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(target)
        .try_init()?;

    Ok(())
}
