//! Loading static maps from text files.

use std::{fs, path::Path};

use color_eyre::eyre::{OptionExt as _, Result, WrapErr as _};
use log::info;

use crate::{
    pose::{Pose, DEFAULT_FOV},
    world::{Cell, GridMap},
};

/// Reads and validates a map file, returning the map and a starting pose inside it.
///
/// # Errors
///
/// This function may return errors if:
/// - The file cannot be read
/// - The contents are not a valid map (see [`parse_map`])
pub fn load_map(path: &Path) -> Result<(GridMap, Pose)> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read map file {}", path.display()))?;
    let loaded = parse_map(&contents)
        .wrap_err_with(|| format!("invalid map file {}", path.display()))?;

    info!(
        "loaded {}x{} map from {}",
        loaded.0.width(),
        loaded.0.height(),
        path.display()
    );

    Ok(loaded)
}

/// Parses map text and picks a starting pose.
///
/// Walls are `#`; any other character is floor. Trailing whitespace and blank lines around the
/// grid are ignored. The viewer starts in the middle of the first open cell in reading order,
/// looking east.
///
/// # Errors
///
/// This function may return errors if:
/// - The rows do not form a valid map (see [`GridMap::from_rows`])
/// - The map has no open cell to start in
pub fn parse_map(contents: &str) -> Result<(GridMap, Pose)> {
    let rows: Vec<&str> = contents.trim().lines().map(str::trim_end).collect();
    let map = GridMap::from_rows(&rows)?;

    let start = map
        .cells()
        .iter()
        .position(|cell| *cell == Cell::Open)
        .ok_or_eyre("map has no open cell to start in")?;
    let x = f64::from(u32::try_from(start % map.width())?);
    let y = f64::from(u32::try_from(start / map.width())?);
    let pose = Pose::new(x + 0.5, y + 0.5, 0.0, DEFAULT_FOV);

    Ok((map, pose))
}
