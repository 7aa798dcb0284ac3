//! Logger setup.
//!
//! Log records go to stderr through `env_logger`. While the game owns the terminal the alternate
//! screen hides them, so run with `2> raycast.log` to keep them.

use color_eyre::eyre::Result;
use env_logger::Builder;
use log::LevelFilter;

/// Installs the global logger.
///
/// `level` is the default filter; a `RUST_LOG` variable in the environment takes precedence over
/// it, module by module.
///
/// # Errors
///
/// This function returns an error if a global logger has already been installed.
pub fn init(level: LevelFilter) -> Result<()> {
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()?;

    Ok(())
}
