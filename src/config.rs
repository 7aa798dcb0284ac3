//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{ensure, Result};
use log::LevelFilter;

use crate::{
    labyrinth::MIN_MAZE_SIDE,
    movement::{
        MotionSettings, DEFAULT_FOV_STEP, DEFAULT_MOVE_SPEED, DEFAULT_TURN_STEP, MAX_FOV, MIN_FOV,
    },
    pose::DEFAULT_FOV,
    raycast::{RayMarch, DEFAULT_MAX_DEPTH, DEFAULT_STEP},
    session::RenderSettings,
    shading::DEFAULT_SHADES,
};

/// Largest accepted number of shade levels.
const MAX_SHADES: u8 = 64;

/// First-person terminal raycaster through generated mazes.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Width of generated mazes; must be odd and at least 5.
    #[arg(long, default_value_t = 23)]
    pub width: usize,

    /// Height of generated mazes; must be odd and at least 5.
    #[arg(long, default_value_t = 23)]
    pub height: usize,

    /// Seed of the first generated maze; later mazes use the following seeds.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Map file to play instead of the built-in arena.
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Distance after which rays give up.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: f64,

    /// Distance a ray advances between samples.
    #[arg(long, default_value_t = DEFAULT_STEP)]
    pub step: f64,

    /// Number of shade levels for walls and floor.
    #[arg(long, default_value_t = DEFAULT_SHADES)]
    pub shades: u8,

    /// Distance covered by one movement key press.
    #[arg(long, default_value_t = DEFAULT_MOVE_SPEED)]
    pub move_speed: f64,

    /// Radians turned by one rotation key press.
    #[arg(long, default_value_t = DEFAULT_TURN_STEP)]
    pub turn_step: f64,

    /// Radians the field of view changes by per key press.
    #[arg(long, default_value_t = DEFAULT_FOV_STEP)]
    pub fov_step: f64,

    /// Initial field of view, in radians.
    #[arg(long, default_value_t = DEFAULT_FOV)]
    pub fov: f64,

    /// Cast rays on all cores.
    #[arg(long)]
    pub parallel: bool,

    /// Hide the overhead map.
    #[arg(long)]
    pub no_minimap: bool,

    /// Hide the status line.
    #[arg(long)]
    pub no_status: bool,

    /// Milliseconds to wait for input each frame.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Default log level; `RUST_LOG` overrides it.
    #[arg(long, default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 23,
            height: 23,
            seed: None,
            map: None,
            max_depth: DEFAULT_MAX_DEPTH,
            step: DEFAULT_STEP,
            shades: DEFAULT_SHADES,
            move_speed: DEFAULT_MOVE_SPEED,
            turn_step: DEFAULT_TURN_STEP,
            fov_step: DEFAULT_FOV_STEP,
            fov: DEFAULT_FOV,
            parallel: false,
            no_minimap: false,
            no_status: false,
            frame_ms: 16,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Config {
    /// Checks every value for ranges the game cannot work with.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The maze size is even or smaller than the minimum
    /// - The ray march depth or step are not positive, or the step is not shorter than the depth
    /// - The shade count is outside `2..=64`
    /// - A movement step is not a positive number
    /// - The initial field of view is outside the clamp range
    pub fn validate(&self) -> Result<()> {
        for (name, side) in [("width", self.width), ("height", self.height)] {
            ensure!(
                side >= MIN_MAZE_SIDE && !side.is_multiple_of(2),
                "maze {name} must be odd and at least {MIN_MAZE_SIDE}, got {side}"
            );
        }

        let _ = self.march()?;

        ensure!(
            (2..=MAX_SHADES).contains(&self.shades),
            "shades must be between 2 and {MAX_SHADES}, got {}",
            self.shades
        );

        for (name, value) in [
            ("move speed", self.move_speed),
            ("turn step", self.turn_step),
            ("fov step", self.fov_step),
        ] {
            ensure!(
                value.is_finite() && value > 0.0,
                "{name} must be a positive number, got {value}"
            );
        }

        ensure!(
            (MIN_FOV..=MAX_FOV).contains(&self.fov),
            "fov must be between {MIN_FOV:.3} and {MAX_FOV:.3} radians, got {}",
            self.fov
        );

        Ok(())
    }

    /// Returns the validated ray marching parameters.
    ///
    /// # Errors
    ///
    /// See [`RayMarch::new`].
    pub fn march(&self) -> Result<RayMarch> {
        RayMarch::new(self.max_depth, self.step)
    }

    /// Returns the movement step sizes.
    #[must_use]
    pub fn motion(&self) -> MotionSettings {
        MotionSettings {
            move_speed: self.move_speed,
            turn_step: self.turn_step,
            fov_step: self.fov_step,
            ..MotionSettings::default()
        }
    }

    /// Returns the frame rendering parameters.
    ///
    /// # Errors
    ///
    /// See [`RayMarch::new`].
    pub fn render(&self) -> Result<RenderSettings> {
        Ok(RenderSettings {
            march: self.march()?,
            shades: self.shades,
            parallel: self.parallel,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::try_parse_from(["raycastuine"]).expect("no flags should parse");

        assert!(config.validate().is_ok(), "defaults should validate");
        assert_eq!(config.width, 23);
        assert_eq!(config.shades, DEFAULT_SHADES);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let config = Config::try_parse_from([
            "raycastuine",
            "--width",
            "31",
            "--seed",
            "7",
            "--step",
            "0.05",
            "--parallel",
            "--log-level",
            "debug",
        ])
        .expect("flags should parse");

        assert_eq!(config.width, 31);
        assert_eq!(config.seed, Some(7));
        assert!((config.step - 0.05).abs() < f64::EPSILON);
        assert!(config.parallel);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert!(config.validate().is_ok(), "parsed flags should validate");
    }

    #[test]
    fn test_rejects_even_maze() {
        let config = Config {
            width: 24,
            ..Config::default()
        };

        assert!(config.validate().is_err(), "even width should be rejected");
    }

    #[test]
    fn test_rejects_bad_march() {
        let config = Config {
            step: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err(), "zero step should be rejected");

        let config = Config {
            max_depth: -1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err(), "negative depth should be rejected");
    }

    #[test]
    fn test_rejects_bad_shades_and_motion() {
        let config = Config {
            shades: 1,
            ..Config::default()
        };
        assert!(config.validate().is_err(), "one shade should be rejected");

        let config = Config {
            move_speed: f64::NAN,
            ..Config::default()
        };
        assert!(config.validate().is_err(), "NaN speed should be rejected");

        let config = Config {
            fov: 3.2,
            ..Config::default()
        };
        assert!(config.validate().is_err(), "fov past pi should be rejected");
    }

    #[test]
    fn test_motion_and_render_settings() {
        let config = Config {
            move_speed: 0.25,
            parallel: true,
            ..Config::default()
        };

        let motion = config.motion();
        assert!((motion.move_speed - 0.25).abs() < f64::EPSILON);
        assert!((motion.max_fov - MAX_FOV).abs() < f64::EPSILON);

        let render = config.render().expect("defaults should give render settings");
        assert!(render.parallel);
        assert_eq!(render.march, RayMarch::default());
    }
}
