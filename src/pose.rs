//! Viewer position and orientation.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

/// Field of view the game starts with.
pub const DEFAULT_FOV: f64 = FRAC_PI_4;

/// Viewer pose in continuous map space.
///
/// This structure holds where the player stands, which way they are looking and how wide the
/// view cone is. The movement controller is responsible for keeping the position inside an open
/// cell; the pose itself does not enforce it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Horizontal position, in cells.
    pub x: f64,
    /// Vertical position, in cells. Grows downwards, like row indices.
    pub y: f64,
    /// View direction in radians, measured from the positive x axis towards positive y.
    pub heading: f64,
    /// Horizontal field of view in radians.
    pub fov: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self::arena_start()
    }
}

impl Pose {
    /// Builds a pose from its parts.
    #[must_use]
    pub const fn new(x: f64, y: f64, heading: f64, fov: f64) -> Self {
        Self {
            x,
            y,
            heading,
            fov,
        }
    }

    /// Starting pose for the built-in arena: the middle of the big room, looking east.
    #[must_use]
    pub const fn arena_start() -> Self {
        Self::new(8.0, 8.0, 0.0, DEFAULT_FOV)
    }

    /// Starting pose for a generated maze.
    ///
    /// The entrance is cut into the top border at column 1, so the viewer stands in the middle of
    /// that cell facing south, into the maze.
    #[must_use]
    pub const fn maze_start() -> Self {
        Self::new(1.5, 0.5, FRAC_PI_2, DEFAULT_FOV)
    }

    /// Returns the same pose with a different field of view.
    #[must_use]
    pub const fn with_fov(self, fov: f64) -> Self {
        Self { fov, ..self }
    }

    /// Returns the heading wrapped into `[0, 2π)`.
    #[must_use]
    pub fn normalized_heading(&self) -> f64 {
        let wrapped = self.heading.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU {
            0.0
        } else {
            wrapped
        }
    }
}
