//! Per-column ray marching.
//!
//! Every screen column gets one ray, fanned evenly across the viewer's field of view. A ray walks
//! forward in fixed steps and samples the grid cell under its tip until it lands in a wall, leaves
//! the map, or runs out of depth.

use color_eyre::eyre::{ensure, Result};
use rayon::iter::{IntoParallelIterator as _, ParallelIterator as _};

use crate::{
    pose::Pose,
    world::{grid_coord, Cell, GridMap},
};

/// Default maximum distance a ray travels.
pub const DEFAULT_MAX_DEPTH: f64 = 25.0;

/// Default distance a ray advances per sample.
pub const DEFAULT_STEP: f64 = 0.1;

/// Outcome of marching a single ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance travelled along the ray, never negative.
    pub distance: f64,
    /// Whether the ray stopped inside a wall cell.
    pub hit_wall: bool,
    /// Whether the ray gave up at the maximum depth or at the map edge.
    ///
    /// A capped ray reports the maximum depth as its distance and is drawn as open background.
    pub capped: bool,
}

impl RayHit {
    /// Builds the result of a ray that struck a wall.
    #[must_use]
    pub const fn wall(distance: f64) -> Self {
        Self {
            distance,
            hit_wall: true,
            capped: false,
        }
    }

    /// Builds the result of a ray that found nothing before `max_depth`.
    #[must_use]
    pub const fn capped(max_depth: f64) -> Self {
        Self {
            distance: max_depth,
            hit_wall: false,
            capped: true,
        }
    }
}

/// Ray marching parameters.
///
/// The step size trades accuracy for cost: a smaller step samples more often and is less likely
/// to skip over the corner of a thin wall, at the price of more samples per column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayMarch {
    /// Distance after which a ray is capped.
    max_depth: f64,
    /// Distance advanced between two samples.
    step: f64,
}

impl Default for RayMarch {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            step: DEFAULT_STEP,
        }
    }
}

impl RayMarch {
    /// Builds marching parameters.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - Either value is not finite or not strictly positive
    /// - The step is not shorter than the maximum depth
    pub fn new(max_depth: f64, step: f64) -> Result<Self> {
        ensure!(
            max_depth.is_finite() && max_depth > 0.0,
            "max depth must be a positive number, got {max_depth}"
        );
        ensure!(
            step.is_finite() && step > 0.0,
            "march step must be a positive number, got {step}"
        );
        ensure!(
            step < max_depth,
            "march step {step} must be shorter than the max depth {max_depth}"
        );

        Ok(Self { max_depth, step })
    }

    /// Returns the maximum depth.
    #[must_use]
    pub const fn max_depth(&self) -> f64 {
        self.max_depth
    }

    /// Returns the step size.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples needed to cover the maximum depth.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Both values are validated positive, and `as` saturates on absurd ratios."
    )]
    fn sample_count(self) -> u32 {
        (self.max_depth / self.step).ceil() as u32
    }
}

/// Angle of the ray cast through `column` out of `column_count` columns.
///
/// Column 0 looks along the left edge of the field of view; the right edge itself belongs to the
/// column one past the last.
#[must_use]
pub fn ray_angle(pose: &Pose, column: u16, column_count: u16) -> f64 {
    let fraction = f64::from(column) / f64::from(column_count.max(1));

    fraction.mul_add(pose.fov, pose.heading - pose.fov / 2.0)
}

/// Marches the ray for one screen column.
///
/// The ray starts at the pose, advances one step before the first sample and keeps going until it
/// samples a wall cell, samples a cell outside the map, or reaches the maximum depth. Leaving the
/// map and running out of depth both produce a capped hit. The result depends only on the inputs.
#[must_use]
pub fn cast_column(
    pose: &Pose,
    column: u16,
    column_count: u16,
    map: &GridMap,
    march: RayMarch,
) -> RayHit {
    let (dir_y, dir_x) = ray_angle(pose, column, column_count).sin_cos();

    for sample in 1..=march.sample_count() {
        let distance = march.step * f64::from(sample);
        if distance >= march.max_depth {
            break;
        }

        let x = grid_coord(dir_x.mul_add(distance, pose.x));
        let y = grid_coord(dir_y.mul_add(distance, pose.y));
        match map.cell(x, y) {
            Some(Cell::Wall) => return RayHit::wall(distance),
            Some(Cell::Open) => {}
            None => return RayHit::capped(march.max_depth),
        }
    }

    RayHit::capped(march.max_depth)
}

/// Casts every column of a frame, in ascending column order.
#[must_use]
pub fn cast_frame(pose: &Pose, column_count: u16, map: &GridMap, march: RayMarch) -> Vec<RayHit> {
    (0..column_count)
        .map(|column| cast_column(pose, column, column_count, map, march))
        .collect()
}

/// Casts every column of a frame on the rayon thread pool.
///
/// Columns share no mutable state, so the result is identical to [`cast_frame`].
#[must_use]
pub fn cast_frame_parallel(
    pose: &Pose,
    column_count: u16,
    map: &GridMap,
    march: RayMarch,
) -> Vec<RayHit> {
    (0..column_count)
        .into_par_iter()
        .map(|column| cast_column(pose, column, column_count, map, march))
        .collect()
}
