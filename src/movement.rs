//! Player actions and collision handling.

use std::f64::consts::PI;

use crate::{pose::Pose, world::GridMap};

/// Default distance covered by one translation action.
pub const DEFAULT_MOVE_SPEED: f64 = 0.5;

/// Default heading change of one rotation action.
pub const DEFAULT_TURN_STEP: f64 = PI / 32.0;

/// Default field of view change of one widen or narrow action.
pub const DEFAULT_FOV_STEP: f64 = PI / 32.0;

/// Narrowest field of view the player can zoom into.
pub const MIN_FOV: f64 = 0.05 * PI;

/// Widest field of view the player can zoom out to.
pub const MAX_FOV: f64 = 0.95 * PI;

/// Discrete player input, already decoded from whatever produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Step along the heading.
    MoveForward,
    /// Step against the heading.
    MoveBackward,
    /// Step to the left of the heading without turning.
    StrafeLeft,
    /// Step to the right of the heading without turning.
    StrafeRight,
    /// Turn counter-clockwise on screen.
    RotateLeft,
    /// Turn clockwise on screen.
    RotateRight,
    /// Widen the field of view.
    WidenFov,
    /// Narrow the field of view.
    NarrowFov,
    /// Leave the game. Does not change the pose.
    Quit,
}

/// Step sizes used when applying actions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSettings {
    /// Distance covered by one translation.
    pub move_speed: f64,
    /// Heading change of one rotation, in radians.
    pub turn_step: f64,
    /// Field of view change of one widen or narrow action, in radians.
    pub fov_step: f64,
    /// Lower field of view bound.
    pub min_fov: f64,
    /// Upper field of view bound.
    pub max_fov: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            turn_step: DEFAULT_TURN_STEP,
            fov_step: DEFAULT_FOV_STEP,
            min_fov: MIN_FOV,
            max_fov: MAX_FOV,
        }
    }
}

/// Applies one action to a pose and returns the resulting pose.
///
/// Translations compute a candidate position and only take it if the cell under the candidate is
/// open; otherwise the pose comes back untouched, with no sliding along the wall. Rotations keep
/// the heading in `[0, 2π)` and field of view changes are clamped to the configured range.
#[must_use]
pub fn apply_action(
    pose: &Pose,
    action: Action,
    map: &GridMap,
    settings: &MotionSettings,
) -> Pose {
    let (sin, cos) = pose.heading.sin_cos();
    let speed = settings.move_speed;

    let (dx, dy) = match action {
        Action::MoveForward => (speed * cos, speed * sin),
        Action::MoveBackward => (-speed * cos, -speed * sin),
        Action::StrafeLeft => (speed * sin, -speed * cos),
        Action::StrafeRight => (-speed * sin, speed * cos),
        Action::RotateLeft => return turn(pose, -settings.turn_step),
        Action::RotateRight => return turn(pose, settings.turn_step),
        Action::WidenFov => return zoom(pose, settings.fov_step, settings),
        Action::NarrowFov => return zoom(pose, -settings.fov_step, settings),
        Action::Quit => return *pose,
    };

    let (x, y) = (pose.x + dx, pose.y + dy);
    if map.is_wall_at(x, y) {
        *pose
    } else {
        Pose { x, y, ..*pose }
    }
}

/// Rotates the pose by `delta` radians.
fn turn(pose: &Pose, delta: f64) -> Pose {
    let turned = Pose {
        heading: pose.heading + delta,
        ..*pose
    };

    Pose {
        heading: turned.normalized_heading(),
        ..turned
    }
}

/// Changes the field of view by `delta` radians within the configured bounds.
fn zoom(pose: &Pose, delta: f64, settings: &MotionSettings) -> Pose {
    pose.with_fov((pose.fov + delta).clamp(settings.min_fov, settings.max_fov))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

    use super::*;
    use crate::world::bordered_room;

    /// Asserts two poses are numerically identical, bit for bit.
    fn assert_same_pose(left: &Pose, right: &Pose) {
        assert_eq!(left.x.to_bits(), right.x.to_bits(), "x differs");
        assert_eq!(left.y.to_bits(), right.y.to_bits(), "y differs");
        assert_eq!(left.heading.to_bits(), right.heading.to_bits(), "heading differs");
        assert_eq!(left.fov.to_bits(), right.fov.to_bits(), "fov differs");
    }

    #[test]
    fn test_forward_into_wall_is_rejected() {
        let map = bordered_room(5, 5);
        let pose = Pose::new(3.7, 2.5, 0.0, FRAC_PI_4);

        let moved = apply_action(&pose, Action::MoveForward, &map, &MotionSettings::default());

        assert_same_pose(&moved, &pose);
    }

    #[test]
    fn test_forward_into_open_cell() {
        let map = bordered_room(5, 5);
        let pose = Pose::new(1.5, 2.5, 0.0, FRAC_PI_4);

        let moved = apply_action(&pose, Action::MoveForward, &map, &MotionSettings::default());

        assert!((moved.x - 2.0).abs() < 1e-12, "x should advance by the speed");
        assert!((moved.y - 2.5).abs() < 1e-12, "y should not change");
    }

    #[test]
    fn test_backward_reverses_forward() {
        let map = bordered_room(7, 7);
        let settings = MotionSettings::default();
        let pose = Pose::new(3.5, 3.5, 0.7, FRAC_PI_4);

        let forward = apply_action(&pose, Action::MoveForward, &map, &settings);
        let back = apply_action(&forward, Action::MoveBackward, &map, &settings);

        assert!((back.x - pose.x).abs() < 1e-12, "x should return");
        assert!((back.y - pose.y).abs() < 1e-12, "y should return");
    }

    #[test]
    fn test_strafe_is_perpendicular() {
        let map = bordered_room(7, 7);
        let settings = MotionSettings::default();
        let pose = Pose::new(3.5, 3.5, 0.0, FRAC_PI_4);

        let left = apply_action(&pose, Action::StrafeLeft, &map, &settings);
        let right = apply_action(&pose, Action::StrafeRight, &map, &settings);

        // Facing east with y growing downwards, left is north.
        assert!((left.y - 3.0).abs() < 1e-12, "strafing left should move north");
        assert!((left.x - 3.5).abs() < 1e-12, "strafing should not move along the heading");
        assert!((right.y - 4.0).abs() < 1e-12, "strafing right should move south");
    }

    #[test]
    fn test_walking_never_enters_walls() {
        let map = bordered_room(9, 6);
        let settings = MotionSettings::default();
        let mut pose = Pose::new(1.5, 1.5, 0.4, FRAC_PI_4);

        for _ in 0..100 {
            pose = apply_action(&pose, Action::MoveForward, &map, &settings);
            assert!(!map.is_wall_at(pose.x, pose.y), "pose entered a wall at {pose:?}");
        }
    }

    #[test]
    fn test_rotation_wraps() {
        let map = bordered_room(5, 5);
        let settings = MotionSettings {
            turn_step: FRAC_PI_2,
            ..MotionSettings::default()
        };
        let pose = Pose::new(2.5, 2.5, 0.0, FRAC_PI_4);

        let left = apply_action(&pose, Action::RotateLeft, &map, &settings);
        assert!(
            (left.heading - 3.0 * FRAC_PI_2).abs() < 1e-12,
            "turning left from 0 should wrap to 3 pi / 2"
        );

        let mut spun = pose;
        for _ in 0..4 {
            spun = apply_action(&spun, Action::RotateRight, &map, &settings);
            assert!((0.0..TAU).contains(&spun.heading), "heading should stay in [0, 2 pi)");
        }
        assert!(
            spun.heading.abs() < 1e-9 || (spun.heading - TAU).abs() < 1e-9,
            "four quarter turns should come back around"
        );
        assert!((spun.x - pose.x).abs() < f64::EPSILON, "turning should not move");
    }

    #[test]
    fn test_fov_is_clamped() {
        let map = bordered_room(5, 5);
        let settings = MotionSettings::default();
        let mut pose = Pose::new(2.5, 2.5, 0.0, FRAC_PI_4);

        for _ in 0..100 {
            pose = apply_action(&pose, Action::WidenFov, &map, &settings);
        }
        assert!((pose.fov - MAX_FOV).abs() < 1e-12, "fov should stop at the maximum");

        for _ in 0..100 {
            pose = apply_action(&pose, Action::NarrowFov, &map, &settings);
        }
        assert!((pose.fov - MIN_FOV).abs() < 1e-12, "fov should stop at the minimum");
    }

    #[test]
    fn test_fov_step() {
        let map = bordered_room(5, 5);
        let settings = MotionSettings::default();
        let pose = Pose::new(2.5, 2.5, 0.0, FRAC_PI_4);

        let wider = apply_action(&pose, Action::WidenFov, &map, &settings);

        assert!(
            (wider.fov - (FRAC_PI_4 + DEFAULT_FOV_STEP)).abs() < 1e-12,
            "fov should grow by one step"
        );
    }

    #[test]
    fn test_quit_keeps_pose() {
        let map = bordered_room(5, 5);
        let pose = Pose::new(2.5, 2.5, 1.0, FRAC_PI_4);

        let after = apply_action(&pose, Action::Quit, &map, &MotionSettings::default());

        assert_same_pose(&after, &pose);
    }
}
