//! Game state for one play-through.

use crate::{
    composer::{compose_frame, ColumnSlice},
    movement::{apply_action, Action, MotionSettings},
    pose::Pose,
    raycast::{cast_frame, cast_frame_parallel, RayHit, RayMarch},
    world::GridMap,
};

/// Map and viewer state for one game.
///
/// The session owns the map and the pose that moves through it. Input is applied with
/// [`apply`](Session::apply) and each frame is rendered from the current state with
/// [`render`](Session::render), which never mutates anything, so one input step always completes
/// before the following render pass reads the pose.
#[derive(Clone, Debug)]
pub struct Session {
    /// Map being explored. Never changes once the session exists.
    map: GridMap,
    /// Current viewer pose.
    pose: Pose,
    /// Step sizes for movement, rotation and zoom.
    motion: MotionSettings,
}

/// Parameters for rendering one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    /// Ray marching depth and step.
    pub march: RayMarch,
    /// Number of shade levels for walls and floor.
    pub shades: u8,
    /// Whether to cast columns on the rayon thread pool.
    pub parallel: bool,
}

impl Session {
    /// Starts a session on `map` with the viewer at `pose`.
    #[must_use]
    pub const fn new(map: GridMap, pose: Pose, motion: MotionSettings) -> Self {
        Self { map, pose, motion }
    }

    /// Returns the map.
    #[must_use]
    pub const fn map(&self) -> &GridMap {
        &self.map
    }

    /// Returns the current pose.
    #[must_use]
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Applies a player action to the pose.
    ///
    /// Returns `true` when the action asks to leave the game.
    pub fn apply(&mut self, action: Action) -> bool {
        self.pose = apply_action(&self.pose, action, &self.map, &self.motion);

        action == Action::Quit
    }

    /// Casts one ray per column from the current pose.
    #[must_use]
    pub fn cast(&self, columns: u16, settings: &RenderSettings) -> Vec<RayHit> {
        if settings.parallel {
            cast_frame_parallel(&self.pose, columns, &self.map, settings.march)
        } else {
            cast_frame(&self.pose, columns, &self.map, settings.march)
        }
    }

    /// Produces the draw records for a `columns` by `rows` view.
    #[must_use]
    pub fn render(&self, columns: u16, rows: u16, settings: &RenderSettings) -> Vec<ColumnSlice> {
        let hits = self.cast(columns, settings);

        compose_frame(&hits, rows, settings.march.max_depth(), settings.shades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{labyrinth::generate_maze, shading::DEFAULT_SHADES};

    /// Builds default render settings.
    fn render_settings(parallel: bool) -> RenderSettings {
        RenderSettings {
            march: RayMarch::default(),
            shades: DEFAULT_SHADES,
            parallel,
        }
    }

    #[test]
    fn test_apply_moves_pose() {
        let mut session = Session::new(
            GridMap::arena(),
            Pose::arena_start(),
            MotionSettings::default(),
        );

        let quit = session.apply(Action::MoveForward);

        assert!(!quit, "moving should not quit");
        assert!(
            (session.pose().x - 8.5).abs() < 1e-12,
            "arena start should step east"
        );
    }

    #[test]
    fn test_apply_quit() {
        let mut session = Session::new(
            GridMap::arena(),
            Pose::arena_start(),
            MotionSettings::default(),
        );
        let before = *session.pose();

        assert!(session.apply(Action::Quit), "quit should be reported");
        assert_eq!(*session.pose(), before, "quit should not move the pose");
    }

    #[test]
    fn test_walk_into_maze() {
        let (map, pose) = generate_maze(11, 11, 8).expect("maze should generate");
        let mut session = Session::new(map, pose, MotionSettings::default());

        // The cell below the entrance is always open.
        let _ = session.apply(Action::MoveForward);
        let _ = session.apply(Action::MoveForward);

        assert!(
            (session.pose().y - 1.5).abs() < 1e-9,
            "two steps south should reach row 1"
        );
        assert!(!session.map().is_wall_at(session.pose().x, session.pose().y));
    }

    #[test]
    fn test_render_dimensions() {
        let session = Session::new(
            GridMap::arena(),
            Pose::arena_start(),
            MotionSettings::default(),
        );

        let slices = session.render(64, 20, &render_settings(false));

        assert_eq!(slices.len(), 64, "one slice per column");
        assert!(
            slices
                .iter()
                .all(|slice| slice.ceiling <= slice.floor && slice.floor <= 20),
            "every slice should fit the view"
        );
    }

    #[test]
    fn test_parallel_render_matches() {
        let session = Session::new(
            GridMap::arena(),
            Pose::arena_start(),
            MotionSettings::default(),
        );

        assert_eq!(
            session.render(50, 30, &render_settings(false)),
            session.render(50, 30, &render_settings(true)),
            "parallel rendering should not change the frame"
        );
    }
}
