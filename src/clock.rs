//! Frame rate measurement for the status line.

use std::time::{Duration, Instant};

/// Length of the window frames are counted over.
pub(crate) const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Frame counter reporting frames per second.
///
/// This structure counts rendered frames and, once a full [`FPS_WINDOW`] has elapsed, turns the
/// count into a rate and starts a new window. Nothing in the game logic reads it; it only feeds
/// the status line.
#[derive(Debug)]
pub(crate) struct FrameClock {
    /// Start of the current counting window.
    window_start: Instant,
    /// Frames counted in the current window.
    frames: u32,
    /// Rate measured over the last complete window.
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Creates a clock whose first window starts now.
    pub(crate) fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock whose first window starts at `start`.
    pub(crate) const fn starting_at(start: Instant) -> Self {
        Self {
            window_start: start,
            frames: 0,
            fps: 0,
        }
    }

    /// Records a frame finished now.
    pub(crate) fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Records a frame finished at `now`.
    pub(crate) fn tick_at(&mut self, now: Instant) {
        self.frames = self.frames.saturating_add(1);

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= FPS_WINDOW {
            let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
            let rate = u64::from(self.frames) * 1000 / millis.max(1);
            self.fps = u32::try_from(rate).unwrap_or(u32::MAX);
            self.frames = 0;
            self.window_start = now;
        }
    }

    /// Returns the rate measured over the last complete window.
    pub(crate) const fn fps(&self) -> u32 {
        self.fps
    }
}
