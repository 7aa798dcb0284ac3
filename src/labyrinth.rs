//! Procedural maze generation.
//!
//! This module carves a perfect maze out of a solid [`GridMap`]. Corridors only ever run between
//! lattice points, the cells whose coordinates are both odd, two cells at a time, which keeps a
//! wall between any two parallel corridors. The carver walks randomly from open lattice points
//! into unvisited ones and the sweep over the lattice repeats until nothing more can be carved, so
//! every lattice point ends up open and joined to the rest by exactly one path.

use std::{collections::TryReserveError, fmt};

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng as _};

use crate::{
    pose::Pose,
    world::{Cell, GridMap},
};

/// Smallest accepted side length for a generated maze.
pub const MIN_MAZE_SIDE: usize = 5;

/// Errors that prevent a maze from being generated.
#[derive(Debug)]
pub enum MazeError {
    /// The cell buffer could not be allocated.
    Allocation(TryReserveError),
    /// The requested size has no room for a carved interior.
    ///
    /// Both sides must be odd and at least [`MIN_MAZE_SIDE`] cells long.
    InvalidSize {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
}

impl fmt::Display for MazeError {
    #[expect(
        clippy::renamed_function_params,
        reason = "Single-letter identifiers are denied, so the trait's `f` cannot be kept."
    )]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(err) => write!(formatter, "failed to allocate maze cells: {err}"),
            Self::InvalidSize { width, height } => write!(
                formatter,
                "invalid maze size {width}x{height}: both sides must be odd and at least \
                 {MIN_MAZE_SIDE}"
            ),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Allocation(err) => Some(err),
            Self::InvalidSize { .. } => None,
        }
    }
}

impl From<TryReserveError> for MazeError {
    fn from(err: TryReserveError) -> Self {
        Self::Allocation(err)
    }
}

/// Compass direction the carver can extend a corridor in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards row 0.
    North,
    /// Towards the last column.
    East,
    /// Towards the last row.
    South,
    /// Towards column 0.
    West,
}

impl Direction {
    /// Every direction, in clockwise order starting from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the grid step taken by one cell of movement in this direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Returns the next direction clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Picks a direction uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..4_u8) {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }
}

/// Carve cursor state, alive only for the duration of one carve walk.
#[derive(Clone, Copy, Debug)]
struct Cursor {
    /// Current column.
    x: isize,
    /// Current row.
    y: isize,
    /// Direction the next trial will try.
    direction: Direction,
}

/// Randomised maze generator.
///
/// The generator owns its random source, so two generators built from equally seeded sources
/// produce identical mazes. A generator can be reused; each call to
/// [`generate`](MazeGenerator::generate) continues drawing from the same source.
#[derive(Debug)]
pub struct MazeGenerator<R> {
    /// Random source driving every direction choice.
    rng: R,
}

impl<R: Rng> MazeGenerator<R> {
    /// Builds a generator drawing from the given random source.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a maze of the given size.
    ///
    /// The result is fully wall-bordered except for an entrance at `(1, 0)` and an exit at
    /// `(width - 2, height - 1)`, and every open cell is reachable from the entrance through
    /// exactly one path. The returned pose stands inside the entrance looking into the maze.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - Either side is even or shorter than [`MIN_MAZE_SIDE`]
    /// - The cell buffer cannot be allocated
    pub fn generate(&mut self, width: usize, height: usize) -> Result<(GridMap, Pose), MazeError> {
        let invalid = MazeError::InvalidSize { width, height };
        if width < MIN_MAZE_SIDE
            || height < MIN_MAZE_SIDE
            || width.is_multiple_of(2)
            || height.is_multiple_of(2)
        {
            return Err(invalid);
        }

        let mut map = GridMap::try_filled(width, height, Cell::Wall)?;
        let (Ok(max_x), Ok(max_y)) = (isize::try_from(width), isize::try_from(height)) else {
            return Err(invalid);
        };

        // First corridor: (1, 1) down to the next lattice point.
        map.set(1, 1, Cell::Open);
        map.set(1, 2, Cell::Open);
        map.set(1, 3, Cell::Open);

        let mut passes = 0_usize;
        loop {
            passes += 1;
            let mut carved = false;
            for y in (1..max_y).step_by(2) {
                for x in (1..max_x).step_by(2) {
                    carved |= self.carve(&mut map, x, y);
                }
            }
            if !carved {
                break;
            }
        }

        map.set(1, 0, Cell::Open);
        map.set(max_x - 2, max_y - 1, Cell::Open);

        info!(
            "generated {width}x{height} maze with {} open cells in {passes} passes",
            map.open_count()
        );
        for y in 0..height {
            if let Some(row) = map.row_string(y) {
                debug!("row{y:2}: {row}");
            }
        }

        Ok((map, Pose::maze_start()))
    }

    /// Runs one carve walk starting at the lattice point `(x, y)`.
    ///
    /// The walk only starts from a lattice point that is already open, so every corridor it digs
    /// hangs off the existing tree. From the cursor it tries up to four directions, rotating
    /// clockwise from a random one; a direction succeeds when the cells one and two steps away are
    /// both interior walls, in which case both are opened and the cursor jumps two cells ahead
    /// with a fresh random direction. The walk ends after four failed trials in a row.
    ///
    /// Returns whether any cell was opened.
    fn carve(&mut self, map: &mut GridMap, x: isize, y: isize) -> bool {
        if map.is_wall(x, y) {
            return false;
        }

        let mut cursor = Cursor {
            x,
            y,
            direction: Direction::random(&mut self.rng),
        };
        let mut trials = 0;
        let mut carved = false;

        while trials < Direction::ALL.len() {
            let (dx, dy) = cursor.direction.offset();
            let (x1, y1) = (cursor.x + dx, cursor.y + dy);
            let (x2, y2) = (x1 + dx, y1 + dy);

            if is_interior(map, x1, y1)
                && is_interior(map, x2, y2)
                && map.is_wall(x1, y1)
                && map.is_wall(x2, y2)
            {
                map.set(x1, y1, Cell::Open);
                map.set(x2, y2, Cell::Open);
                cursor = Cursor {
                    x: x2,
                    y: y2,
                    direction: Direction::random(&mut self.rng),
                };
                trials = 0;
                carved = true;
            } else {
                cursor.direction = cursor.direction.clockwise();
                trials += 1;
            }
        }

        carved
    }
}

/// Checks that `(x, y)` is strictly inside the border ring of the map.
fn is_interior(map: &GridMap, x: isize, y: isize) -> bool {
    let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
        return false;
    };

    x > 0 && y > 0 && x + 1 < map.width() && y + 1 < map.height()
}

/// Generates a maze from an integer seed.
///
/// Equal seeds produce identical mazes for the same size.
///
/// # Errors
///
/// See [`MazeGenerator::generate`].
pub fn generate_maze(width: usize, height: usize, seed: u64) -> Result<(GridMap, Pose), MazeError> {
    MazeGenerator::new(StdRng::seed_from_u64(seed)).generate(width, height)
}
