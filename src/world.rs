//! Grid map data and queries.
//!
//! This module contains the [`GridMap`] struct holding the flat cell array the raycaster marches
//! through, along with the built-in arena map and the text format used to describe static maps.

use std::{
    collections::{TryReserveError, VecDeque},
    fmt,
};

use color_eyre::eyre::{ensure, OptionExt as _, Result};

/// Byte used to mark a wall cell in the text representation of a map.
pub const WALL_BYTE: u8 = b'#';

/// Byte used to mark an open cell when a map is printed back as text.
pub const OPEN_BYTE: u8 = b'.';

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Solid cell that stops rays and blocks movement.
    Wall,
    /// Walkable cell that rays pass through.
    Open,
}

impl Cell {
    /// Maps a byte of the text map format to a cell.
    ///
    /// Only [`WALL_BYTE`] produces a wall; every other byte is treated as floor so that maps
    /// written with `.`, spaces or digits all load the same way.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        if byte == WALL_BYTE {
            Self::Wall
        } else {
            Self::Open
        }
    }

    /// Returns the byte used when printing the cell.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Wall => WALL_BYTE,
            Self::Open => OPEN_BYTE,
        }
    }
}

/// Two-dimensional map of wall and open cells.
///
/// This structure stores the cells row-major in a single vector, so the cell at `(x, y)` lives at
/// index `y * width + x`. It is built once, either from a literal, from a file or by the maze
/// generator, and is not mutated by the game afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    /// Number of columns in the map.
    width: usize,
    /// Number of rows in the map.
    height: usize,
    /// Row-major cell storage of length `width * height`.
    cells: Vec<Cell>,
}

impl Default for GridMap {
    fn default() -> Self {
        Self::arena()
    }
}

impl GridMap {
    /// Allocates a map of the given size with every cell set to `fill`.
    ///
    /// The buffer is reserved fallibly so that a map too large for memory is reported to the caller
    /// instead of aborting the process. An area that overflows `usize` saturates and fails the
    /// reservation the same way.
    ///
    /// # Errors
    ///
    /// This function returns a [`TryReserveError`] if the cell buffer cannot be allocated.
    pub fn try_filled(width: usize, height: usize, fill: Cell) -> Result<Self, TryReserveError> {
        let area = width.saturating_mul(height);
        let mut cells = Vec::new();
        cells.try_reserve_exact(area)?;
        cells.resize(area, fill);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parses a map from rows of text.
    ///
    /// Each row must have the same length, the map must be at least 3x3, and every cell on the
    /// outer border must be a wall so that neither rays nor the player can leave through an edge.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - There are fewer than three rows or columns
    /// - Rows have different lengths
    /// - A border cell is not a wall
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let first = rows.first().ok_or_eyre("map has no rows")?;
        let width = first.as_ref().len();
        let height = rows.len();

        ensure!(
            width >= 3 && height >= 3,
            "map must be at least 3x3, got {width}x{height}"
        );

        let mut cells = Vec::with_capacity(width * height);
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            ensure!(
                row.len() == width,
                "row {row_idx} has length {} but the map is {width} wide",
                row.len()
            );

            for (col_idx, byte) in row.bytes().enumerate() {
                let cell = Cell::from_byte(byte);
                let is_edge =
                    row_idx == 0 || row_idx == height - 1 || col_idx == 0 || col_idx == width - 1;
                ensure!(
                    !is_edge || cell == Cell::Wall,
                    "border cell ({col_idx}, {row_idx}) is not a wall"
                );
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds the fixed 20x20 arena map.
    ///
    /// The arena is a single large room split by two partial walls and is the map offered next to
    /// the generated maze in the main menu.
    #[must_use]
    pub fn arena() -> Self {
        let cells = ARENA
            .iter()
            .flat_map(|row| row.bytes())
            .map(Cell::from_byte)
            .collect();

        Self {
            width: ARENA_SIZE,
            height: ARENA_SIZE,
            cells,
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major cell slice.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Converts signed grid coordinates into an index into the cell vector.
    ///
    /// Returns `None` for any coordinate outside `[0, width) x [0, height)`, negative values
    /// included, so no caller can read a neighbouring row by overflowing a column.
    #[must_use]
    pub fn index(&self, x: isize, y: isize) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;

        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Returns the cell at the given coordinates, or `None` if they are out of bounds.
    #[must_use]
    pub fn cell(&self, x: isize, y: isize) -> Option<Cell> {
        self.index(x, y)
            .and_then(|index| self.cells.get(index))
            .copied()
    }

    /// Checks whether the cell at `(x, y)` is a wall.
    ///
    /// Out-of-bounds coordinates count as walls. This is the safe default for both collision
    /// checks and ray marching.
    #[must_use]
    pub fn is_wall(&self, x: isize, y: isize) -> bool {
        !matches!(self.cell(x, y), Some(Cell::Open))
    }

    /// Checks whether the continuous map-space point `(x, y)` lies inside a wall cell.
    #[must_use]
    pub fn is_wall_at(&self, x: f64, y: f64) -> bool {
        self.is_wall(grid_coord(x), grid_coord(y))
    }

    /// Overwrites a single cell. Out-of-bounds writes are ignored.
    pub(crate) fn set(&mut self, x: isize, y: isize, cell: Cell) {
        if let Some(slot) = self
            .index(x, y)
            .and_then(|index| self.cells.get_mut(index))
        {
            *slot = cell;
        }
    }

    /// Returns a row rendered in the text map format, or `None` past the last row.
    #[must_use]
    pub fn row_string(&self, y: usize) -> Option<String> {
        let start = y.checked_mul(self.width)?;
        let row = self.cells.get(start..start + self.width)?;

        Some(row.iter().map(|cell| char::from(cell.as_byte())).collect())
    }

    /// Counts the open cells in the map.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Open)
            .count()
    }

    /// Counts the open cells reachable from `(x, y)` through 4-way open adjacency.
    ///
    /// Returns zero when the starting cell is itself a wall or out of bounds.
    #[must_use]
    pub fn reachable_from(&self, x: isize, y: isize) -> usize {
        let Some(start) = self.index(x, y) else {
            return 0;
        };
        if self.is_wall(x, y) {
            return 0;
        }

        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([(x, y)]);
        let mut count = 0;
        if let Some(seen) = visited.get_mut(start) {
            *seen = true;
        }

        while let Some((cx, cy)) = queue.pop_front() {
            count += 1;

            for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
                let (nx, ny) = (cx + dx, cy + dy);
                if self.is_wall(nx, ny) {
                    continue;
                }
                let Some(seen) = self.index(nx, ny).and_then(|index| visited.get_mut(index))
                else {
                    continue;
                };
                if !*seen {
                    *seen = true;
                    queue.push_back((nx, ny));
                }
            }
        }

        count
    }
}

impl fmt::Display for GridMap {
    #[expect(
        clippy::renamed_function_params,
        reason = "Single-letter identifiers are denied, so the trait's `f` cannot be kept."
    )]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if let Some(row) = self.row_string(y) {
                writeln!(formatter, "{row}")?;
            }
        }

        Ok(())
    }
}

/// Converts a continuous map-space coordinate into the grid coordinate of the cell containing it.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Map coordinates are small; `as` saturates on anything that is not, which lands out of bounds."
)]
pub(crate) const fn grid_coord(value: f64) -> isize {
    value.floor() as isize
}

/// Builds a wall-bordered map with an open interior.
#[cfg(test)]
pub(crate) fn bordered_room(width: usize, height: usize) -> GridMap {
    let rows: Vec<String> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();

    GridMap::from_rows(&rows).expect("room should be a valid map")
}

/// Side length of the built-in arena.
const ARENA_SIZE: usize = 20;

/// Built-in arena layout.
const ARENA: [&str; ARENA_SIZE] = [
    "####################",
    "#..................#",
    "#..................#",
    "#..................#",
    "###############....#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..........#########",
    "#..........#.......#",
    "#..................#",
    "#..........#.......#",
    "#..........#.......#",
    "####################",
];
