//! Per-column draw records handed to the frame composer.
//!
//! The raycaster and shading functions never touch the terminal. This module folds their output
//! into plain records describing what each screen column should look like, and the UI layer copies
//! those records into the render target.

use crate::{
    raycast::RayHit,
    shading::{floor_shade, project_wall, wall_shade},
};

/// Everything needed to draw one screen column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSlice {
    /// Screen column, counted from the left edge of the view.
    pub column: u16,
    /// First row of the wall; rows above it are background.
    pub ceiling: u16,
    /// First row of floor below the wall.
    pub floor: u16,
    /// Shade level of the wall rows.
    pub wall_shade: u8,
    /// Shade level of every floor row, as `(row, level)` pairs in ascending row order.
    pub floor_shades: Vec<(u16, u8)>,
}

/// Builds the draw record for one column from its ray hit.
#[must_use]
pub fn compose_column(
    column: u16,
    hit: &RayHit,
    screen_height: u16,
    max_depth: f64,
    levels: u8,
) -> ColumnSlice {
    let span = project_wall(hit.distance, screen_height);

    ColumnSlice {
        column,
        ceiling: span.ceiling,
        floor: span.floor,
        wall_shade: wall_shade(hit.distance, max_depth, levels),
        floor_shades: (span.floor..screen_height)
            .map(|row| (row, floor_shade(row, screen_height, levels)))
            .collect(),
    }
}

/// Builds the draw records for a whole frame, one per hit, in column order.
#[must_use]
pub fn compose_frame(
    hits: &[RayHit],
    screen_height: u16,
    max_depth: f64,
    levels: u8,
) -> Vec<ColumnSlice> {
    (0_u16..)
        .zip(hits)
        .map(|(column, hit)| compose_column(column, hit, screen_height, max_depth, levels))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_close_wall() {
        let slice = compose_column(3, &RayHit::wall(1.0), 24, 25.0, 20);

        assert_eq!(slice.column, 3);
        assert_eq!(slice.ceiling, 0, "close wall starts at the top");
        assert_eq!(slice.floor, 24, "close wall reaches the bottom");
        assert_eq!(slice.wall_shade, 19, "close wall is brightest");
        assert!(slice.floor_shades.is_empty(), "no floor is visible");
    }

    #[test]
    fn test_compose_far_wall() {
        let slice = compose_column(0, &RayHit::wall(8.0), 24, 25.0, 20);

        assert_eq!(slice.ceiling, 9);
        assert_eq!(slice.floor, 15);
        assert_eq!(slice.wall_shade, 3);
        assert_eq!(slice.floor_shades.len(), 9, "rows 15..24 are floor");
        assert_eq!(slice.floor_shades.first(), Some(&(15, 4)));
        assert_eq!(slice.floor_shades.last(), Some(&(23, 17)));
    }

    #[test]
    fn test_compose_capped_ray_is_background() {
        let slice = compose_column(0, &RayHit::capped(25.0), 24, 25.0, 20);

        assert_eq!(slice.wall_shade, 0, "capped rays draw as background");
        assert!(slice.ceiling <= slice.floor, "span should be well formed");
    }

    #[test]
    fn test_compose_frame_keeps_order() {
        let hits = [RayHit::wall(1.0), RayHit::wall(4.0), RayHit::capped(25.0)];

        let slices = compose_frame(&hits, 30, 25.0, 20);

        let columns: Vec<u16> = slices.iter().map(|slice| slice.column).collect();
        assert_eq!(columns, vec![0, 1, 2], "columns should ascend");
        assert!(
            slices
                .windows(2)
                .all(|pair| matches!(pair, [near, far] if near.wall_shade >= far.wall_shade)),
            "further walls should not be brighter"
        );
    }
}
