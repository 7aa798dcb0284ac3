//! Distance and screen-position shading.
//!
//! Shade levels are brightness indices: level 0 is the darkest, background shade and
//! `levels - 1` the brightest. Walls darken in bands as they recede; the floor brightens from the
//! horizon towards the bottom of the screen regardless of what the rays hit.

/// Default number of shade levels for walls and floor.
pub const DEFAULT_SHADES: u8 = 20;

/// Picks the shade level for a wall at `distance`.
///
/// Level `L` covers distances below `max_depth / L`, so bands get narrower as walls approach
/// the viewer. The brightest level that still covers the distance wins; a distance of
/// `max_depth` or more falls through to the background level 0. The result always equals
/// scanning `L = levels - 1, ..., 1` for the first `distance < max_depth / L`, so a distance
/// exactly on a band edge belongs to the darker band.
#[must_use]
pub fn wall_shade(distance: f64, max_depth: f64, levels: u8) -> u8 {
    let brightest = levels.saturating_sub(1);
    if distance.is_nan() || max_depth.is_nan() {
        return 0;
    }
    if distance <= 0.0 {
        return brightest;
    }

    // Largest integer strictly below max_depth / distance.
    let mut level = clamp_level((max_depth / distance).ceil() - 1.0, brightest);

    // The division can round across an exact band edge; settle on the band the scan picks.
    while level < brightest && distance < max_depth / f64::from(level + 1) {
        level += 1;
    }
    while level > 0 && distance >= max_depth / f64::from(level) {
        level -= 1;
    }

    level
}

/// Picks the shade level for a floor cell on `row` of a screen `screen_height` rows tall.
///
/// Rows at or above the horizon map to 0 and the bottom row approaches the brightest level,
/// increasing linearly in between.
#[must_use]
pub fn floor_shade(row: u16, screen_height: u16, levels: u8) -> u8 {
    if screen_height == 0 {
        return 0;
    }

    let half = f64::from(screen_height) / 2.0;
    let below_horizon = (f64::from(row) - half) / half;
    let brightest = levels.saturating_sub(1);

    clamp_level((below_horizon * f64::from(brightest)).floor(), brightest)
}

/// Rows covered by a projected wall slice.
///
/// The wall occupies rows `ceiling..floor`; rows above it are sky, rows from `floor` down are
/// floor. The slice is always centred on the horizon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallSpan {
    /// First row of the wall.
    pub ceiling: u16,
    /// First row below the wall.
    pub floor: u16,
}

impl WallSpan {
    /// Number of rows covered by the wall.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.floor.saturating_sub(self.ceiling)
    }
}

/// Projects a wall at `distance` onto a screen `screen_height` rows tall.
///
/// The ceiling row is `h / 2 - h / distance`, truncated and clamped at 0, and the floor row
/// mirrors it around the horizon. A distance of zero or less fills the whole column.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is clamped to [0, screen_height] before the cast."
)]
pub fn project_wall(distance: f64, screen_height: u16) -> WallSpan {
    let height = f64::from(screen_height);
    let ceiling = if distance > 0.0 {
        (height / 2.0 - height / distance)
            .trunc()
            .clamp(0.0, height / 2.0) as u16
    } else {
        0
    };

    WallSpan {
        ceiling,
        floor: screen_height - ceiling,
    }
}

/// Clamps a fractional band index into `[0, brightest]`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is clamped to the u8 range before the cast."
)]
fn clamp_level(band: f64, brightest: u8) -> u8 {
    band.clamp(0.0, f64::from(brightest)) as u8
}
