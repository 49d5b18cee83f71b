//! The 3x3 region tiling of the map
//!
//! The playable grid is tiled by 9 fixed rectangles of 26x8 cells,
//! numbered 1-9 row-major from the top left. Every room lies inside
//! exactly one region; a cell's region is derived from its coordinates,
//! never stored.

use crate::{NUM_REGIONS, REGION_H, REGION_W};

use super::Direction;

/// Region containing the given coordinate, 1..=9.
///
/// Coordinates outside the playable interior are clamped onto the tiling.
pub fn region_of(x: i8, y: i8) -> u8 {
    let col = (x.max(1) as u32).div_ceil(REGION_W as u32).clamp(1, 3);
    let row = (y.max(1) as u32).div_ceil(REGION_H as u32).clamp(1, 3);
    (col + (row - 1) * 3) as u8
}

/// Bounding box of a region by number: (top-left, bottom-right), inclusive
pub fn bounds_of(region: u8) -> ((i8, i8), (i8, i8)) {
    debug_assert!((1..=NUM_REGIONS).contains(&region));
    let col = (region - 1) % 3;
    let row = (region - 1) / 3;
    let x0 = col as i8 * REGION_W + 1;
    let y0 = row as i8 * REGION_H + 1;
    ((x0, y0), (x0 + REGION_W - 1, y0 + REGION_H - 1))
}

/// Bounding box of the region containing the given coordinate
pub fn bounds(x: i8, y: i8) -> ((i8, i8), (i8, i8)) {
    bounds_of(region_of(x, y))
}

/// Check whether rooms in this region may carry a door on the given side.
///
/// Only interior-facing walls are eligible: a north doorway from a
/// top-row region would open onto the map edge.
pub fn allows_door(region: u8, side: Direction) -> bool {
    let col = (region - 1) % 3; // 0..=2, left to right
    match side {
        Direction::North => region >= 4,
        Direction::South => region <= 6,
        Direction::East => col < 2,
        Direction::West => col > 0,
        Direction::None => false,
    }
}
