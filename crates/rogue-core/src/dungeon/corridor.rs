//! Corridor resolution: connecting every dead-end stub into one hallway
//! network
//!
//! Each pass prunes stubs that are already connected, then tries to carve
//! from each remaining stub toward an existing corridor along its forward
//! heading or either perpendicular. A stub that finds nothing grows by one
//! cell and the pass restarts. Local rules alone do not prove termination,
//! so the total pass count is capped and exhaustion surfaces as an error;
//! the level builder treats that as a rejected level and regenerates.

use crate::MAX_RESOLVER_PASSES;

use super::generation::GenerationError;
use super::{Direction, Level, Terrain};

/// Drain the level's dead-end table, carving corridors until every stub is
/// connected
pub fn resolve_dead_ends(level: &mut Level) -> Result<(), GenerationError> {
    resolve_bounded(level, MAX_RESOLVER_PASSES)
}

fn resolve_bounded(level: &mut Level, pass_cap: u32) -> Result<(), GenerationError> {
    let mut passes = 0;
    while !level.dead_ends.is_empty() {
        passes += 1;
        if passes > pass_cap {
            return Err(GenerationError::UnresolvedDeadEnds {
                remaining: level.dead_ends.len(),
                passes: pass_cap,
            });
        }
        run_pass(level);
    }
    Ok(())
}

/// One resolver pass. Returns after the first stub extension, because the
/// table was mutated mid-iteration.
fn run_pass(level: &mut Level) {
    prune_connected(level);

    for ((x, y), dir) in level.dead_ends.snapshot_rev() {
        if !level.dead_ends.contains((x, y)) {
            continue;
        }
        if dir == Direction::None {
            level.dead_ends.remove((x, y));
            continue;
        }

        // forward first, then both perpendicular turns; all three are
        // attempted and more than one may carve
        let candidates = [dir, dir.turn_left(), dir.turn_right()];
        let mut resolved = false;
        for d in candidates {
            if ray_carve(level, (x, y), d) {
                resolved = true;
            }
        }
        if resolved {
            level.dead_ends.remove((x, y));
            continue;
        }

        // nothing reachable: grow the stub one cell and restart the pass
        if extend_stub(level, (x, y), dir, candidates) {
            return;
        }

        // fully enclosed by non-blank terrain; nothing left to connect to
        level.dead_ends.remove((x, y));
    }
}

/// Remove stubs that already touch the network: a second incident corridor
/// or door proves the cell is no hanging end
fn prune_connected(level: &mut Level) {
    let connected: Vec<(i8, i8)> = level
        .dead_ends
        .iter()
        .map(|&(coord, _)| coord)
        .filter(|&(x, y)| {
            level.count_adjacent(x, y, Terrain::Door) > 1
                || level.count_adjacent(x, y, Terrain::Corridor) > 1
        })
        .collect();
    for coord in connected {
        level.dead_ends.remove(coord);
    }
}

/// Scan outward from the stub, skipping blanks, and carve a straight
/// corridor if the first non-blank cell found is a corridor.
///
/// The carve stops short of the target as soon as a newly placed cell
/// touches more than one existing corridor, which keeps hallways from
/// doubling up.
fn ray_carve(level: &mut Level, from: (i8, i8), dir: Direction) -> bool {
    let (mut tx, mut ty) = dir.step(from.0, from.1);
    while level.in_bounds(tx, ty) && level.terrain(tx, ty) == Terrain::Blank {
        (tx, ty) = dir.step(tx, ty);
    }
    if !level.in_bounds(tx, ty) || level.terrain(tx, ty) != Terrain::Corridor {
        return false;
    }

    let (mut cx, mut cy) = dir.step(from.0, from.1);
    while (cx, cy) != (tx, ty) {
        level.set_terrain(cx, cy, Terrain::Corridor);
        if level.count_adjacent(cx, cy, Terrain::Corridor) > 1 {
            break;
        }
        (cx, cy) = dir.step(cx, cy);
    }
    true
}

/// Convert the first blank neighbor (forward, then either turn) into a new
/// stub inheriting the old heading
fn extend_stub(
    level: &mut Level,
    from: (i8, i8),
    dir: Direction,
    candidates: [Direction; 3],
) -> bool {
    for d in candidates {
        let (nx, ny) = d.step(from.0, from.1);
        if level.in_bounds(nx, ny) && level.terrain(nx, ny) == Terrain::Blank {
            level.set_terrain(nx, ny, Terrain::Corridor);
            level.dead_ends.remove(from);
            level.dead_ends.insert((nx, ny), dir);
            return true;
        }
    }
    false
}
