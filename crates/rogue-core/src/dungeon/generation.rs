//! Level construction: the regenerate-until-valid loop
//!
//! A build pass carves rooms, resolves dead ends into corridors, and
//! drops one stairway. A cheap connectivity heuristic then samples grid
//! lines straddling the region-row and region-column boundaries; a line
//! with a single distinct glyph means a structural gap runs straight
//! through the map, and the whole grid is discarded and rebuilt.

use std::collections::HashSet;

use thiserror::Error;

use crate::{GameRng, MAX_LEVEL_RETRIES, MAX_X, MAX_Y, MIN_X, MIN_Y};

use super::corridor::resolve_dead_ends;
use super::room::build_rooms;
use super::{ItemCatalog, Level, Terrain};

/// Sampled rows straddling the top/middle region-row boundary
const ROW_BAND: [i8; 4] = [7, 8, 9, 10];
/// Sampled columns straddling the left/middle region-column boundary
const COL_BAND: [i8; 4] = [25, 26, 27, 28];

/// Level generation failures.
///
/// Probabilistic retry loops are bounded, so pathological RNG streams
/// fail loudly instead of hanging.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("room in region {region} received no door after {tries} pass retries")]
    DoorlessRoom { region: u8, tries: u32 },

    #[error("{remaining} corridor stubs left unresolved after {passes} resolver passes")]
    UnresolvedDeadEnds { remaining: usize, passes: u32 },

    #[error("no open floor cell available for stairway placement")]
    NoOpenCell,

    #[error("no valid level produced after {tries} attempts")]
    RetriesExhausted { tries: u32 },
}

/// Everything the generator draws on: the RNG stream and the item
/// template catalog. Injected rather than global so tests can pin a seed.
#[derive(Debug, Clone)]
pub struct GenContext {
    pub rng: GameRng,
    pub catalog: ItemCatalog,
}

impl GenContext {
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            catalog: ItemCatalog::standard(),
        }
    }

    pub fn with_catalog(rng: GameRng, catalog: ItemCatalog) -> Self {
        Self { rng, catalog }
    }
}

/// Build a level, regenerating until the validator accepts one.
///
/// Structural failures inside a pass (an unresolvable stub, a doorless
/// room, a roomless grid) reject that pass the same way a failed
/// validation does.
pub fn new_level(ctx: &mut GenContext) -> Result<Level, GenerationError> {
    new_level_bounded(ctx, MAX_LEVEL_RETRIES)
}

fn new_level_bounded(ctx: &mut GenContext, tries: u32) -> Result<Level, GenerationError> {
    for _ in 0..tries {
        match build_once(ctx) {
            Ok(level) if validate(&level) => {
                debug_assert!(level.dead_ends.is_empty());
                return Ok(level);
            }
            Ok(_) | Err(_) => continue,
        }
    }
    Err(GenerationError::RetriesExhausted { tries })
}

/// One full generation pass
fn build_once(ctx: &mut GenContext) -> Result<Level, GenerationError> {
    let mut level = Level::new();
    build_rooms(&mut level, ctx)?;
    resolve_dead_ends(&mut level)?;
    place_stairs(&mut level, ctx)?;
    Ok(level)
}

/// Put the stairway on a random open interior cell
fn place_stairs(level: &mut Level, ctx: &mut GenContext) -> Result<(), GenerationError> {
    let open = level.open_cells();
    let &(x, y) = ctx.rng.choose(&open).ok_or(GenerationError::NoOpenCell)?;
    level.set_terrain(x, y, Terrain::Stairs);
    level.stairs = Some((x, y));
    Ok(())
}

/// Statistical connectivity check: every sampled boundary-straddling line
/// must show at least two distinct terrain glyphs
pub fn validate(level: &Level) -> bool {
    for y in ROW_BAND {
        let glyphs: HashSet<char> = (MIN_X..=MAX_X).map(|x| level.terrain(x, y).symbol()).collect();
        if glyphs.len() < 2 {
            return false;
        }
    }
    for x in COL_BAND {
        let glyphs: HashSet<char> = (MIN_Y..=MAX_Y).map(|y| level.terrain(x, y).symbol()).collect();
        if glyphs.len() < 2 {
            return false;
        }
    }
    true
}
