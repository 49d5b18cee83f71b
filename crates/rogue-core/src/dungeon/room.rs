//! Room carving: one room per region with walls, doors, and corridor stubs

use crate::{
    DOOR_CHANCE, GOLD_CHANCE, GOLD_SYM, HIDDEN_DOOR_CHANCE, MAX_DOOR_RETRIES, MAX_ITEM_ATTEMPTS,
    MAX_PLACEMENT_TRIES, REGION_H, REGION_W, ROOM_CHANCE, ROOM_MAX_HEIGHT, ROOM_MAX_WIDTH,
    ROOM_MIN_HEIGHT, ROOM_MIN_WIDTH,
};

use super::generation::{GenContext, GenerationError};
use super::{Direction, DoorState, Level, Terrain, region};

/// Room rectangle, walls included
#[derive(Debug, Clone, Copy)]
struct Room {
    x: i8,
    y: i8,
    width: i8,
    height: i8,
}

impl Room {
    /// Uniform random cell of the full rectangle
    fn random_cell(&self, ctx: &mut GenContext) -> (i8, i8) {
        (
            self.x + ctx.rng.rn2(self.width as u32) as i8,
            self.y + ctx.rng.rn2(self.height as u32) as i8,
        )
    }
}

/// Carve one room per region, each with probability `ROOM_CHANCE`
pub(crate) fn build_rooms(level: &mut Level, ctx: &mut GenContext) -> Result<(), GenerationError> {
    for region in 1..=crate::NUM_REGIONS {
        if !ctx.rng.percent(ROOM_CHANCE) {
            continue;
        }
        build_room(level, region, ctx)?;
    }
    Ok(())
}

/// Carve a single room centered in its region, then attach doors, stubs,
/// gold, and items
fn build_room(level: &mut Level, region: u8, ctx: &mut GenContext) -> Result<(), GenerationError> {
    let ((rx0, ry0), _) = region::bounds_of(region);

    let height =
        ROOM_MIN_HEIGHT + ctx.rng.rn2((ROOM_MAX_HEIGHT - ROOM_MIN_HEIGHT + 1) as u32) as i8;
    let width = ROOM_MIN_WIDTH + ctx.rng.rn2((ROOM_MAX_WIDTH - ROOM_MIN_WIDTH + 1) as u32) as i8;

    // center inside the region, rounding down
    let room = Room {
        x: rx0 + (REGION_W - width) / 2,
        y: ry0 + (REGION_H - height) / 2,
        width,
        height,
    };

    paint_room(level, &room);
    place_doors(level, &room, region, ctx, MAX_DOOR_RETRIES)?;
    place_gold(level, &room, ctx);
    place_items(level, &room, ctx);
    Ok(())
}

/// Paint walls, corners, and interior
fn paint_room(level: &mut Level, room: &Room) {
    let (x1, y1) = (room.x + room.width - 1, room.y + room.height - 1);
    for x in room.x..=x1 {
        for y in room.y..=y1 {
            let terrain = if y == room.y || y == y1 {
                Terrain::HWall
            } else if x == room.x || x == x1 {
                Terrain::VWall
            } else {
                Terrain::Floor
            };
            level.set_terrain(x, y, terrain);
        }
    }
    level.set_terrain(room.x, room.y, Terrain::TLCorner);
    level.set_terrain(x1, room.y, Terrain::TRCorner);
    level.set_terrain(room.x, y1, Terrain::BLCorner);
    level.set_terrain(x1, y1, Terrain::BRCorner);
}

/// One probabilistic door pass over the eligible sides.
///
/// Repeated wholesale until at least one door lands; regions on the map
/// edge have fewer eligible sides and so retry more often.
fn place_doors(
    level: &mut Level,
    room: &Room,
    region: u8,
    ctx: &mut GenContext,
    tries: u32,
) -> Result<(), GenerationError> {
    for _ in 0..tries {
        let mut doors = 0;
        for side in Direction::CARDINAL {
            if !region::allows_door(region, side) {
                continue;
            }
            if !ctx.rng.percent(DOOR_CHANCE) {
                continue;
            }
            place_door(level, room, side, ctx);
            doors += 1;
        }
        if doors > 0 {
            return Ok(());
        }
    }
    Err(GenerationError::DoorlessRoom { region, tries })
}

/// Place one door at a uniformly random point along the given wall, plus
/// the corridor stub just beyond it
fn place_door(level: &mut Level, room: &Room, side: Direction, ctx: &mut GenContext) {
    let (x1, y1) = (room.x + room.width - 1, room.y + room.height - 1);

    // random point along the wall, corners excluded
    let (dx, dy, mask) = match side {
        Direction::North => (
            room.x + 1 + ctx.rng.rn2((room.width - 2) as u32) as i8,
            room.y,
            Terrain::HWall,
        ),
        Direction::South => (
            room.x + 1 + ctx.rng.rn2((room.width - 2) as u32) as i8,
            y1,
            Terrain::HWall,
        ),
        Direction::East => (
            x1,
            room.y + 1 + ctx.rng.rn2((room.height - 2) as u32) as i8,
            Terrain::VWall,
        ),
        Direction::West => (
            room.x,
            room.y + 1 + ctx.rng.rn2((room.height - 2) as u32) as i8,
            Terrain::VWall,
        ),
        Direction::None => return,
    };

    level.set_terrain(dx, dy, Terrain::Door);
    if ctx.rng.percent(HIDDEN_DOOR_CHANCE) {
        if let Some(cell) = level.cell_mut(dx, dy) {
            cell.mask = Some(mask);
            cell.door = DoorState::HIDDEN;
        }
    }

    // the stub just beyond the door seeds the hallway network
    let stub = side.step(dx, dy);
    if level.in_bounds(stub.0, stub.1) {
        level.set_terrain(stub.0, stub.1, Terrain::Corridor);
        level.dead_ends.insert(stub, side);
    }
}

/// Drop a gold pile on a random interior cell, 70% of the time
fn place_gold(level: &mut Level, room: &Room, ctx: &mut GenContext) {
    if !ctx.rng.percent(GOLD_CHANCE) {
        return;
    }
    for _ in 0..MAX_PLACEMENT_TRIES {
        let (x, y) = room.random_cell(ctx);
        let Some(cell) = level.cell_mut(x, y) else {
            continue;
        };
        if cell.terrain != Terrain::Floor || cell.item_glyph.is_some() {
            continue;
        }
        cell.item_glyph = Some(GOLD_SYM);
        cell.gold = ctx.rng.dice(2, 25);
        return;
    }
}

/// Probabilistic item placement.
///
/// A rejected template draw still consumes an attempt, so a room may end
/// up with fewer than the rolled count.
fn place_items(level: &mut Level, room: &Room, ctx: &mut GenContext) {
    let attempts = ctx.rng.rnd(MAX_ITEM_ATTEMPTS);
    for _ in 0..attempts {
        let Some(template) = ctx.catalog.draw(&mut ctx.rng).cloned() else {
            return;
        };
        if !ctx.rng.percent(template.appearance) {
            continue;
        }
        let mut spot = None;
        for _ in 0..MAX_PLACEMENT_TRIES {
            let (x, y) = room.random_cell(ctx);
            if let Some(cell) = level.cell(x, y)
                && cell.terrain == Terrain::Floor
                && cell.item.is_none()
                && cell.item_glyph.is_none()
            {
                spot = Some((x, y));
                break;
            }
        }
        if let Some((x, y)) = spot
            && let Some(cell) = level.cell_mut(x, y)
        {
            cell.item = Some(template);
        }
    }
}
