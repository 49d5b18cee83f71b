//! Fog-of-war state transitions and the text snapshot renderer
//!
//! Two independent booleans per cell: `discovered` is permanent for the
//! life of the level, `visible` only ever lifts during play. Room
//! discovery lights a whole region at once (corridors excluded), while
//! proximity reveals structure cell by cell.

use crate::{COLNO, GameRng, PLAYER_SYM, ROOM_LIT_CHANCE, ROWNO};

use super::{Level, Terrain, region};

impl Level {
    /// Reset every cell to undiscovered and unlit. Called once on level
    /// creation.
    pub fn shroud(&mut self) {
        for col in &mut self.cells {
            for cell in col {
                cell.discovered = false;
                cell.visible = false;
            }
        }
    }

    /// Discover the region containing `(x, y)`.
    ///
    /// One lighting coin is flipped per call; cells already discovered
    /// keep their earlier lighting, so repeated calls never re-roll a
    /// room dark or bright. Corridor cells are skipped; they are revealed
    /// only by proximity.
    pub fn discover_room(&mut self, x: i8, y: i8, rng: &mut GameRng) {
        let ((x0, y0), (x1, y1)) = region::bounds(x, y);
        let lighted = rng.percent(ROOM_LIT_CHANCE);
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                let cell = &mut self.cells[cx as usize][cy as usize];
                if cell.terrain == Terrain::Corridor || cell.discovered {
                    continue;
                }
                cell.discovered = true;
                cell.visible = lighted;
            }
        }
    }

    /// Permanently discover the 8-neighborhood of `(x, y)`, lifting the
    /// fog on structural terrain even when unlit.
    ///
    /// Returns true when something in the neighborhood should interrupt
    /// automated fast-travel: an occupant or item whose glyph overrides
    /// the cell's terrain (other than the player), or displayed terrain
    /// outside the safe glide set.
    pub fn discover_surrounding(&mut self, x: i8, y: i8) -> bool {
        let mut interrupt = false;
        for (nx, ny) in self.neighbors8(x, y) {
            let cell = &mut self.cells[nx as usize][ny as usize];
            cell.discovered = true;
            if !cell.visible && cell.terrain.always_reveal() {
                cell.visible = true;
            }

            let glyph = cell.priority_char();
            let occupied = glyph != cell.terrain_char() && glyph != PLAYER_SYM;
            if occupied || cell.displayed_terrain().halts_travel() {
                interrupt = true;
            }
        }
        interrupt
    }

    /// Render the level as a fixed-width glyph grid, one newline-terminated
    /// line per row.
    ///
    /// Cells in the player's region draw at full priority while the player
    /// stands inside a room; otherwise visible cells draw their (masked)
    /// terrain, the player's immediate neighborhood draws at priority, and
    /// everything else is blank.
    pub fn render_text(&self, px: i8, py: i8) -> String {
        let player_region = region::region_of(px, py);
        let in_room = matches!(
            self.terrain(px, py),
            Terrain::Floor | Terrain::Door | Terrain::Stairs
        );

        let mut out = String::with_capacity((COLNO + 1) * ROWNO);
        for y in 0..ROWNO as i8 {
            for x in 0..COLNO as i8 {
                let cell = &self.cells[x as usize][y as usize];
                let ch = if in_room && region::region_of(x, y) == player_region {
                    cell.priority_char()
                } else if cell.visible {
                    cell.terrain_char()
                } else if (x as i16 - px as i16).abs() <= 1 && (y as i16 - py as i16).abs() <= 1 {
                    cell.priority_char()
                } else {
                    ' '
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{GenContext, new_level};

    /// A hand-built level: a lit-agnostic 6x4 room in region 5 with a door
    /// and a corridor running off it
    fn fixture() -> Level {
        let mut level = Level::new();
        // room walls at x 30..=35, y 11..=14
        for x in 30..=35 {
            for y in 11..=14 {
                let t = if y == 11 || y == 14 {
                    Terrain::HWall
                } else if x == 30 || x == 35 {
                    Terrain::VWall
                } else {
                    Terrain::Floor
                };
                level.set_terrain(x, y, t);
            }
        }
        level.set_terrain(30, 11, Terrain::TLCorner);
        level.set_terrain(35, 11, Terrain::TRCorner);
        level.set_terrain(30, 14, Terrain::BLCorner);
        level.set_terrain(35, 14, Terrain::BRCorner);
        level.set_terrain(35, 12, Terrain::Door);
        for x in 36..=40 {
            level.set_terrain(x, 12, Terrain::Corridor);
        }
        level
    }

    fn grid_of(text: &str) -> Vec<Vec<char>> {
        text.lines().map(|l| l.chars().collect()).collect()
    }

    #[test]
    fn test_shrouded_level_renders_blank_outside_neighborhood() {
        let mut level = fixture();
        level.shroud();
        level.cells[32][12].occupant = Some('@');

        let grid = grid_of(&level.render_text(32, 12));
        // note: the player stands in a room, so the whole region renders;
        // outside region 5 and the neighborhood everything is blank
        for (y, row) in grid.iter().enumerate() {
            for (x, ch) in row.iter().enumerate() {
                let in_region5 = region::region_of(x as i8, y as i8) == 5;
                if !in_region5 {
                    assert_eq!(*ch, ' ', "({x},{y})");
                }
            }
        }
        assert_eq!(grid[12][32], '@');
    }

    #[test]
    fn test_corridor_player_sees_only_neighborhood() {
        let mut level = fixture();
        level.shroud();
        level.cells[38][12].occupant = Some('@');

        let grid = grid_of(&level.render_text(38, 12));
        assert_eq!(grid[12][38], '@');
        assert_eq!(grid[12][37], '#');
        assert_eq!(grid[12][39], '#');
        // two cells away is fog
        assert_eq!(grid[12][36], ' ');
        assert_eq!(grid[12][40], ' ');
    }

    #[test]
    fn test_discover_room_skips_corridors_and_is_idempotent() {
        let mut level = fixture();
        level.shroud();

        // force a lit roll, then a dark roll on the second call
        let mut lit_rng = GameRng::new(0);
        while !lit_rng.clone().percent(crate::ROOM_LIT_CHANCE) {
            lit_rng.rn2(100);
        }
        level.discover_room(32, 12, &mut lit_rng);

        assert!(level.cells[32][12].discovered);
        assert!(level.cells[32][12].visible);
        // corridor cells inside the region stay undiscovered
        assert!(!level.cells[38][12].discovered);
        assert!(!level.cells[38][12].visible);

        let before: Vec<bool> = (30..=35)
            .map(|x| level.cells[x as usize][12].visible)
            .collect();

        // a second call must not re-roll lighting for discovered cells
        let mut dark_rng = GameRng::new(0);
        while dark_rng.clone().percent(crate::ROOM_LIT_CHANCE) {
            dark_rng.rn2(100);
        }
        level.discover_room(32, 12, &mut dark_rng);
        let after: Vec<bool> = (30..=35)
            .map(|x| level.cells[x as usize][12].visible)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_discover_surrounding_reveals_structure_only() {
        let mut level = fixture();
        level.shroud();

        // player in the corridor next to the door
        let interrupt = level.discover_surrounding(36, 12);
        assert!(interrupt, "adjacent door should interrupt fast-travel");

        // corridor and door neighbors became visible
        assert!(level.cells[35][12].visible);
        assert!(level.cells[37][12].visible);
        // blank neighbors are discovered but stay dark
        assert!(level.cells[37][11].discovered);
        assert!(!level.cells[37][11].visible);
    }

    #[test]
    fn test_discover_surrounding_plain_corridor_glides() {
        let mut level = fixture();
        level.shroud();
        assert!(!level.discover_surrounding(39, 12));
    }

    #[test]
    fn test_discover_surrounding_sees_monster() {
        let mut level = fixture();
        level.shroud();
        // unlit room: discover it dark
        for x in 30..=35 {
            for y in 11..=14 {
                level.cells[x][y].discovered = true;
            }
        }
        level.cells[33][13].occupant = Some('k');
        assert!(level.discover_surrounding(32, 12));
    }

    #[test]
    fn test_hidden_door_renders_as_wall_until_found() {
        let mut level = fixture();
        {
            let cell = level.cell_mut(35, 12).unwrap();
            cell.mask = Some(Terrain::VWall);
            cell.door = crate::dungeon::DoorState::HIDDEN;
        }
        level.shroud();
        level.cells[35][12].visible = true;

        let grid = grid_of(&level.render_text(38, 20));
        assert_eq!(grid[12][35], Terrain::VWall.symbol());

        level.cell_mut(35, 12).unwrap().reveal_hidden();
        let grid = grid_of(&level.render_text(38, 20));
        assert_eq!(grid[12][35], '+');
    }

    #[test]
    fn test_visible_cells_hide_occupants_outside_region() {
        let mut level = fixture();
        level.shroud();
        level.cells[38][12].visible = true;
        level.cells[38][12].occupant = Some('k');

        // player far away in another region: remembered terrain only
        let grid = grid_of(&level.render_text(5, 5));
        assert_eq!(grid[12][38], '#');
    }

    #[test]
    fn test_generated_level_round_trip() {
        let mut ctx = GenContext::new(crate::GameRng::new(77));
        let mut level = new_level(&mut ctx).unwrap();
        level.shroud();

        let (px, py) = level.place_random(crate::PLAYER_SYM, &mut ctx.rng).unwrap();
        level.discover_room(px, py, &mut ctx.rng);
        level.discover_surrounding(px, py);

        let text = level.render_text(px, py);
        let grid = grid_of(&text);
        assert_eq!(grid.len(), ROWNO);
        assert!(grid.iter().all(|row| row.len() == COLNO));
        assert_eq!(grid[py as usize][px as usize], crate::PLAYER_SYM);
    }
}
