//! Level structure and movement/query primitives

use serde::{Deserialize, Serialize};

use crate::{COLNO, GameRng, ROWNO};

use super::{Cell, Direction, Terrain};

/// Create default cells grid
fn default_cells() -> Vec<Vec<Cell>> {
    vec![vec![Cell::default(); ROWNO]; COLNO]
}

/// Insertion-ordered table of unresolved corridor stubs, keyed by
/// coordinate.
///
/// Populated during room generation (one entry per door) and fully
/// drained by the corridor resolver; empty on every successfully built
/// level.
#[derive(Debug, Clone, Default)]
pub struct DeadEndTable {
    entries: Vec<((i8, i8), Direction)>,
}

impl DeadEndTable {
    /// Register a stub. An existing entry at the same coordinate is
    /// replaced.
    pub fn insert(&mut self, coord: (i8, i8), dir: Direction) {
        self.remove(coord);
        self.entries.push((coord, dir));
    }

    /// Remove a stub, returning its direction
    pub fn remove(&mut self, coord: (i8, i8)) -> Option<Direction> {
        let idx = self.entries.iter().position(|(c, _)| *c == coord)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains(&self, coord: (i8, i8)) -> bool {
        self.entries.iter().any(|(c, _)| *c == coord)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &((i8, i8), Direction)> {
        self.entries.iter()
    }

    /// Snapshot of the entries in reverse insertion order, so a pass can
    /// mutate the table while walking it
    pub fn snapshot_rev(&self) -> Vec<((i8, i8), Direction)> {
        self.entries.iter().rev().copied().collect()
    }
}

/// A complete dungeon level: the fixed 79x25 cell grid plus the transient
/// dead-end table used during generation.
///
/// Terrain is frozen once generation finishes; play only mutates
/// occupant/item fields and the `discovered`/`visible` flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Map cells, indexed `[x][y]`
    #[serde(default = "default_cells")]
    pub cells: Vec<Vec<Cell>>,

    /// Unresolved corridor stubs; drained before generation completes
    #[serde(skip)]
    pub(crate) dead_ends: DeadEndTable,

    /// Stairway position, once placed
    pub stairs: Option<(i8, i8)>,
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

impl Level {
    /// Create a new all-blank level
    pub fn new() -> Self {
        Self {
            cells: default_cells(),
            dead_ends: DeadEndTable::default(),
            stairs: None,
        }
    }

    /// Check if position is on the grid
    pub const fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as usize) < COLNO && (y as usize) < ROWNO
    }

    /// Get cell at position
    pub fn cell(&self, x: i8, y: i8) -> Option<&Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(&self.cells[x as usize][y as usize])
    }

    /// Get mutable cell at position
    pub fn cell_mut(&mut self, x: i8, y: i8) -> Option<&mut Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(&mut self.cells[x as usize][y as usize])
    }

    /// Terrain at position; out-of-range reads as blank
    pub fn terrain(&self, x: i8, y: i8) -> Terrain {
        self.cell(x, y).map(|c| c.terrain).unwrap_or(Terrain::Blank)
    }

    pub(crate) fn set_terrain(&mut self, x: i8, y: i8, terrain: Terrain) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.terrain = terrain;
        }
    }

    /// Neighbor coordinate one step in the given direction, if it is on
    /// the grid and (with a filter) its priority character matches.
    pub fn neighbor(&self, x: i8, y: i8, dir: Direction, glyph: Option<char>) -> Option<(i8, i8)> {
        if dir == Direction::None {
            return None;
        }
        let (nx, ny) = dir.step(x, y);
        let cell = self.cell(nx, ny)?;
        match glyph {
            Some(g) if cell.priority_char() != g => None,
            _ => Some((nx, ny)),
        }
    }

    /// In-bounds coordinates of the 8-neighborhood around a position.
    /// Computed in i16 so coordinates at the numeric limits stay safe.
    pub fn neighbors8(&self, x: i8, y: i8) -> Vec<(i8, i8)> {
        let mut out = Vec::with_capacity(8);
        for dx in -1i16..=1 {
            for dy in -1i16..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x as i16 + dx, y as i16 + dy);
                if (0..COLNO as i16).contains(&nx) && (0..ROWNO as i16).contains(&ny) {
                    out.push((nx as i8, ny as i8));
                }
            }
        }
        out
    }

    /// Count cardinal neighbors of the given terrain
    pub(crate) fn count_adjacent(&self, x: i8, y: i8, terrain: Terrain) -> usize {
        Direction::CARDINAL
            .iter()
            .filter(|dir| {
                let (nx, ny) = dir.step(x, y);
                self.terrain(nx, ny) == terrain
            })
            .count()
    }

    /// All open interior cells: floor terrain with no occupant or item
    pub fn open_cells(&self) -> Vec<(i8, i8)> {
        let mut out = Vec::new();
        for x in 0..COLNO as i8 {
            for y in 0..ROWNO as i8 {
                if self.cells[x as usize][y as usize].is_open_floor() {
                    out.push((x, y));
                }
            }
        }
        out
    }

    /// Move an occupant glyph from one cell to another.
    ///
    /// Fails without mutation if the source has no occupant, the target is
    /// off-grid, or the target already has an occupant.
    pub fn move_occupant(&mut self, from: (i8, i8), to: (i8, i8)) -> bool {
        if !self.in_bounds(from.0, from.1) || !self.in_bounds(to.0, to.1) {
            return false;
        }
        if self.cells[to.0 as usize][to.1 as usize].occupant.is_some() {
            return false;
        }
        let Some(glyph) = self.cells[from.0 as usize][from.1 as usize].occupant.take() else {
            return false;
        };
        self.cells[to.0 as usize][to.1 as usize].occupant = Some(glyph);
        true
    }

    /// Place a glyph on a random open floor cell, returning where it
    /// landed
    pub fn place_random(&mut self, glyph: char, rng: &mut GameRng) -> Option<(i8, i8)> {
        let open = self.open_cells();
        let (x, y) = *rng.choose(&open)?;
        self.cells[x as usize][y as usize].occupant = Some(glyph);
        Some((x, y))
    }

    /// Locate the first cell occupied by the given glyph
    pub fn find_occupant(&self, glyph: char) -> Option<(i8, i8)> {
        for x in 0..COLNO as i8 {
            for y in 0..ROWNO as i8 {
                if self.cells[x as usize][y as usize].occupant == Some(glyph) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Reveal hidden doors adjacent to the searcher. Returns true if any
    /// door was found.
    pub fn search_adjacent(&mut self, x: i8, y: i8) -> bool {
        let mut found = false;
        for (nx, ny) in self.neighbors8(x, y) {
            let cell = &mut self.cells[nx as usize][ny as usize];
            if cell.is_hidden_door() {
                cell.reveal_hidden();
                found = true;
            }
        }
        found
    }
}
