//! Map cell types and glyph priority resolution

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::item::ItemTemplate;

/// Base terrain of a single map cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Terrain {
    #[default]
    Blank = 0,
    HWall = 1,
    VWall = 2,
    TLCorner = 3,
    TRCorner = 4,
    BLCorner = 5,
    BRCorner = 6,
    Door = 7,
    Corridor = 8,
    Floor = 9,
    Stairs = 10,
}

impl Terrain {
    /// Check if this is a wall type (corners included)
    pub const fn is_wall(&self) -> bool {
        (*self as u8) >= 1 && (*self as u8) <= 6
    }

    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        matches!(
            self,
            Terrain::Floor | Terrain::Door | Terrain::Corridor | Terrain::Stairs
        )
    }

    /// Terrain revealed by mere proximity, even in an unlit area.
    /// Room interiors are excluded; they need room lighting.
    pub const fn always_reveal(&self) -> bool {
        matches!(
            self,
            Terrain::HWall
                | Terrain::VWall
                | Terrain::TLCorner
                | Terrain::TRCorner
                | Terrain::BLCorner
                | Terrain::BRCorner
                | Terrain::Door
                | Terrain::Corridor
                | Terrain::Stairs
        )
    }

    /// Terrain that forces automated fast-travel to stop when adjacent
    pub const fn halts_travel(&self) -> bool {
        matches!(self, Terrain::Door | Terrain::Stairs)
    }

    /// Get the display character for this terrain
    pub const fn symbol(&self) -> char {
        match self {
            Terrain::Blank => ' ',
            Terrain::HWall => '─',
            Terrain::VWall => '│',
            Terrain::TLCorner => '┌',
            Terrain::TRCorner => '┐',
            Terrain::BLCorner => '└',
            Terrain::BRCorner => '┘',
            Terrain::Door => '+',
            Terrain::Corridor => '#',
            Terrain::Floor => '.',
            Terrain::Stairs => '>',
        }
    }
}

bitflags! {
    /// Door state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DoorState: u8 {
        /// Door is hidden behind a wall glyph until searched for
        const HIDDEN = 0x01;
        /// Hidden door has been found by searching
        const FOUND = 0x02;
    }
}

// Manual serde impl for DoorState
impl Serialize for DoorState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DoorState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(DoorState::from_bits_truncate(bits))
    }
}

/// A single map cell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Actual terrain type
    pub terrain: Terrain,

    /// Wall terrain a hidden door masquerades as until found
    pub mask: Option<Terrain>,

    /// Door flags (hidden / found by searching)
    pub door: DoorState,

    /// Loose item glyph (a gold pile)
    pub item_glyph: Option<char>,

    /// Gold amount when the loose item is a gold pile
    pub gold: u32,

    /// Placed inventory item
    pub item: Option<ItemTemplate>,

    /// Occupant glyph (player or monster)
    pub occupant: Option<char>,

    /// Permanently revealed to the player
    pub discovered: bool,

    /// Currently rendered at full detail
    pub visible: bool,
}

impl Cell {
    /// Create a cell of the given terrain
    pub fn of(terrain: Terrain) -> Self {
        Self {
            terrain,
            ..Self::default()
        }
    }

    /// Check if this is an unfound hidden door
    pub fn is_hidden_door(&self) -> bool {
        self.door.contains(DoorState::HIDDEN) && !self.door.contains(DoorState::FOUND)
    }

    /// Reveal a hidden door found by searching
    pub fn reveal_hidden(&mut self) {
        if self.door.contains(DoorState::HIDDEN) {
            self.door.insert(DoorState::FOUND);
        }
    }

    /// The terrain the cell currently presents: the masking wall while a
    /// hidden door is unfound, the base terrain otherwise.
    pub fn displayed_terrain(&self) -> Terrain {
        if self.is_hidden_door() {
            self.mask.unwrap_or(self.terrain)
        } else {
            self.terrain
        }
    }

    /// Terrain character with hidden-door masking applied
    pub fn terrain_char(&self) -> char {
        self.displayed_terrain().symbol()
    }

    /// Resolve the cell's display character.
    ///
    /// Priority order is fixed and shared by generation, collision checks,
    /// and rendering: occupant > loose item > inventory item glyph >
    /// masking terrain (unfound hidden door) > base terrain.
    pub fn priority_char(&self) -> char {
        if let Some(ch) = self.occupant {
            return ch;
        }
        if let Some(ch) = self.item_glyph {
            return ch;
        }
        if let Some(item) = &self.item {
            return item.glyph;
        }
        self.terrain_char()
    }

    /// Check if this is a floor cell with nothing on it
    pub fn is_open_floor(&self) -> bool {
        self.terrain == Terrain::Floor
            && self.occupant.is_none()
            && self.item_glyph.is_none()
            && self.item.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_priority_order() {
        let mut cell = Cell::of(Terrain::Floor);
        assert_eq!(cell.priority_char(), '.');

        cell.item = Some(ItemTemplate::new("potion", '!', 60));
        assert_eq!(cell.priority_char(), '!');

        cell.item_glyph = Some('$');
        assert_eq!(cell.priority_char(), '$');

        cell.occupant = Some('@');
        assert_eq!(cell.priority_char(), '@');
    }

    #[test]
    fn test_hidden_door_masks_as_wall() {
        let mut cell = Cell::of(Terrain::Door);
        cell.mask = Some(Terrain::HWall);
        cell.door = DoorState::HIDDEN;

        assert!(cell.is_hidden_door());
        assert_eq!(cell.priority_char(), Terrain::HWall.symbol());
        assert_eq!(cell.displayed_terrain(), Terrain::HWall);

        cell.reveal_hidden();
        assert!(!cell.is_hidden_door());
        assert_eq!(cell.priority_char(), '+');
        assert_eq!(cell.displayed_terrain(), Terrain::Door);
    }

    #[test]
    fn test_reveal_without_hidden_is_noop() {
        let mut cell = Cell::of(Terrain::Door);
        cell.reveal_hidden();
        assert_eq!(cell.door, DoorState::empty());
    }

    #[test]
    fn test_non_blank_symbols_distinct() {
        let symbols: Vec<char> = Terrain::iter()
            .filter(|t| *t != Terrain::Blank)
            .map(|t| t.symbol())
            .collect();
        let mut dedup = symbols.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(symbols.len(), dedup.len());
    }

    #[test]
    fn test_wall_predicates() {
        assert!(Terrain::HWall.is_wall());
        assert!(Terrain::BRCorner.is_wall());
        assert!(!Terrain::Door.is_wall());
        assert!(!Terrain::Blank.is_wall());

        assert!(Terrain::Corridor.always_reveal());
        assert!(!Terrain::Floor.always_reveal());
        assert!(!Terrain::Blank.always_reveal());

        assert!(Terrain::Door.halts_travel());
        assert!(Terrain::Stairs.halts_travel());
        assert!(!Terrain::Corridor.halts_travel());
    }
}
