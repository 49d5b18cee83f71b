//! Compass directions and turn algebra

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A compass heading for corridor digging.
///
/// `None` marks a stub whose origin direction is unknown; the corridor
/// resolver drops such entries instead of extending them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    #[default]
    None = 0,
    North = 1,
    East = 2,
    South = 3,
    West = 4,
}

impl Direction {
    /// The four real headings, for iteration
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step for this heading. Screen coordinates: y grows downward.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::None => (0, 0),
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// The 180 degree turn
    pub const fn opposite(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The 90 degree turn relative to a forward heading
    pub const fn turn_left(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// The 270 degree (mirror) turn relative to a forward heading
    pub const fn turn_right(self) -> Self {
        self.turn_left().opposite()
    }

    /// Coordinate one step along this heading.
    ///
    /// Saturates at the numeric limits; the result is out of grid range
    /// there, so bounds checks downstream still reject it.
    pub const fn step(self, x: i8, y: i8) -> (i8, i8) {
        let (dx, dy) = self.delta();
        (x.saturating_add(dx), y.saturating_add(dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opposite_involution() {
        for dir in Direction::iter() {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_turns_are_perpendicular() {
        for dir in Direction::CARDINAL {
            assert_eq!(dir.turn_left().opposite(), dir.turn_right());
            assert_eq!(dir.turn_left().turn_left(), dir.opposite());
            assert_ne!(dir.turn_left(), dir);
        }
    }

    #[test]
    fn test_none_has_no_turns() {
        assert_eq!(Direction::None.turn_left(), Direction::None);
        assert_eq!(Direction::None.turn_right(), Direction::None);
        assert_eq!(Direction::None.delta(), (0, 0));
    }

    #[test]
    fn test_deltas_cancel() {
        for dir in Direction::CARDINAL {
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_step() {
        assert_eq!(Direction::North.step(5, 5), (5, 4));
        assert_eq!(Direction::South.step(5, 5), (5, 6));
        assert_eq!(Direction::East.step(5, 5), (6, 5));
        assert_eq!(Direction::West.step(5, 5), (4, 5));
    }

    #[test]
    fn test_step_saturates_at_limits() {
        assert_eq!(Direction::East.step(i8::MAX, 5), (i8::MAX, 5));
        assert_eq!(Direction::South.step(5, i8::MAX), (5, i8::MAX));
        assert_eq!(Direction::West.step(i8::MIN, 5), (i8::MIN, 5));
        assert_eq!(Direction::North.step(5, i8::MIN), (5, i8::MIN));
    }
}
