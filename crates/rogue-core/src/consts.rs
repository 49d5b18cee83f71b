//! Core constants for the level generator.

/// Map dimensions
pub const COLNO: usize = 79;
pub const ROWNO: usize = 25;

/// Playable interior bounds; column 0 and row 0 are a dead border.
pub const MIN_X: i8 = 1;
pub const MAX_X: i8 = 78;
pub const MIN_Y: i8 = 1;
pub const MAX_Y: i8 = 24;

/// Region tiling: a 3x3 grid of fixed rectangles, numbered 1-9 row-major.
pub const REGION_W: i8 = 26;
pub const REGION_H: i8 = 8;
pub const NUM_REGIONS: u8 = 9;

/// Room size limits (walls included)
pub const ROOM_MIN_HEIGHT: i8 = 4;
pub const ROOM_MAX_HEIGHT: i8 = 6;
pub const ROOM_MIN_WIDTH: i8 = 4;
pub const ROOM_MAX_WIDTH: i8 = 24;

/// Generation probabilities (percent)
pub const ROOM_CHANCE: u32 = 95;
pub const DOOR_CHANCE: u32 = 90;
pub const HIDDEN_DOOR_CHANCE: u32 = 25;
pub const GOLD_CHANCE: u32 = 70;
pub const ROOM_LIT_CHANCE: u32 = 75;

/// Items placed per room: 1..=MAX_ITEM_ATTEMPTS attempts
pub const MAX_ITEM_ATTEMPTS: u32 = 3;

/// Retry caps converting unbounded probabilistic loops into typed failures
pub const MAX_DOOR_RETRIES: u32 = 64;
pub const MAX_PLACEMENT_TRIES: u32 = 200;
pub const MAX_RESOLVER_PASSES: u32 = 4096;
pub const MAX_LEVEL_RETRIES: u32 = 64;

/// Occupant glyphs
pub const PLAYER_SYM: char = '@';

/// Loose item glyphs
pub const GOLD_SYM: char = '$';
