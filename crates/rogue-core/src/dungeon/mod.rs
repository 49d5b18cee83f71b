//! Dungeon system
//!
//! Contains the cell/grid model, region geometry, the room and corridor
//! generators, the regenerate-until-valid loop, and the visibility engine.

mod cell;
mod corridor;
mod direction;
mod generation;
mod item;
mod level;
pub mod region;
mod room;
mod visibility;

pub use cell::{Cell, DoorState, Terrain};
pub use corridor::resolve_dead_ends;
pub use direction::Direction;
pub use generation::{new_level, validate, GenContext, GenerationError};
pub use item::{ItemCatalog, ItemTemplate};
pub use level::{DeadEndTable, Level};
