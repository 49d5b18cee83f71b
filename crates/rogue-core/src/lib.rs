//! rogue-core: level generation and fog-of-war for a Rogue clone
//!
//! This crate contains the procedural level generator, the region/grid
//! model, and the two-tier visibility engine. It is pure logic with no I/O
//! dependencies; the turn loop and presentation layers consume it through
//! [`dungeon::Level`] queries and the text snapshot renderer.

pub mod dungeon;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
