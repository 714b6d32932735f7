//! sil-core: simulation engine for a Sil-style roguelike
//!
//! Holds the world model and the rules that act on it: timed player
//! effects, combat arithmetic, monster melee and spells, the chunked
//! wilderness map and high scores. No terminal or file format code lives
//! here; the savefile format is in `sil-save`.

pub mod combat;
pub mod data;
pub mod dungeon;
pub mod monster;
pub mod object;
pub mod player;
pub mod world;

mod bitset;
mod consts;
mod rng;

pub use consts::*;
pub use data::{DataError, GameData};
pub use rng::{Aspect, GameRng};
pub use world::World;
