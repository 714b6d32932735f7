//! Dungeon system
//!
//! Grid coordinates, the live cave, traps, semi-persistent chunks and
//! generation locations.

mod cave;
mod chunk;
mod gen_loc;
mod quake;
mod trap;

pub use cave::{Cave, Feat, PLAYER_OCCUPANT, SquareFlags};
pub use chunk::{
    ADJ_ABOVE, ADJ_BELOW, ADJ_SELF, Chunk, ChunkList, ChunkRef, adjacent_offset, chunk_capture,
    chunk_restore,
};
pub use gen_loc::{EdgeEffect, GenLoc, GenLocList, TerrainChange};
pub use quake::earthquake;
pub use trap::{Trap, TrapFlags, TrapKind, TrapList};

use serde::{Deserialize, Serialize};

/// A grid location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Loc {
    pub y: i32,
    pub x: i32,
}

impl Loc {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    pub const fn offset(self, dy: i32, dx: i32) -> Self {
        Self {
            y: self.y + dy,
            x: self.x + dx,
        }
    }

    /// Approximate distance: the longer axis plus half the shorter one
    pub fn distance(self, other: Loc) -> i32 {
        let dy = (self.y - other.y).abs();
        let dx = (self.x - other.x).abs();
        if dy > dx { dy + dx / 2 } else { dx + dy / 2 }
    }

    /// Within one step in any direction (and not the same square)
    pub fn is_adjacent(self, other: Loc) -> bool {
        self != other && (self.y - other.y).abs() <= 1 && (self.x - other.x).abs() <= 1
    }
}

/// Keypad direction offsets, indexed 0..10 (0 and 5 are "no move")
pub const DDY: [i32; 10] = [0, 1, 1, 1, 0, 0, 0, -1, -1, -1];
pub const DDX: [i32; 10] = [0, -1, 0, 1, -1, 0, 1, -1, 0, 1];

/// The eight directions in clockwise order starting north
pub const CYCLE: [usize; 8] = [8, 9, 6, 3, 2, 1, 4, 7];

/// Keypad direction of a single step from `from` toward `to`
pub fn direction_to(from: Loc, to: Loc) -> usize {
    let dy = (to.y - from.y).signum();
    let dx = (to.x - from.x).signum();
    (((1 - dy) * 3) + dx + 2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Loc::new(0, 0);
        assert_eq!(a.distance(Loc::new(0, 7)), 7);
        assert_eq!(a.distance(Loc::new(3, 7)), 8);
        assert_eq!(a.distance(Loc::new(-4, 1)), 4);
    }

    #[test]
    fn test_direction_to_matches_keypad() {
        let o = Loc::new(5, 5);
        for d in [1, 2, 3, 4, 6, 7, 8, 9] {
            let step = o.offset(DDY[d], DDX[d]);
            assert_eq!(direction_to(o, step), d);
        }
    }
}
