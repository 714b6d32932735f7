//! Traps

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::Loc;
use crate::bitset::byte_flags;

bitflags! {
    /// Trap kind and instance flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TrapFlags: u16 {
        const TRAP = 1 << 0;
        const VISIBLE = 1 << 1;
        const INVISIBLE = 1 << 2;
        const FLOOR = 1 << 3;
        const DOWN = 1 << 4;
        const PIT = 1 << 5;
        const WEB = 1 << 6;
        const GLYPH = 1 << 7;
        const LOCK = 1 << 8;
        const ONETIME = 1 << 9;
    }
}

byte_flags!(TrapFlags, u16, crate::consts::TRF_SIZE);

/// Trap definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrapKind {
    pub name: String,
    pub desc: String,
    pub flags: TrapFlags,
    /// Minimum depth
    pub level: u8,
}

/// A trap placed in the cave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trap {
    /// Index of the trap kind
    pub kind: u8,
    pub grid: Loc,
    pub flags: TrapFlags,
    /// Kind-specific extra byte (lock power for doors)
    pub xtra: u8,
}

/// All traps on the current level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrapList {
    traps: Vec<Trap>,
}

impl TrapList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trap, returning false when the list is full
    pub fn place(&mut self, trap: Trap) -> bool {
        if self.traps.len() >= crate::consts::TRAP_MAX {
            return false;
        }
        self.traps.push(trap);
        true
    }

    /// Traps on one square
    pub fn at(&self, grid: Loc) -> impl Iterator<Item = &Trap> {
        self.traps.iter().filter(move |t| t.grid == grid)
    }

    /// Is there a pit on this square?
    pub fn pit_at(&self, grid: Loc) -> bool {
        self.at(grid).any(|t| t.flags.contains(TrapFlags::PIT))
    }

    /// Remove every trap on a square
    pub fn remove_at(&mut self, grid: Loc) -> usize {
        let before = self.traps.len();
        self.traps.retain(|t| t.grid != grid);
        before - self.traps.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trap> {
        self.traps.iter()
    }

    pub fn len(&self) -> usize {
        self.traps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traps.is_empty()
    }

    pub fn clear(&mut self) {
        self.traps.clear();
    }

    /// Take every trap inside a rectangle, shifting grids to be relative to
    /// its top-left corner
    pub fn drain_region(&mut self, top_left: Loc, height: i32, width: i32) -> Vec<Trap> {
        let inside = |g: Loc| {
            g.y >= top_left.y
                && g.x >= top_left.x
                && g.y < top_left.y + height
                && g.x < top_left.x + width
        };
        let mut taken = Vec::new();
        self.traps.retain(|t| {
            if inside(t.grid) {
                let mut t = *t;
                t.grid = Loc::new(t.grid.y - top_left.y, t.grid.x - top_left.x);
                taken.push(t);
                false
            } else {
                true
            }
        });
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pit_lookup() {
        let mut traps = TrapList::new();
        traps.place(Trap {
            kind: 1,
            grid: Loc::new(3, 4),
            flags: TrapFlags::TRAP | TrapFlags::PIT,
            xtra: 0,
        });
        assert!(traps.pit_at(Loc::new(3, 4)));
        assert!(!traps.pit_at(Loc::new(3, 5)));
        assert_eq!(traps.remove_at(Loc::new(3, 4)), 1);
        assert!(traps.is_empty());
    }

    #[test]
    fn test_drain_region_rebases() {
        let mut traps = TrapList::new();
        traps.place(Trap { kind: 1, grid: Loc::new(20, 20), ..Default::default() });
        traps.place(Trap { kind: 2, grid: Loc::new(2, 2), ..Default::default() });
        let taken = traps.drain_region(Loc::new(16, 16), 16, 16);
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].grid, Loc::new(4, 4));
        assert_eq!(traps.len(), 1);
    }
}
