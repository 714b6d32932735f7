//! Pending display and recalculation work

use bitflags::bitflags;

use crate::bitset::byte_flags;

bitflags! {
    /// Parts of the display needing a redraw
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Redraw: u32 {
        const STATUS = 1 << 0;
        const STATE = 1 << 1;
        const SPEED = 1 << 2;
        const HP = 1 << 3;
        const STATS = 1 << 4;
        const STUN = 1 << 5;
        const CUT = 1 << 6;
        const SONG = 1 << 7;
        const MAP = 1 << 8;
        const MONSTER = 1 << 9;
        const HUNGER = 1 << 10;
        const INVEN = 1 << 11;
        const EQUIP = 1 << 12;
        const MESSAGE = 1 << 13;
    }
}

byte_flags!(Redraw, u32, 4);

bitflags! {
    /// Derived values needing a recalculation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Update: u32 {
        const BONUS = 1 << 0;
        const TORCH = 1 << 1;
        const HP = 1 << 2;
        const VIEW = 1 << 3;
        const MONSTERS = 1 << 4;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upkeep {
    pub redraw: Redraw,
    pub update: Update,
    /// Times the player has been disturbed
    pub disturb_count: u32,
    /// Player is resting or repeating a command
    pub resting: bool,
    pub repeating: u16,
    /// Energy used by the current player action
    pub energy_use: u16,
    /// The level is being regenerated
    pub generate_level: bool,
}
