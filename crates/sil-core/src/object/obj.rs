//! Object instances

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use super::Quark;
use crate::bitset::byte_flags;
use crate::consts::{MAX_P_BONUS, MAX_P_BRAND, MAX_P_RES, MAX_P_SLAY, STAT_MAX};
use crate::dungeon::Loc;
use crate::monster::MonsterId;

/// Index into the object list; 0 means "none"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObjectId(pub u16);

impl ObjectId {
    pub const NONE: ObjectId = ObjectId(0);

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Object type tag
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    FromRepr,
)]
#[repr(u8)]
pub enum Tval {
    #[default]
    None = 0,
    Chest = 7,
    Useless = 8,
    Arrow = 17,
    Bow = 19,
    Digging = 20,
    Hafted = 21,
    Polearm = 22,
    Sword = 23,
    Boots = 30,
    Gloves = 31,
    Helm = 32,
    Crown = 33,
    Shield = 34,
    Cloak = 35,
    SoftArmour = 36,
    Mail = 37,
    Light = 39,
    Amulet = 40,
    Ring = 45,
    Staff = 55,
    Horn = 66,
    Potion = 75,
    Flask = 77,
    Food = 80,
}

impl Tval {
    /// Hand weapons
    pub const fn is_weapon(self) -> bool {
        matches!(self, Tval::Digging | Tval::Hafted | Tval::Polearm | Tval::Sword)
    }

    /// Worn armour pieces
    pub const fn is_armour(self) -> bool {
        matches!(
            self,
            Tval::Boots
                | Tval::Gloves
                | Tval::Helm
                | Tval::Crown
                | Tval::Shield
                | Tval::Cloak
                | Tval::SoftArmour
                | Tval::Mail
        )
    }

    pub const fn is_jewellery(self) -> bool {
        matches!(self, Tval::Ring | Tval::Amulet)
    }
}

bitflags! {
    /// Object property flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjFlags: u64 {
        const SUST_STR = 1 << 0;
        const SUST_DEX = 1 << 1;
        const SUST_CON = 1 << 2;
        const SUST_GRA = 1 << 3;
        const PROT_FEAR = 1 << 4;
        const PROT_BLIND = 1 << 5;
        const PROT_CONF = 1 << 6;
        const PROT_STUN = 1 << 7;
        const PROT_POIS = 1 << 8;
        const PROT_HALLU = 1 << 9;
        const FREE_ACT = 1 << 10;
        const SEE_INVIS = 1 << 11;
        const REGEN = 1 << 12;
        const SLOW_DIGEST = 1 << 13;
        const LIGHT = 1 << 14;
        const SPEED = 1 << 15;
        const THROWING = 1 << 16;
        const HAND_AND_A_HALF = 1 << 17;
        const TWO_HANDED = 1 << 18;
        const INSTA_ART = 1 << 19;
        const NO_SMITHING = 1 << 20;
        const RES_FIRE = 1 << 21;
        const RES_COLD = 1 << 22;
        const RES_POIS = 1 << 23;
        const RES_DARK = 1 << 24;
        const DANGER = 1 << 25;
        const AGGRAVATE = 1 << 26;
    }
}

byte_flags!(ObjFlags, u64, crate::consts::OF_SIZE);

bitflags! {
    /// Curses carried by an object
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CurseFlags: u32 {
        const CURSED = 1 << 0;
        const PERMA_CURSE = 1 << 1;
        const HUNGER = 1 << 2;
        const DARKNESS = 1 << 3;
        const HAUNTED = 1 << 4;
        const VULNERABILITY = 1 << 5;
        const TELEPORT = 1 << 6;
    }
}

byte_flags!(CurseFlags, u32, crate::consts::CF_SIZE);

bitflags! {
    /// What the player has learned about an object
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IdentFlags: u32 {
        const KNOWN = 1 << 0;
        const SENSED = 1 << 1;
        const WORN = 1 << 2;
        const FIRED = 1 << 3;
        const EMPTY = 1 << 4;
        const CURSE_KNOWN = 1 << 5;
        const SPOILED = 1 << 6;
    }
}

byte_flags!(IdentFlags, u32, crate::consts::IF_SIZE);

/// A single object: an item on the floor, in a pack, or carried by a monster
///
/// `kind == 0` marks an unused slot in the object list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Object {
    /// Index of the kind definition
    pub kind: u16,
    pub tval: Tval,
    pub sval: u8,
    pub pval: i16,
    /// Stack size
    pub number: u8,
    /// Weight of one item, in tenths of a pound
    pub weight: i16,
    /// Floor position
    pub grid: Loc,

    /// Melee/archery accuracy modifier
    pub att: i16,
    /// Damage dice
    pub dd: u8,
    pub ds: u8,
    /// Evasion modifier
    pub evn: i16,
    /// Protection dice
    pub pd: u8,
    pub ps: u8,

    pub artifact: u8,
    pub ego: u8,
    pub timeout: i16,

    pub flags: ObjFlags,
    pub curses: CurseFlags,
    pub ident: IdentFlags,

    pub percent_res: [i16; MAX_P_RES],
    pub bonus_stat: [i16; STAT_MAX],
    pub bonus_other: [i16; MAX_P_BONUS],
    pub multiple_slay: [i16; MAX_P_SLAY],
    pub multiple_brand: [i16; MAX_P_BRAND],

    pub inscription: Quark,

    /// Monster carrying this object, if any
    pub held_m_idx: MonsterId,
    /// Next object in the same floor pile or monster inventory
    pub next_o_idx: ObjectId,

    /// How the object came into being
    pub origin: u8,
    pub origin_depth: u8,
    pub origin_race: u16,

    /// Seen by the player on the floor
    pub marked: bool,
}

impl Object {
    /// Unused slot?
    pub const fn is_empty(&self) -> bool {
        self.kind == 0
    }

    /// Total weight of the stack
    pub fn total_weight(&self) -> i32 {
        self.weight as i32 * self.number.max(1) as i32
    }

    pub fn is_artifact(&self) -> bool {
        self.artifact != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_bytes_zero_fill() {
        let flags = ObjFlags::from_bytes(&[0x10, 0x01]);
        assert!(flags.contains(ObjFlags::PROT_FEAR));
        assert!(flags.contains(ObjFlags::PROT_POIS));
        assert_eq!(flags.to_bytes()[2..], [0u8; 6]);
    }

    #[test]
    fn test_tval_from_repr() {
        assert_eq!(Tval::from_repr(34), Some(Tval::Shield));
        assert_eq!(Tval::from_repr(2), None);
        assert!(Tval::Sword.is_weapon());
        assert!(Tval::Ring.is_jewellery());
        assert!(!Tval::Ring.is_armour());
    }
}
