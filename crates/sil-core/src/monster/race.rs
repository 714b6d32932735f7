//! Monster race definitions (read-only tables)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use super::blow::{BlowEffect, BlowMethod};
use crate::bitset::byte_flags;

bitflags! {
    /// Race flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RaceFlags: u64 {
        const UNIQUE = 1 << 0;
        const QUESTOR = 1 << 1;
        const MALE = 1 << 2;
        const FEMALE = 1 << 3;
        const NEVER_MOVE = 1 << 4;
        const NEVER_BLOW = 1 << 5;
        const SMART = 1 << 6;
        const TERRITORIAL = 1 << 7;
        const FRIENDS = 1 << 8;
        const ESCORTS = 1 << 9;
        const RES_CRIT = 1 << 10;
        const NO_CRIT = 1 << 11;
        const HURT_LITE = 1 << 12;
        const SEE_INVIS = 1 << 13;
        const ELFBANE = 1 << 14;
        const NO_SLEEP = 1 << 15;
        const NO_FEAR = 1 << 16;
        const NO_CONF = 1 << 17;
        const NO_STUN = 1 << 18;
        const RES_FIRE = 1 << 19;
        const RES_COLD = 1 << 20;
        const RES_POIS = 1 << 21;
        const ORC = 1 << 22;
        const TROLL = 1 << 23;
        const SERPENT = 1 << 24;
        const DRAGON = 1 << 25;
        const RAUKO = 1 << 26;
        const UNDEAD = 1 << 27;
        const SPIDER = 1 << 28;
        const WOLF = 1 << 29;
        const MAN = 1 << 30;
        const ELF = 1 << 31;
        const KILL_WALL = 1 << 32;
        const SHAPECHANGER = 1 << 33;
        const CRUEL_BLOW = 1 << 34;
        const HIT_BY_SONG = 1 << 35;
    }
}

byte_flags!(RaceFlags, u64, crate::consts::RF_SIZE);

bitflags! {
    /// Spells and ranged powers a race can use
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpellFlags: u32 {
        const SHRIEK = 1 << 0;
        const SCREECH = 1 << 1;
        const RALLY = 1 << 2;
        const ARROW1 = 1 << 3;
        const ARROW2 = 1 << 4;
        const BOULDER = 1 << 5;
        const BR_FIRE = 1 << 6;
        const BR_COLD = 1 << 7;
        const BR_POIS = 1 << 8;
        const BR_DARK = 1 << 9;
        const EARTHQUAKE = 1 << 10;
        const SHATTER = 1 << 11;
        const SCARE = 1 << 12;
        const CONF = 1 << 13;
        const HOLD = 1 << 14;
        const SLOW = 1 << 15;
        const DARKNESS = 1 << 16;
        const SNG_BIND = 1 << 17;
        const SNG_PIERCE = 1 << 18;
        const SNG_OATHS = 1 << 19;
    }
}

byte_flags!(SpellFlags, u32, crate::consts::RSF_SIZE);

/// Monster categories a player can specialise against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum Bane {
    Orc = 1,
    Troll = 2,
    Serpent = 3,
    Dragon = 4,
    Rauko = 5,
    Undead = 6,
    Spider = 7,
    Wolf = 8,
    Man = 9,
}

impl Bane {
    pub const fn flag(self) -> RaceFlags {
        match self {
            Bane::Orc => RaceFlags::ORC,
            Bane::Troll => RaceFlags::TROLL,
            Bane::Serpent => RaceFlags::SERPENT,
            Bane::Dragon => RaceFlags::DRAGON,
            Bane::Rauko => RaceFlags::RAUKO,
            Bane::Undead => RaceFlags::UNDEAD,
            Bane::Spider => RaceFlags::SPIDER,
            Bane::Wolf => RaceFlags::WOLF,
            Bane::Man => RaceFlags::MAN,
        }
    }
}

/// One melee attack of a race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterBlow {
    pub method: BlowMethod,
    pub effect: BlowEffect,
    /// Attack score for this blow
    pub att: i16,
    pub dd: u8,
    pub ds: u8,
}

/// A monster race
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonsterRace {
    pub name: String,
    pub plural: Option<String>,
    pub level: i32,
    pub rarity: u8,
    /// Energy per game turn at normal speed
    pub speed: u8,
    /// Hit dice
    pub hdice: i32,
    pub hside: i32,
    /// Evasion score
    pub evn: i32,
    /// Protection dice
    pub pd: i32,
    pub ps: i32,
    pub light: i8,
    pub sleep: i16,
    /// Perception skill
    pub per: i32,
    pub stl: i32,
    pub will: i32,
    pub spell_power: i32,
    pub mana: u8,
    /// Ranged action chance: 1 in `freq_ranged` turns
    pub freq_ranged: u8,
    pub flags: RaceFlags,
    pub spell_flags: SpellFlags,
    pub blows: Vec<MonsterBlow>,
}

impl MonsterRace {
    pub fn is_unique(&self) -> bool {
        self.flags.contains(RaceFlags::UNIQUE)
    }

    /// Possessive pronoun for the race
    pub fn possessive(&self) -> &'static str {
        if self.flags.contains(RaceFlags::FEMALE) {
            "her"
        } else if self.flags.contains(RaceFlags::MALE) {
            "his"
        } else {
            "its"
        }
    }
}
