//! The player record

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use super::{AbilitySet, Ability, Skill, Stat, TimedEffect, TMD_MAX};
use crate::consts::{EQUIP_MAX, PY_MAX_LEVEL, SKILL_MAX, STAT_MAX};
use crate::dungeon::Loc;
use crate::monster::Bane;
use crate::object::Object;

/// Equipment slots, in save order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum EquipSlot {
    Weapon = 0,
    Bow = 1,
    Ring1 = 2,
    Ring2 = 3,
    Amulet = 4,
    Light = 5,
    Body = 6,
    Cloak = 7,
    Shield = 8,
    Head = 9,
    Hands = 10,
    Feet = 11,
}

impl EquipSlot {
    pub const fn is_jewellery(self) -> bool {
        matches!(self, EquipSlot::Ring1 | EquipSlot::Ring2 | EquipSlot::Amulet)
    }
}

/// Songs the player can sing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    FromRepr,
)]
#[repr(u8)]
pub enum Song {
    #[default]
    None = 0,
    Elbereth = 1,
    Este = 2,
    Silence = 3,
    Staying = 4,
    Sharpness = 5,
    Freedom = 6,
    Trees = 7,
    Lorien = 8,
}

impl Song {
    /// The ability that teaches this song
    pub const fn ability(self) -> Option<Ability> {
        match self {
            Song::None => None,
            Song::Elbereth => Some(Ability::SongOfElbereth),
            Song::Este => Some(Ability::SongOfEste),
            Song::Silence => Some(Ability::SongOfSilence),
            Song::Staying => Some(Ability::SongOfStaying),
            Song::Sharpness => Some(Ability::SongOfSharpness),
            Song::Freedom => Some(Ability::SongOfFreedom),
            Song::Trees => Some(Ability::SongOfTrees),
            Song::Lorien => Some(Ability::SongOfLorien),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub died_from: String,
    /// Background text
    pub history: String,

    pub race: u8,
    pub house: u8,
    pub sex: u8,

    /// Stats before drain
    pub stat_base: [i16; STAT_MAX],
    /// Stats after drain
    pub stat_cur: [i16; STAT_MAX],
    /// Stats after equipment, recomputed by the bonus pass
    #[serde(skip)]
    pub stat_use: [i16; STAT_MAX],

    pub skill_base: [i16; SKILL_MAX],
    /// Skills after stats, race, house and equipment
    #[serde(skip)]
    pub skill_use: [i16; SKILL_MAX],

    pub exp: u32,
    pub new_exp: u32,
    pub encounter_exp: u32,

    pub mhp: i16,
    pub chp: i16,
    pub chp_frac: u16,
    pub msp: i16,
    pub csp: i16,
    pub csp_frac: u16,

    /// Level of the dungeon (0 is the surface)
    pub depth: i16,
    pub max_depth: i16,
    pub stage: i32,
    pub grid: Loc,
    pub energy: u8,

    pub timed: [i32; TMD_MAX],

    pub equipment: [Option<Object>; EQUIP_MAX],
    pub inventory: Vec<Object>,

    pub innate: AbilitySet,
    pub active: AbilitySet,

    pub song1: Song,
    pub song2: Song,
    pub song_duration: i16,

    /// Hit point table, one entry per level
    pub player_hp: Vec<i16>,

    /// Rolls take the worse of two dice
    pub cursed: bool,
    pub bane: Option<Bane>,
    pub truce: bool,
    /// Attacked during the previous turn
    pub attacked_last_turn: bool,
    pub consecutive_attacks: u8,

    pub is_dead: bool,
    pub escaped: bool,
    pub morgoth_slain: bool,
    pub silmarils: u8,
    pub noscore: u16,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            name: String::new(),
            died_from: String::new(),
            history: String::new(),
            race: 0,
            house: 0,
            sex: 0,
            stat_base: [0; STAT_MAX],
            stat_cur: [0; STAT_MAX],
            stat_use: [0; STAT_MAX],
            skill_base: [0; SKILL_MAX],
            skill_use: [0; SKILL_MAX],
            exp: 0,
            new_exp: 0,
            encounter_exp: 0,
            mhp: 1,
            chp: 1,
            chp_frac: 0,
            msp: 0,
            csp: 0,
            csp_frac: 0,
            depth: 0,
            max_depth: 0,
            stage: 0,
            grid: Loc::default(),
            energy: 0,
            timed: [0; TMD_MAX],
            equipment: Default::default(),
            inventory: Vec::new(),
            innate: AbilitySet::default(),
            active: AbilitySet::default(),
            song1: Song::None,
            song2: Song::None,
            song_duration: 0,
            player_hp: vec![0; PY_MAX_LEVEL],
            cursed: false,
            bane: None,
            truce: false,
            attacked_last_turn: false,
            consecutive_attacks: 0,
            is_dead: false,
            escaped: false,
            morgoth_slain: false,
            silmarils: 0,
            noscore: 0,
        }
    }
}

impl Player {
    pub fn stat(&self, s: Stat) -> i16 {
        self.stat_use[s as usize]
    }

    pub fn skill(&self, s: Skill) -> i32 {
        self.skill_use[s as usize] as i32
    }

    pub fn timed(&self, t: TimedEffect) -> i32 {
        self.timed[t as usize]
    }

    /// Whether an ability is both learned and switched on
    pub fn active_ability(&self, a: Ability) -> bool {
        self.active.has(a)
    }

    pub fn is_singing(&self, song: Song) -> bool {
        song != Song::None && (self.song1 == song || self.song2 == song)
    }

    pub fn equipped(&self, slot: EquipSlot) -> Option<&Object> {
        self.equipment[slot as usize].as_ref()
    }

    /// Equipped items with their slots
    pub fn equipment_iter(&self) -> impl Iterator<Item = (EquipSlot, &Object)> {
        self.equipment
            .iter()
            .enumerate()
            .filter_map(|(i, o)| Some((EquipSlot::from_repr(i as u8)?, o.as_ref()?)))
    }
}
