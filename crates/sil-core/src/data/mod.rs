//! Read-only definition tables
//!
//! Everything the engine looks up but never changes: monster races, object
//! kinds, artifacts, trap kinds, timed effect descriptors, monster spells,
//! and the races and houses of the player. Parsing the data files is left
//! to the embedding program; [`GameData::standard`] provides a small
//! built-in set.

mod standard;

use thiserror::Error;

use crate::consts::{SKILL_MAX, STAT_MAX};
use crate::dungeon::TrapKind;
use crate::monster::{MonsterRace, MonsterSpell, SpellFlags};
use crate::object::{Artifact, ObjectKind};
use crate::player::{AbilitySet, TimedTable};
use crate::world::Quest;

/// Problems with definition tables
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("Unknown {kind} name: '{name}'")]
    UnknownName { kind: &'static str, name: String },

    #[error("Bad table: {0}")]
    BadTable(String),
}

/// A race the player can belong to
#[derive(Debug, Clone, Default)]
pub struct PlayerRace {
    pub name: String,
    pub stat_adj: [i16; STAT_MAX],
    pub skill_adj: [i16; SKILL_MAX],
    /// Counts as an elf for elf-bane monsters
    pub elven: bool,
    /// Object kinds a new character starts with
    pub start_kit: Vec<u16>,
}

/// A house within a player race
#[derive(Debug, Clone, Default)]
pub struct House {
    pub name: String,
    /// Index of the race the house belongs to
    pub race: u8,
    pub stat_adj: [i16; STAT_MAX],
    pub skill_adj: [i16; SKILL_MAX],
    /// Abilities every member starts with
    pub abilities: AbilitySet,
}

#[derive(Debug, Clone)]
pub struct GameData {
    /// Monster races; index 0 is a placeholder
    pub races: Vec<MonsterRace>,
    /// Object kinds; index 0 is a placeholder
    pub kinds: Vec<ObjectKind>,
    pub artifacts: Vec<Artifact>,
    pub trap_kinds: Vec<TrapKind>,
    pub timed: TimedTable,
    pub spells: Vec<MonsterSpell>,
    pub player_races: Vec<PlayerRace>,
    pub houses: Vec<House>,
    pub quests: Vec<Quest>,
}

impl GameData {
    /// Descriptor of a single monster spell
    pub fn spell(&self, flag: SpellFlags) -> Option<&MonsterSpell> {
        self.spells.iter().find(|s| s.flag == flag)
    }

    /// Index of a monster race by name, ignoring case
    pub fn race_by_name(&self, name: &str) -> Result<u16, DataError> {
        self.races
            .iter()
            .position(|r| r.name.eq_ignore_ascii_case(name))
            .map(|i| i as u16)
            .ok_or_else(|| DataError::UnknownName {
                kind: "monster race",
                name: name.to_string(),
            })
    }

    /// Index of an object kind by name, ignoring case
    pub fn kind_by_name(&self, name: &str) -> Result<u16, DataError> {
        self.kinds
            .iter()
            .position(|k| k.name.eq_ignore_ascii_case(name))
            .map(|i| i as u16)
            .ok_or_else(|| DataError::UnknownName {
                kind: "object kind",
                name: name.to_string(),
            })
    }
}
