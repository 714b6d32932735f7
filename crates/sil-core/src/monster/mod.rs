//! Monsters
//!
//! Live monster instances and their list, race definitions and lore, and
//! everything a monster does on its turn: melee blows, spells, movement.

pub mod blow;
mod list;
mod lore;
pub mod melee;
pub mod message;
mod monst;
pub mod process;
mod race;
pub mod spell;

pub use blow::{BlowContext, BlowEffect, BlowMethod};
pub use list::MonsterList;
pub use lore::MonsterLore;
pub use melee::make_attack_normal;
pub use message::{expand_message, monster_blow_method_action, monster_desc};
pub use monst::{
    ALERTNESS_ALERT, ALERTNESS_MAX, ALERTNESS_MIN, ALERTNESS_UNWARY, ALERTNESS_VERY_ALERT,
    Alertness, MON_TMD_MAX, MonTimed, Monster, MonsterId, Stance,
};
pub use process::process_monsters;
pub use race::{Bane, MonsterBlow, MonsterRace, RaceFlags, SpellFlags};
pub use spell::{
    MonsterSpell, SpellEffect, SpellKind, SpellLevel, choose_spell, do_mon_spell, remove_bad_spells,
};
