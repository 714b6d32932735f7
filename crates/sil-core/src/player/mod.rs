//! Player system
//!
//! The player record, stats and skills, abilities, timed effects and
//! character creation.

mod abilities;
pub mod birth;
pub mod calcs;
mod skills;
mod state;
mod timed;
mod timed_data;

pub use abilities::{Ability, AbilitySet};
pub use birth::{BirthChoices, BirthError, player_birth};
pub use skills::{Skill, Stat};
pub use state::{EquipSlot, Player, Song};
pub use timed::{
    STUN_HEAVY_MAX, TMD_MAX, TimedEffect, clear_timed, dec_timed, decrease_timeouts, inc_timed,
    set_timed,
};
pub use timed_data::{ChangeGrade, GradeChain, TimedDescriptor, TimedGrade, TimedTable};
