//! Stats and skills

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

/// Physical attributes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum Stat {
    #[strum(serialize = "strength")]
    Str = 0,
    #[strum(serialize = "dexterity")]
    Dex = 1,
    #[strum(serialize = "constitution")]
    Con = 2,
    #[strum(serialize = "grace")]
    Gra = 3,
}

/// Skill channels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum Skill {
    Melee = 0,
    Archery = 1,
    Evasion = 2,
    Stealth = 3,
    Perception = 4,
    Will = 5,
    Smithing = 6,
    Song = 7,
}

impl Skill {
    /// The stat that feeds this skill
    pub const fn stat(self) -> Stat {
        match self {
            Skill::Melee | Skill::Archery | Skill::Evasion | Skill::Stealth => Stat::Dex,
            Skill::Perception | Skill::Will | Skill::Smithing | Skill::Song => Stat::Gra,
        }
    }
}
