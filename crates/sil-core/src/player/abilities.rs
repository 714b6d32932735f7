//! Abilities
//!
//! Each skill has up to sixteen abilities, stored as one bit word per skill.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::Skill;
use crate::consts::SKILL_MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Ability {
    // Melee
    Power,
    Finesse,
    KnockOut,
    Charge,
    FollowThrough,
    Subtlety,
    ZoneOfControl,
    RapidAttack,
    // Archery
    Rout,
    PointBlank,
    Precision,
    DeadlyHail,
    // Evasion
    Dodging,
    Blocking,
    Parry,
    CrowdFighting,
    Sidestep,
    ArmourProficiency,
    // Stealth
    Disguise,
    Assassination,
    Vanish,
    // Perception
    KeenSenses,
    Concentration,
    Alchemy,
    Bane,
    Listen,
    // Will
    CurseBreaking,
    Channeling,
    InnerLight,
    Hardiness,
    CriticalResistance,
    PoisonResistance,
    Indomitable,
    // Smithing
    Weaponsmith,
    Armoursmith,
    Jeweller,
    Enchantment,
    // Song
    SongOfElbereth,
    SongOfEste,
    SongOfSilence,
    SongOfStaying,
    SongOfSharpness,
    SongOfFreedom,
    SongOfTrees,
    SongOfLorien,
}

impl Ability {
    /// Skill tree and bit index within it
    pub const fn position(self) -> (Skill, u8) {
        use Ability::*;
        match self {
            Power => (Skill::Melee, 0),
            Finesse => (Skill::Melee, 1),
            KnockOut => (Skill::Melee, 2),
            Charge => (Skill::Melee, 3),
            FollowThrough => (Skill::Melee, 4),
            Subtlety => (Skill::Melee, 5),
            ZoneOfControl => (Skill::Melee, 6),
            RapidAttack => (Skill::Melee, 7),
            Rout => (Skill::Archery, 0),
            PointBlank => (Skill::Archery, 1),
            Precision => (Skill::Archery, 2),
            DeadlyHail => (Skill::Archery, 3),
            Dodging => (Skill::Evasion, 0),
            Blocking => (Skill::Evasion, 1),
            Parry => (Skill::Evasion, 2),
            CrowdFighting => (Skill::Evasion, 3),
            Sidestep => (Skill::Evasion, 4),
            ArmourProficiency => (Skill::Evasion, 5),
            Disguise => (Skill::Stealth, 0),
            Assassination => (Skill::Stealth, 1),
            Vanish => (Skill::Stealth, 2),
            KeenSenses => (Skill::Perception, 0),
            Concentration => (Skill::Perception, 1),
            Alchemy => (Skill::Perception, 2),
            Bane => (Skill::Perception, 3),
            Listen => (Skill::Perception, 4),
            CurseBreaking => (Skill::Will, 0),
            Channeling => (Skill::Will, 1),
            InnerLight => (Skill::Will, 2),
            Hardiness => (Skill::Will, 3),
            CriticalResistance => (Skill::Will, 4),
            PoisonResistance => (Skill::Will, 5),
            Indomitable => (Skill::Will, 6),
            Weaponsmith => (Skill::Smithing, 0),
            Armoursmith => (Skill::Smithing, 1),
            Jeweller => (Skill::Smithing, 2),
            Enchantment => (Skill::Smithing, 3),
            SongOfElbereth => (Skill::Song, 0),
            SongOfEste => (Skill::Song, 1),
            SongOfSilence => (Skill::Song, 2),
            SongOfStaying => (Skill::Song, 3),
            SongOfSharpness => (Skill::Song, 4),
            SongOfFreedom => (Skill::Song, 5),
            SongOfTrees => (Skill::Song, 6),
            SongOfLorien => (Skill::Song, 7),
        }
    }
}

/// A set of abilities, one 16-bit word per skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilitySet(pub [u16; SKILL_MAX]);

impl AbilitySet {
    pub fn has(&self, a: Ability) -> bool {
        let (skill, bit) = a.position();
        self.0[skill as usize] & (1 << bit) != 0
    }

    pub fn insert(&mut self, a: Ability) {
        let (skill, bit) = a.position();
        self.0[skill as usize] |= 1 << bit;
    }

    pub fn remove(&mut self, a: Ability) {
        let (skill, bit) = a.position();
        self.0[skill as usize] &= !(1 << bit);
    }

    /// Abilities held in one skill tree
    pub fn count_in(&self, skill: Skill) -> u32 {
        self.0[skill as usize].count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_positions_unique() {
        let mut seen = AbilitySet::default();
        for a in Ability::iter() {
            assert!(!seen.has(a), "{a} collides");
            seen.insert(a);
        }
        assert_eq!(seen.count_in(Skill::Song), 8);
    }

    #[test]
    fn test_remove() {
        let mut set = AbilitySet::default();
        set.insert(Ability::Blocking);
        set.insert(Ability::Dodging);
        set.remove(Ability::Blocking);
        assert!(!set.has(Ability::Blocking));
        assert!(set.has(Ability::Dodging));
    }
}
