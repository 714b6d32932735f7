//! Monster instances

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use crate::dungeon::Loc;
use crate::object::ObjectId;

/// Index into the monster list; 0 means "none"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MonsterId(pub u16);

impl MonsterId {
    pub const NONE: MonsterId = MonsterId(0);

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

pub const ALERTNESS_MIN: i16 = -20;
pub const ALERTNESS_UNWARY: i16 = 0;
pub const ALERTNESS_ALERT: i16 = 10;
pub const ALERTNESS_VERY_ALERT: i16 = 20;
pub const ALERTNESS_MAX: i16 = 20;

/// How awake a monster is, derived from its raw alertness value
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum Alertness {
    DeeplyAsleep,
    Asleep,
    Unwary,
    Alert,
    VeryAlert,
}

impl Alertness {
    pub fn from_value(v: i16) -> Self {
        match v {
            v if v < -10 => Alertness::DeeplyAsleep,
            v if v < ALERTNESS_UNWARY => Alertness::Asleep,
            v if v < ALERTNESS_ALERT => Alertness::Unwary,
            v if v < ALERTNESS_VERY_ALERT => Alertness::Alert,
            _ => Alertness::VeryAlert,
        }
    }
}

/// Attitude toward the player
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum Stance {
    Allied = 0,
    Fleeing = 1,
    #[default]
    Confident = 2,
    Aggressive = 3,
}

/// Timed monster conditions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum MonTimed {
    Stun = 0,
    Conf = 1,
    Fear = 2,
    Hold = 3,
    Slow = 4,
    Fast = 5,
}

pub const MON_TMD_MAX: usize = 6;

/// A live monster
///
/// `race == 0` marks an unused slot in the monster list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Monster {
    /// Index of the race definition
    pub race: u16,
    /// Race before a shapechange, or 0
    pub original_race: u16,
    pub grid: Loc,
    pub hp: i32,
    pub maxhp: i32,
    pub mana: u8,
    pub song: u8,
    pub energy: u8,
    pub mspeed: u8,
    /// Raw alertness, see [`Alertness`]
    pub alertness: i16,
    pub stance: Stance,
    pub morale: i16,
    pub tmp_morale: i16,
    pub timed: [i16; MON_TMD_MAX],
    /// Square the monster is heading for
    pub target: Loc,
    pub group: u16,
    /// Territory anchor for territorial monsters
    pub home: Loc,
    /// Head of the carried object chain
    pub hold_o_idx: ObjectId,
    /// Currently visible to the player
    pub ml: bool,
    pub skip_next_turn: bool,
    pub consecutive_attacks: u8,
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.race != 0
    }

    pub fn alertness_level(&self) -> Alertness {
        Alertness::from_value(self.alertness)
    }

    /// Aware of the player
    pub fn is_alert(&self) -> bool {
        self.alertness >= ALERTNESS_ALERT
    }

    pub fn is_asleep(&self) -> bool {
        self.alertness < ALERTNESS_UNWARY
    }

    pub fn timed(&self, t: MonTimed) -> i16 {
        self.timed[t as usize]
    }

    pub fn is_shapechanged(&self) -> bool {
        self.original_race != 0
    }

    pub fn set_alertness(&mut self, v: i16) {
        self.alertness = v.clamp(ALERTNESS_MIN, ALERTNESS_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alertness_grades() {
        assert_eq!(Alertness::from_value(-20), Alertness::DeeplyAsleep);
        assert_eq!(Alertness::from_value(-1), Alertness::Asleep);
        assert_eq!(Alertness::from_value(0), Alertness::Unwary);
        assert_eq!(Alertness::from_value(10), Alertness::Alert);
        assert_eq!(Alertness::from_value(25), Alertness::VeryAlert);
    }

    #[test]
    fn test_alertness_clamped() {
        let mut mon = Monster::default();
        mon.set_alertness(100);
        assert_eq!(mon.alertness, ALERTNESS_MAX);
        mon.set_alertness(-100);
        assert!(mon.is_asleep());
    }
}
