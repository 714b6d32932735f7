//! What the player knows about each monster race

use serde::{Deserialize, Serialize};

use super::race::{RaceFlags, SpellFlags};
use crate::consts::MONSTER_BLOW_MAX;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonsterLore {
    /// Times seen
    pub sights: u16,
    /// Player deaths caused
    pub deaths: u16,
    /// Kills by this player
    pub pkills: u16,
    /// Kills by all players
    pub tkills: u16,
    pub wake: u8,
    pub ignore: u8,
    pub drop_gold: u8,
    pub drop_item: u8,
    pub cast_innate: u8,
    pub cast_spell: u8,
    pub notice: u8,
    /// Times each blow has been observed
    pub blows: [u8; MONSTER_BLOW_MAX],
    pub flags: RaceFlags,
    pub spell_flags: SpellFlags,
    pub all_known: bool,
}

impl MonsterLore {
    /// Note an observed blow
    pub fn saw_blow(&mut self, i: usize) {
        if let Some(b) = self.blows.get_mut(i) {
            *b = b.saturating_add(1);
        }
    }
}
