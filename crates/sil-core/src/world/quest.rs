//! Quests

use serde::{Deserialize, Serialize};

/// A kill quest
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    /// Dungeon level of the quest monster
    pub level: u8,
    /// Race to kill
    pub race: u16,
    pub cur_num: u8,
    pub max_num: u8,
}

impl Quest {
    pub fn is_complete(&self) -> bool {
        self.cur_num >= self.max_num
    }
}
