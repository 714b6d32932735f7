//! Game options
//!
//! Options live in a 256-bit set. Only the bits named by [`GameOption`] are
//! meaningful to this build; the rest keep their defaults when a savefile
//! written by another build is restored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Words of option bits
pub const OPT_WORDS: usize = 8;
/// Terminal windows with display flags
pub const WINDOW_MAX: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum GameOption {
    RogueLikeCommands = 0,
    UseOldTargetting = 1,
    AlwaysPickup = 2,
    AutoMore = 3,
    HybridWalls = 4,
    SolidWalls = 5,
    HpChangesColor = 6,
    EasyOpen = 7,
    EasyAlter = 8,
    CenterPlayer = 9,
    DisplayHits = 10,
    BirthDiscardItems = 64,
    BirthForceDescend = 65,
    BirthFixedExp = 66,
    CheatMonsters = 128,
    CheatRolls = 129,
}

impl GameOption {
    pub const fn default_value(self) -> bool {
        matches!(
            self,
            GameOption::AlwaysPickup
                | GameOption::HybridWalls
                | GameOption::HpChangesColor
                | GameOption::EasyOpen
                | GameOption::BirthFixedExp
        )
    }

    const fn bit(self) -> (usize, u32) {
        let i = self as usize;
        (i / 32, 1 << (i % 32))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    flags: [u32; OPT_WORDS],
    pub window_flag: [u32; WINDOW_MAX],
    pub hitpoint_warn: u8,
    pub delay_factor: u8,
}

impl Default for OptionSet {
    fn default() -> Self {
        let mut set = Self {
            flags: [0; OPT_WORDS],
            window_flag: [0; WINDOW_MAX],
            hitpoint_warn: 3,
            delay_factor: 4,
        };
        for opt in GameOption::iter() {
            set.set(opt, opt.default_value());
        }
        set
    }
}

impl OptionSet {
    pub fn get(&self, opt: GameOption) -> bool {
        let (w, b) = opt.bit();
        self.flags[w] & b != 0
    }

    pub fn set(&mut self, opt: GameOption, on: bool) {
        let (w, b) = opt.bit();
        if on {
            self.flags[w] |= b;
        } else {
            self.flags[w] &= !b;
        }
    }

    /// Raw option words
    pub fn words(&self) -> [u32; OPT_WORDS] {
        self.flags
    }

    /// Bits this build knows about
    pub fn known_mask() -> [u32; OPT_WORDS] {
        let mut mask = [0; OPT_WORDS];
        for opt in GameOption::iter() {
            let (w, b) = opt.bit();
            mask[w] |= b;
        }
        mask
    }

    /// Restore saved words: a bit is taken from `saved` only when both the
    /// saved mask and this build know it, otherwise it keeps its default
    pub fn restore(&mut self, saved: &[u32; OPT_WORDS], saved_mask: &[u32; OPT_WORDS]) {
        let defaults = OptionSet::default().flags;
        let known = Self::known_mask();
        for i in 0..OPT_WORDS {
            let take = saved_mask[i] & known[i];
            self.flags[i] = (saved[i] & take) | (defaults[i] & !take);
        }
    }

    /// Restore window flags under their saved masks
    pub fn restore_windows(&mut self, flags: &[u32; WINDOW_MAX], masks: &[u32; WINDOW_MAX]) {
        for i in 0..WINDOW_MAX {
            self.window_flag[i] = flags[i] & masks[i];
        }
    }
}

/// Per-user data directory for saves and scores
pub fn default_user_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sil")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let set = OptionSet::default();
        assert!(set.get(GameOption::AlwaysPickup));
        assert!(!set.get(GameOption::CheatRolls));
    }

    #[test]
    fn test_restore_respects_masks() {
        let mut saved = OptionSet::default();
        saved.set(GameOption::AlwaysPickup, false);
        saved.set(GameOption::CheatRolls, true);
        let mut words = saved.words();
        // An option from a newer build that this one does not know
        words[7] |= 1 << 31;

        let mut mask = OptionSet::known_mask();
        mask[7] |= 1 << 31;
        // Pretend the saving build did not know about CheatRolls
        let (w, b) = GameOption::CheatRolls.bit();
        mask[w] &= !b;

        let mut set = OptionSet::default();
        set.restore(&words, &mask);
        assert!(!set.get(GameOption::AlwaysPickup));
        assert!(!set.get(GameOption::CheatRolls));
        assert_eq!(set.words()[7], 0);
    }

    #[test]
    fn test_window_restore() {
        let mut set = OptionSet::default();
        set.restore_windows(&[0xff; WINDOW_MAX], &[0x0f; WINDOW_MAX]);
        assert_eq!(set.window_flag[3], 0x0f);
    }
}
