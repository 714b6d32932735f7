//! The character history log

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::bitset::byte_flags;
use crate::consts::HISTORY_MAX;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HistoryFlags: u16 {
        const PLAYER_BIRTH = 1 << 0;
        const ARTIFACT_UNKNOWN = 1 << 1;
        const ARTIFACT_KNOWN = 1 << 2;
        const ARTIFACT_LOST = 1 << 3;
        const PLAYER_DEATH = 1 << 4;
        const SLAY_UNIQUE = 1 << 5;
        const USER_INPUT = 1 << 6;
        const SAVEFILE_IMPORT = 1 << 7;
        const GAIN_LEVEL = 1 << 8;
        const GENERIC = 1 << 9;
        const FELL_IN_CHASM = 1 << 10;
        const SILMARIL = 1 << 11;
        const ESCAPED = 1 << 12;
    }
}

byte_flags!(HistoryFlags, u16, crate::consts::HIST_SIZE);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub flags: HistoryFlags,
    /// Dungeon level
    pub dlev: i16,
    /// Game turn
    pub turn: i32,
    /// Related artifact, or 0
    pub a_idx: u16,
    pub event: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, flags: HistoryFlags, dlev: i16, turn: i32, event: impl Into<String>) {
        self.push(HistoryEntry {
            flags,
            dlev,
            turn,
            a_idx: 0,
            event: event.into(),
        });
    }

    /// Record an artifact event, merging with an earlier entry for the
    /// same artifact when it becomes known
    pub fn add_artifact(&mut self, a_idx: u16, dlev: i16, turn: i32, known: bool, name: &str) {
        if known {
            if let Some(e) = self
                .entries
                .iter_mut()
                .find(|e| e.a_idx == a_idx && e.flags.contains(HistoryFlags::ARTIFACT_UNKNOWN))
            {
                e.flags.remove(HistoryFlags::ARTIFACT_UNKNOWN);
                e.flags.insert(HistoryFlags::ARTIFACT_KNOWN);
                e.event = format!("Found {name}");
                return;
            }
        }
        let flag = if known {
            HistoryFlags::ARTIFACT_KNOWN
        } else {
            HistoryFlags::ARTIFACT_UNKNOWN
        };
        self.push(HistoryEntry {
            flags: flag,
            dlev,
            turn,
            a_idx,
            event: format!("Found {name}"),
        });
    }

    /// Append an entry; a full history drops it
    pub fn push(&mut self, entry: HistoryEntry) -> bool {
        if self.entries.len() >= HISTORY_MAX {
            log::warn!("history full, dropping \"{}\"", entry.event);
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_becomes_known() {
        let mut h = History::new();
        h.add_artifact(5, 3, 100, false, "a Sword");
        h.add_artifact(5, 4, 200, true, "the Sword 'Anguirel'");
        assert_eq!(h.len(), 1);
        let e = h.iter().next().unwrap();
        assert!(e.flags.contains(HistoryFlags::ARTIFACT_KNOWN));
        assert_eq!(e.dlev, 3);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut h = History::new();
        for turn in 0..HISTORY_MAX as i32 {
            h.add(HistoryFlags::GENERIC, 1, turn, "Rested.");
        }
        h.add(HistoryFlags::SILMARIL, 21, 9999, "Cut a Silmaril.");
        assert_eq!(h.len(), HISTORY_MAX);
        assert!(h.iter().all(|e| e.flags == HistoryFlags::GENERIC));
    }
}
