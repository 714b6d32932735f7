//! The message log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use crate::consts::MESSAGE_MAX;

/// Message channel, used by the front end to colour and filter
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    FromRepr,
)]
#[repr(u16)]
pub enum MessageType {
    #[default]
    Generic = 0,
    Hit = 1,
    Miss = 2,
    Flee = 3,
    Drain = 4,
    Recover = 5,
    Kill = 6,
    Death = 7,
    Afraid = 8,
    Poisoned = 9,
    Stun = 10,
    Cut = 11,
    Blind = 12,
    Confused = 13,
    Slow = 14,
    Fast = 15,
    Entranced = 16,
    Hallu = 17,
    Resist = 18,
    Hungry = 19,
    Song = 20,
    MonsterSpell = 21,
    Breath = 22,
    Shriek = 23,
    Earthquake = 24,
    Disarm = 25,
    Steal = 26,
    Eat = 27,
    Save = 28,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub typ: MessageType,
    /// Consecutive repeats folded into this entry
    pub count: u16,
}

/// Bounded log of recent messages, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    entries: VecDeque<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message, folding it into the previous one if identical
    pub fn add(&mut self, text: impl Into<String>, typ: MessageType) {
        let text = text.into();
        if let Some(last) = self.entries.back_mut() {
            if last.text == text && last.typ == typ {
                last.count = last.count.saturating_add(1);
                return;
            }
        }
        self.push(Message { text, typ, count: 1 });
    }

    /// Append without folding, as when loading
    pub fn push(&mut self, msg: Message) {
        if self.entries.len() >= MESSAGE_MAX {
            self.entries.pop_front();
        }
        self.entries.push_back(msg);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    pub fn last_text(&self) -> Option<&str> {
        self.entries.back().map(|m| m.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    /// Whether any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|m| m.text.contains(needle))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_fold() {
        let mut log = MessageLog::new();
        log.add("The orc misses you.", MessageType::Miss);
        log.add("The orc misses you.", MessageType::Miss);
        log.add("You feel better.", MessageType::Recover);
        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().next().unwrap().count, 2);
    }

    #[test]
    fn test_bounded() {
        let mut log = MessageLog::new();
        for i in 0..MESSAGE_MAX + 5 {
            log.add(format!("m{i}"), MessageType::Generic);
        }
        assert_eq!(log.len(), MESSAGE_MAX);
        assert_eq!(log.iter().next().unwrap().text, "m5");
    }
}
