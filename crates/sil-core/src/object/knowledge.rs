//! What the player has learned about object kinds

use serde::{Deserialize, Serialize};

/// Player knowledge of one object kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KindKnowledge {
    /// Flavor is known
    pub aware: bool,
    /// Has been tried without learning what it is
    pub tried: bool,
    /// Has ever been seen
    pub everseen: bool,
    /// Ignored (squelched) by the player
    pub ignore: bool,
}

impl KindKnowledge {
    /// Packed form used by the object memory block
    pub fn to_byte(self) -> u8 {
        (self.aware as u8) | (self.tried as u8) << 1 | (self.everseen as u8) << 2
    }

    pub fn from_byte(b: u8, ignore: bool) -> Self {
        Self {
            aware: b & 0x01 != 0,
            tried: b & 0x02 != 0,
            everseen: b & 0x04 != 0,
            ignore,
        }
    }
}
