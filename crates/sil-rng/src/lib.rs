//! WELL1024a random number generator
//!
//! The generator behind every dice roll in the engine. Its full state is
//! exported so the savefile can restore the exact sequence after a reload.
//! A linear congruential "quick" mode exists for seeded, repeatable streams
//! such as flavor assignment.

use serde::{Deserialize, Serialize};

/// Number of 32-bit words in the generator state
pub const RAND_DEG: usize = 32;

const M1: usize = 3;
const M2: usize = 24;
const M3: usize = 10;

/// Linear congruential step used for seeding and the quick mode
#[inline]
pub const fn lcrng(x: u32) -> u32 {
    x.wrapping_mul(1_103_515_245).wrapping_add(12345)
}

/// Saveable generator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandState {
    /// Current value of the quick generator
    pub value: u32,
    /// Index of the current state word
    pub index: u32,
    /// The state words
    pub words: [u32; RAND_DEG],
}

/// WELL1024a generator context
#[derive(Clone, Serialize, Deserialize)]
pub struct Well1024a {
    state: [u32; RAND_DEG],
    state_i: usize,
    /// Current quick-mode value
    value: u32,
    /// When set, `rand_div` draws from the LCG instead of the WELL state
    quick: bool,
}

impl core::fmt::Debug for Well1024a {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Well1024a")
            .field("state_i", &self.state_i)
            .field("value", &self.value)
            .field("quick", &self.quick)
            .finish()
    }
}

impl Well1024a {
    /// Create a generator seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        let mut ctx = Self {
            state: [0; RAND_DEG],
            state_i: 0,
            value: seed,
            quick: false,
        };
        ctx.state_init(seed);
        ctx
    }

    /// Reseed the state table.
    ///
    /// The seed is propagated through the LCG and the table is then cycled
    /// ten times per degree so that nearby seeds diverge quickly.
    pub fn state_init(&mut self, seed: u32) {
        self.state[0] = seed;
        for i in 1..RAND_DEG {
            self.state[i] = lcrng(self.state[i - 1]);
        }
        self.state_i = 0;
        for _ in 0..RAND_DEG * 10 {
            let j = (self.state_i + 1) % RAND_DEG;
            self.state[j] = self.state[j].wrapping_add(self.state[self.state_i]);
            self.state_i = j;
        }
    }

    /// Advance the WELL state and return the next word.
    pub fn next_u32(&mut self) -> u32 {
        let i = self.state_i;
        let v0 = self.state[i];
        let vm1 = self.state[(i + M1) & 0x1f];
        let vm2 = self.state[(i + M2) & 0x1f];
        let vm3 = self.state[(i + M3) & 0x1f];
        let vrm1 = self.state[(i + 31) & 0x1f];

        let z0 = vrm1;
        let z1 = v0 ^ (vm1 ^ (vm1 >> 8));
        let z2 = (vm2 ^ (vm2 << 19)) ^ (vm3 ^ (vm3 << 14));
        self.state[i] = z1 ^ z2;
        self.state[(i + 31) & 0x1f] = (z0 ^ (z0 << 11)) ^ (z1 ^ (z1 << 7)) ^ (z2 ^ (z2 << 13));
        self.state_i = (i + 31) & 0x1f;
        self.state[self.state_i]
    }

    /// Returns a value in `0..m`, or 0 when `m <= 1`.
    pub fn rand_div(&mut self, m: u32) -> u32 {
        if m <= 1 {
            return 0;
        }
        let n = 0x1000_0000 / m;
        loop {
            let word = if self.quick {
                self.value = lcrng(self.value);
                self.value
            } else {
                self.next_u32()
            };
            let r = (word >> 4) / n;
            if r < m {
                return r;
            }
        }
    }

    /// Switch between the quick LCG stream and the WELL stream.
    pub fn set_quick(&mut self, quick: bool) {
        self.quick = quick;
    }

    /// Whether the quick stream is active
    pub fn is_quick(&self) -> bool {
        self.quick
    }

    /// Seed the quick stream.
    pub fn set_value(&mut self, value: u32) {
        self.value = value;
    }

    /// Export the state for saving
    pub fn export(&self) -> RandState {
        RandState {
            value: self.value,
            index: self.state_i as u32,
            words: self.state,
        }
    }

    /// Replace the state with a previously exported one
    pub fn import(&mut self, saved: &RandState) {
        self.value = saved.value;
        self.state_i = saved.index as usize & 0x1f;
        self.state = saved.words;
        self.quick = false;
    }
}

impl Default for Well1024a {
    fn default() -> Self {
        Self::new(0)
    }
}
