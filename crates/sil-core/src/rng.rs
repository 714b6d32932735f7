//! Random number generation for the game
//!
//! Wraps the WELL1024a generator with the dice helpers the rules use.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use sil_rng::{RandState, Well1024a};

/// How a dice expression is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aspect {
    /// Roll the dice
    #[default]
    Randomise,
    /// Every die shows 1
    Minimise,
    /// Every die shows its average, rounded down over the total
    Average,
    /// Every die shows its maximum
    Maximise,
}

/// Game random number generator
///
/// Besides the seeded WELL stream, a queue of fixed results can be loaded
/// with [`GameRng::fixed`]. While the queue is non-empty, every draw pops the
/// next value (reduced modulo the requested range) instead of advancing the
/// generator.
#[derive(Debug, Clone)]
pub struct GameRng {
    well: Well1024a,
    seed: u32,
    fixed: VecDeque<u32>,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            well: Well1024a::new(seed),
            seed,
            fixed: VecDeque::new(),
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Create an RNG that first returns the given raw `rand_div` results
    pub fn fixed(values: &[u32]) -> Self {
        let mut rng = Self::new(0);
        rng.push_fixed(values);
        rng
    }

    /// Queue further fixed results
    pub fn push_fixed(&mut self, values: &[u32]) {
        self.fixed.extend(values.iter().copied());
    }

    /// Fixed results not yet consumed
    pub fn fixed_remaining(&self) -> usize {
        self.fixed.len()
    }

    /// Seed used to create this RNG
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Returns 0..m-1, or 0 when `m <= 1`
    pub fn rand_div(&mut self, m: u32) -> u32 {
        if m <= 1 {
            return 0;
        }
        match self.fixed.pop_front() {
            Some(v) => v % m,
            None => self.well.rand_div(m),
        }
    }

    /// Returns 0..m-1, or 0 when `m <= 0`
    pub fn randint0(&mut self, m: i32) -> i32 {
        if m <= 0 {
            return 0;
        }
        self.rand_div(m as u32) as i32
    }

    /// Returns 1..=m, or 0 when `m <= 0`
    pub fn randint1(&mut self, m: i32) -> i32 {
        if m <= 0 {
            return 0;
        }
        self.randint0(m) + 1
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: i32) -> bool {
        self.randint0(n) == 0
    }

    /// Returns true with probability p/100
    pub fn percent(&mut self, p: i32) -> bool {
        self.randint0(100) < p
    }

    /// Sum of `num` rolls of 1..=sides
    pub fn damroll(&mut self, num: i32, sides: i32) -> i32 {
        if num <= 0 || sides <= 0 {
            return 0;
        }
        (0..num).map(|_| self.randint1(sides)).sum()
    }

    /// Evaluate `num`d`sides` under the given aspect
    pub fn aspect_roll(&mut self, num: i32, sides: i32, aspect: Aspect) -> i32 {
        if num <= 0 || sides <= 0 {
            return 0;
        }
        match aspect {
            Aspect::Randomise => self.damroll(num, sides),
            Aspect::Minimise => num,
            Aspect::Average => num * (sides + 1) / 2,
            Aspect::Maximise => num * sides,
        }
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.randint0(items.len() as i32) as usize])
        }
    }

    /// Switch to or from the quick stream seeded with `value`
    pub fn set_quick(&mut self, quick: bool, value: u32) {
        self.well.set_value(value);
        self.well.set_quick(quick);
    }

    /// Export the generator state for saving
    pub fn export(&self) -> RandState {
        self.well.export()
    }

    /// Restore a saved generator state
    pub fn import(&mut self, state: &RandState) {
        self.well.import(state);
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
