//! Timed effect descriptors
//!
//! Every effect carries exactly one threshold chain. A graded chain names
//! bands of the effect's value; a changing chain picks its increase message
//! from the size of the change instead.

use serde::{Deserialize, Serialize};

use super::TimedEffect;
use crate::combat::Element;
use crate::data::DataError;
use crate::object::ObjFlags;
use crate::world::{MessageType, Redraw};

/// A named band of a graded effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedGrade {
    /// Highest value inside this band
    pub max: i32,
    pub name: String,
    pub color: u8,
    /// Shown when the value climbs into this band
    pub up_msg: Option<String>,
    /// Shown when the value falls into this band
    pub down_msg: Option<String>,
}

/// An increase bucket of a changing effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeGrade {
    /// Largest increase that uses this bucket
    pub max: i32,
    pub inc_msg: String,
    /// Used instead when the effect was already active
    pub inc_msg_active: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeChain {
    Graded(Vec<TimedGrade>),
    Changing {
        steps: Vec<ChangeGrade>,
        /// Largest value the effect can hold
        max: i32,
        /// A decrease larger than `ceil(old / divisor)` always notifies
        divisor: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedDescriptor {
    pub name: String,
    pub on_end: Option<String>,
    pub on_increase: Option<String>,
    pub on_decrease: Option<String>,
    pub msg_type: MessageType,
    /// Equipment flag that protects against the effect
    pub fail: Option<ObjFlags>,
    /// Element whose permanent resistance this effect duplicates
    pub temp_resist: Option<Element>,
    /// Wears off faster under the Song of Este
    pub este: bool,
    /// Protection grants a saving throw rather than immunity
    pub save: bool,
    /// Lowest value the effect can take
    pub floor: i32,
    pub redraw: Redraw,
    pub chain: GradeChain,
}

impl TimedDescriptor {
    /// Upper bound of the effect's value
    pub fn max_value(&self) -> i32 {
        match &self.chain {
            GradeChain::Graded(grades) => grades.last().map_or(0, |g| g.max),
            GradeChain::Changing { max, .. } => *max,
        }
    }

    /// Index of the band holding `v`; the last band catches everything above
    pub fn grade_index(&self, v: i32) -> usize {
        match &self.chain {
            GradeChain::Graded(grades) => grades
                .iter()
                .position(|g| v <= g.max)
                .unwrap_or(grades.len().saturating_sub(1)),
            GradeChain::Changing { steps, .. } => steps
                .iter()
                .position(|s| v <= s.max)
                .unwrap_or(steps.len().saturating_sub(1)),
        }
    }

    /// Band holding `v`, for graded effects
    pub fn grade(&self, v: i32) -> Option<&TimedGrade> {
        match &self.chain {
            GradeChain::Graded(grades) => grades.get(self.grade_index(v)),
            GradeChain::Changing { .. } => None,
        }
    }

    /// Check chain shape: non-empty and strictly increasing thresholds
    pub fn validate(&self) -> Result<(), DataError> {
        let maxes: Vec<i32> = match &self.chain {
            GradeChain::Graded(g) => g.iter().map(|g| g.max).collect(),
            GradeChain::Changing { steps, divisor, .. } => {
                if *divisor <= 0 {
                    return Err(DataError::BadTable(format!("{}: divisor must be positive", self.name)));
                }
                steps.iter().map(|s| s.max).collect()
            }
        };
        if maxes.is_empty() {
            return Err(DataError::BadTable(format!("{}: empty grade chain", self.name)));
        }
        if maxes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DataError::BadTable(format!("{}: thresholds not increasing", self.name)));
        }
        Ok(())
    }
}

/// Descriptors for every player timed effect, indexed by [`TimedEffect`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedTable {
    effects: Vec<TimedDescriptor>,
}

impl TimedTable {
    pub fn new(effects: Vec<TimedDescriptor>) -> Result<Self, DataError> {
        if effects.len() != super::TMD_MAX {
            return Err(DataError::BadTable(format!(
                "expected {} timed effects, got {}",
                super::TMD_MAX,
                effects.len()
            )));
        }
        for e in &effects {
            e.validate()?;
        }
        Ok(Self { effects })
    }

    pub fn get(&self, e: TimedEffect) -> &TimedDescriptor {
        &self.effects[e as usize]
    }

    /// Replace one descriptor
    pub fn set(&mut self, e: TimedEffect, desc: TimedDescriptor) -> Result<(), DataError> {
        desc.validate()?;
        self.effects[e as usize] = desc;
        Ok(())
    }
}
