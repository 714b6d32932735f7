//! High score table
//!
//! Scores are stored as fixed-width ASCII records and ranked by a points
//! value derived from those fields alone, so any build can rank any file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

use super::World;
use crate::consts::{MAX_DEPTH, MAX_HISCORES};

/// Field widths of a stored record, including the NUL terminator
const W_WHAT: usize = 8;
const W_PTS: usize = 10;
const W_TURNS: usize = 10;
const W_DAY: usize = 10;
const W_WHO: usize = 16;
const W_UID: usize = 8;
const W_SEX: usize = 2;
const W_RACE: usize = 3;
const W_HOUSE: usize = 3;
const W_DEP: usize = 4;
const W_HOW: usize = 32;
const W_SIL: usize = 4;
const W_FLAG: usize = 2;

const WIDTHS: [usize; 15] = [
    W_WHAT, W_PTS, W_TURNS, W_DAY, W_WHO, W_UID, W_SEX, W_RACE, W_HOUSE, W_DEP, W_DEP, W_HOW,
    W_SIL, W_FLAG, W_FLAG,
];

/// Bytes in one stored record
pub const RECORD_LEN: usize = {
    let mut n = 0;
    let mut i = 0;
    while i < WIDTHS.len() {
        n += WIDTHS[i];
        i += 1;
    }
    n
};

/// Turn budget behind the turn component of the score
pub const SCORE_TURNS: i64 = 100_000;
pub const DEPTH_POINTS: i64 = 100_000;
pub const SILMARIL_POINTS: i64 = 10_000_000;
pub const ESCAPE_POINTS: i64 = 100_000_000;
pub const MORGOTH_POINTS: i64 = 1_000_000_000;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("score file I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("score file is corrupt: {0}")]
    Corrupt(String),
}

/// One high score record; every field is ASCII text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScore {
    /// Version string
    pub what: String,
    pub pts: String,
    pub turns: String,
    /// Date, as `@YYYYMMDD`
    pub day: String,
    pub who: String,
    pub uid: String,
    pub sex: String,
    pub p_r: String,
    pub p_h: String,
    pub cur_dep: String,
    pub max_dep: String,
    /// Cause of death
    pub how: String,
    pub silmarils: String,
    /// "t" or "f"
    pub morgoth_slain: String,
    pub escaped: String,
}

fn num(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

fn fit(s: &str, width: usize) -> String {
    s.chars()
        .filter(char::is_ascii)
        .take(width - 1)
        .collect()
}

fn flag(on: bool) -> String {
    String::from(if on { "t" } else { "f" })
}

impl HighScore {
    fn fields(&self) -> [&String; 15] {
        [
            &self.what,
            &self.pts,
            &self.turns,
            &self.day,
            &self.who,
            &self.uid,
            &self.sex,
            &self.p_r,
            &self.p_h,
            &self.cur_dep,
            &self.max_dep,
            &self.how,
            &self.silmarils,
            &self.morgoth_slain,
            &self.escaped,
        ]
    }

    fn fields_mut(&mut self) -> [&mut String; 15] {
        [
            &mut self.what,
            &mut self.pts,
            &mut self.turns,
            &mut self.day,
            &mut self.who,
            &mut self.uid,
            &mut self.sex,
            &mut self.p_r,
            &mut self.p_h,
            &mut self.cur_dep,
            &mut self.max_dep,
            &mut self.how,
            &mut self.silmarils,
            &mut self.morgoth_slain,
            &mut self.escaped,
        ]
    }

    /// Fixed-width stored form
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        let mut at = 0;
        for (field, width) in self.fields().into_iter().zip(WIDTHS) {
            let text = fit(field, width);
            out[at..at + text.len()].copy_from_slice(text.as_bytes());
            at += width;
        }
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ScoreError> {
        if bytes.len() < RECORD_LEN {
            return Err(ScoreError::Corrupt(format!("short record of {} bytes", bytes.len())));
        }
        let mut entry = HighScore::default();
        let mut at = 0;
        for (field, width) in entry.fields_mut().into_iter().zip(WIDTHS) {
            let raw = &bytes[at..at + width];
            let end = raw.iter().position(|&b| b == 0).unwrap_or(width);
            let text = std::str::from_utf8(&raw[..end])
                .map_err(|e| ScoreError::Corrupt(e.to_string()))?;
            *field = text.to_string();
            at += width;
        }
        Ok(entry)
    }

    pub fn is_empty(&self) -> bool {
        self.what.is_empty()
    }

    /// Build a record for a finished game
    pub fn from_world(world: &World, when: DateTime<Local>) -> Self {
        let p = &world.player;
        let mut e = HighScore {
            what: fit(env!("CARGO_PKG_VERSION"), W_WHAT),
            turns: world.player_turn.to_string(),
            day: when.format("@%Y%m%d").to_string(),
            who: fit(&p.name, W_WHO),
            uid: "0".into(),
            sex: p.sex.to_string(),
            p_r: p.race.to_string(),
            p_h: p.house.to_string(),
            cur_dep: p.depth.to_string(),
            max_dep: p.max_depth.to_string(),
            how: fit(&p.died_from, W_HOW),
            silmarils: p.silmarils.to_string(),
            morgoth_slain: flag(p.morgoth_slain),
            escaped: flag(p.escaped),
            ..Default::default()
        };
        e.pts = score_points(&e).to_string();
        e
    }
}

/// Points for a record
///
/// Turn points are capped below one depth step. Without a Silmaril deeper
/// is better; once one is won, getting back up is what counts.
pub fn score_points(entry: &HighScore) -> i64 {
    let turns = num(&entry.turns);
    let silmarils = num(&entry.silmarils);
    let mut points = (SCORE_TURNS - turns).clamp(0, SCORE_TURNS - 1);
    points += silmarils * SILMARIL_POINTS;
    if silmarils == 0 {
        points += num(&entry.max_dep) * DEPTH_POINTS;
    } else {
        points += (MAX_DEPTH as i64 - num(&entry.cur_dep)) * DEPTH_POINTS;
    }
    if entry.escaped == "t" {
        points += ESCAPE_POINTS;
    }
    if entry.morgoth_slain == "t" {
        points += MORGOTH_POINTS;
    }
    points
}

/// The table, best first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: Vec<HighScore>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slot a candidate would take: the first empty slot or the first
    /// entry scoring no more than it
    pub fn highscore_where(&self, candidate: &HighScore) -> usize {
        let score = score_points(candidate);
        self.entries
            .iter()
            .position(|e| score_points(e) <= score)
            .unwrap_or(self.entries.len())
    }

    /// Insert a record, returning its slot, or `None` if it misses the table
    pub fn highscore_add(&mut self, entry: HighScore) -> Option<usize> {
        let slot = self.highscore_where(&entry);
        if slot >= MAX_HISCORES {
            return None;
        }
        self.entries.insert(slot, entry);
        self.entries.truncate(MAX_HISCORES);
        Some(slot)
    }

    pub fn load(path: &Path) -> Result<Self, ScoreError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let bytes = fs::read(path)?;
        let mut table = Self::new();
        for rec in bytes.chunks(RECORD_LEN) {
            let entry = HighScore::decode(rec)?;
            if entry.is_empty() {
                break;
            }
            table.entries.push(entry);
            if table.entries.len() == MAX_HISCORES {
                break;
            }
        }
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<(), ScoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut bytes = Vec::with_capacity(self.entries.len() * RECORD_LEN);
        for e in &self.entries {
            bytes.extend_from_slice(&e.encode());
        }
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Default location of the score file
pub fn default_score_path() -> PathBuf {
    super::options::default_user_dir().join("scores.raw")
}
