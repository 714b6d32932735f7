//! Character creation
//!
//! Point-buy stats, skill purchases with starting experience, the hit point
//! table and the starting kit. The interactive wizard lives elsewhere; this
//! only applies a finished set of choices.

use thiserror::Error;

use super::calcs::update_bonuses;
use super::{Player, Stat, TimedEffect};
use crate::consts::{PY_MAX_LEVEL, SKILL_MAX, STAT_MAX};
use crate::dungeon::Loc;
use crate::object::object_prep;
use crate::world::{HistoryFlags, World};

/// Points available for raising stats
pub const STAT_POINTS: i32 = 13;
/// Experience available for buying skills
pub const STARTING_EXP: u32 = 5000;
/// Starting nourishment
pub const PY_FOOD_START: i32 = 4000;

/// Errors from applying birth choices
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BirthError {
    #[error("unknown race index {0}")]
    UnknownRace(u8),
    #[error("house {house} does not belong to race {race}")]
    BadHouse { race: u8, house: u8 },
    #[error("stat {0} raised out of range")]
    StatRange(Stat),
    #[error("spent {spent} stat points, only {budget} available")]
    StatPoints { spent: i32, budget: i32 },
    #[error("skills cost {cost} experience, only {budget} available")]
    SkillExp { cost: u32, budget: u32 },
}

/// Finished choices from the birth screens
#[derive(Debug, Clone, Default)]
pub struct BirthChoices {
    pub name: String,
    pub race: u8,
    pub house: u8,
    pub sex: u8,
    /// Points added to each stat, 0 to 6
    pub stat_points: [i16; STAT_MAX],
    /// Ranks bought in each skill
    pub skill_ranks: [i16; SKILL_MAX],
}

/// Cost of raising a stat by `n` points
pub fn stat_cost(n: i16) -> i32 {
    const COSTS: [i32; 7] = [0, 1, 3, 6, 10, 15, 21];
    COSTS.get(n as usize).copied().unwrap_or(i32::MAX)
}

/// Experience cost of buying skill ranks 1 through `n`
pub fn skill_cost(n: i16) -> u32 {
    let n = n.max(0) as u32;
    100 * n * (n + 1) / 2
}

/// Build a new character from `choices`
pub fn player_birth(world: &mut World, choices: &BirthChoices) -> Result<(), BirthError> {
    let data = world.data.clone();
    let race = data
        .player_races
        .get(choices.race as usize)
        .ok_or(BirthError::UnknownRace(choices.race))?;
    let house = data
        .houses
        .get(choices.house as usize)
        .filter(|h| h.race == choices.race)
        .ok_or(BirthError::BadHouse {
            race: choices.race,
            house: choices.house,
        })?;

    let mut spent = 0;
    for (i, &n) in choices.stat_points.iter().enumerate() {
        if !(0..=6).contains(&n) {
            let stat = Stat::from_repr(i as u8).unwrap_or(Stat::Str);
            return Err(BirthError::StatRange(stat));
        }
        spent += stat_cost(n);
    }
    if spent > STAT_POINTS {
        return Err(BirthError::StatPoints {
            spent,
            budget: STAT_POINTS,
        });
    }
    let cost: u32 = choices.skill_ranks.iter().map(|&n| skill_cost(n)).sum();
    if cost > STARTING_EXP {
        return Err(BirthError::SkillExp {
            cost,
            budget: STARTING_EXP,
        });
    }

    let mut p = Player {
        name: choices.name.clone(),
        race: choices.race,
        house: choices.house,
        sex: choices.sex,
        history: format!("You are of the {} of the {}.", house.name, race.name),
        new_exp: STARTING_EXP - cost,
        depth: 1,
        max_depth: 1,
        ..Default::default()
    };
    for i in 0..STAT_MAX {
        let v = race.stat_adj[i] + house.stat_adj[i] + choices.stat_points[i];
        p.stat_base[i] = v;
        p.stat_cur[i] = v;
    }
    for i in 0..SKILL_MAX {
        p.skill_base[i] = choices.skill_ranks[i];
    }
    p.innate = house.abilities;
    p.active = house.abilities;

    // Hit point table: a fixed first level then one die per level
    let hitdie = 10 + p.stat_base[Stat::Con as usize].max(-5) as i32;
    p.player_hp = vec![0; PY_MAX_LEVEL];
    p.player_hp[0] = hitdie as i16;
    for i in 1..PY_MAX_LEVEL {
        p.player_hp[i] = p.player_hp[i - 1] + world.rng.randint1(hitdie) as i16;
    }

    p.timed[TimedEffect::Food as usize] = PY_FOOD_START;

    for &kidx in &race.start_kit {
        if let Some(obj) = object_prep(&data.kinds, kidx) {
            p.inventory.push(obj);
        }
    }

    update_bonuses(&mut p, &data);
    p.chp = p.mhp;
    p.grid = Loc::default();
    world.player = p;
    world.history.add(
        HistoryFlags::PLAYER_BIRTH,
        1,
        world.turn,
        "Began the quest to recover a Silmaril from Morgoth's crown",
    );
    log::debug!(
        "born {} ({}, skills {:?})",
        world.player.name,
        house.name,
        world.player.skill_use
    );
    Ok(())
}
