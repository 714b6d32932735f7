//! Combat resolution
//!
//! Opposed rolls between two [`Source`]s: skill checks, hit rolls and
//! critical-hit dice. Attack and evasion totals live in [`totals`],
//! protection dice in [`protection`].

mod damage;
pub mod protection;
pub mod totals;

pub use damage::{DamageType, Element};
pub use protection::protection_roll;
pub use totals::{
    total_monster_attack, total_monster_evasion, total_player_attack, total_player_evasion,
};

use serde::{Deserialize, Serialize};

use crate::consts::{CRIT_ABILITY_STEP, CRIT_SEPARATION};
use crate::monster::{MonsterId, MonsterRace, RaceFlags};
use crate::player::{Ability, Skill};
use crate::world::World;

/// Bonus to a monster's rolls against elves when it has the elf-bane flag
pub const ELF_BANE_BONUS: i32 = 3;

/// Who performs or receives a combat action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Source {
    Player,
    Monster(MonsterId),
    #[default]
    None,
}

/// Breakdown of a displayed hit roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollEvent {
    pub attacker: Source,
    pub defender: Source,
    pub attack: i32,
    pub attack_roll: i32,
    pub evasion: i32,
    pub evasion_roll: i32,
    pub result: i32,
}

/// Player's bonus from specialising against the monster's kind
pub fn bane_bonus(world: &World, mid: MonsterId) -> i32 {
    let p = &world.player;
    let Some(bane) = p.bane else {
        return 0;
    };
    if !p.active_ability(Ability::Bane) {
        return 0;
    }
    let Some(race) = world.monster_race(mid) else {
        return 0;
    };
    if !race.flags.contains(bane.flag()) {
        return 0;
    }
    let kills: u32 = world
        .data
        .races
        .iter()
        .zip(&world.lore)
        .filter(|(r, _)| r.flags.contains(bane.flag()))
        .map(|(_, l)| l.pkills as u32)
        .sum();
    (kills + 1).ilog2() as i32
}

/// Monster's bonus against an elven player
pub fn elf_bane_bonus(world: &World, mid: MonsterId) -> i32 {
    let elven = world
        .data
        .player_races
        .get(world.player.race as usize)
        .is_some_and(|r| r.elven);
    match world.monster_race(mid) {
        Some(race) if elven && race.flags.contains(RaceFlags::ELFBANE) => ELF_BANE_BONUS,
        _ => 0,
    }
}

/// Bonuses applied to (attacker side, defender side) of an opposed roll
fn side_bonuses(world: &World, attacker: Source, defender: Source) -> (i32, i32) {
    match (attacker, defender) {
        (Source::Player, Source::Monster(m)) => (bane_bonus(world, m), elf_bane_bonus(world, m)),
        (Source::Monster(m), Source::Player) => (elf_bane_bonus(world, m), bane_bonus(world, m)),
        _ => (0, 0),
    }
}

/// Roll one side's die, taking the worse of two for a cursed player
fn curse_reroll(world: &mut World, side: Source, roll: i32, sides: i32) -> i32 {
    if side == Source::Player && world.player.cursed {
        roll.min(world.rng.randint1(sides))
    } else {
        roll
    }
}

/// Opposed 1d10 check: positive is a success, zero or less a failure
pub fn skill_check(
    world: &mut World,
    attacker: Source,
    skill: i32,
    difficulty: i32,
    defender: Source,
) -> i32 {
    let (att_bonus, def_bonus) = side_bonuses(world, attacker, defender);
    let skill_total = skill + att_bonus;
    let difficulty_total = difficulty + def_bonus;

    let att_roll = world.rng.randint1(10);
    let def_roll = world.rng.randint1(10);
    let att_roll = curse_reroll(world, attacker, att_roll, 10);
    let def_roll = curse_reroll(world, defender, def_roll, 10);

    (skill_total + att_roll) - (difficulty_total + def_roll)
}

/// Opposed 1d20 hit roll: positive is a hit, and the margin feeds
/// [`crit_bonus`]
pub fn hit_roll(
    world: &mut World,
    att: i32,
    evn: i32,
    attacker: Source,
    defender: Source,
    display: bool,
) -> i32 {
    let att_roll = world.rng.randint1(20);
    let evn_roll = world.rng.randint1(20);
    let att_roll = curse_reroll(world, attacker, att_roll, 20);
    let evn_roll = curse_reroll(world, defender, evn_roll, 20);

    let result = (att + att_roll) - (evn + evn_roll);
    if display {
        let event = RollEvent {
            attacker,
            defender,
            attack: att,
            attack_roll: att_roll,
            evasion: evn,
            evasion_roll: evn_roll,
            result,
        };
        log::debug!(
            "hit roll {:?} vs {:?}: {}+{} vs {}+{} = {}",
            attacker,
            defender,
            att,
            att_roll,
            evn,
            evn_roll,
            result
        );
        world.roll_events.push(event);
    }
    result
}

/// Extra damage dice from a hit
///
/// `race` is the defending race when a monster is hit. `weight` is the
/// weapon weight in tenths of a pound.
pub fn crit_bonus(
    world: &World,
    attacker: Source,
    hit_margin: i32,
    weight: i32,
    race: Option<&MonsterRace>,
    skill: Skill,
    thrown: bool,
) -> i32 {
    let mut sep = CRIT_SEPARATION;
    match attacker {
        Source::Player => {
            let p = &world.player;
            if skill == Skill::Melee {
                if p.active_ability(Ability::Finesse) {
                    sep -= CRIT_ABILITY_STEP;
                }
                if p.active_ability(Ability::Subtlety) {
                    sep -= CRIT_ABILITY_STEP;
                }
                if p.active_ability(Ability::Power) {
                    sep += CRIT_ABILITY_STEP;
                }
            } else if skill == Skill::Archery && !thrown && p.active_ability(Ability::Precision) {
                sep -= CRIT_ABILITY_STEP;
            }
        }
        Source::Monster(_) => {
            if world.player.active_ability(Ability::CriticalResistance) {
                sep += world.player.skill(Skill::Will);
            }
        }
        Source::None => {}
    }

    let mut dice = (hit_margin * 10 + 4) / (sep + weight).max(1);
    if let Some(race) = race {
        if race.flags.contains(RaceFlags::NO_CRIT) {
            dice = 0;
        } else if race.flags.contains(RaceFlags::RES_CRIT) {
            dice /= 2;
        }
    }
    dice.max(0)
}
