//! Attack and evasion totals
//!
//! Each total starts from a base score and applies situational modifiers
//! in a fixed order. Halving only ever applies to a positive total, so a
//! penalty can never be softened by a later halving.

use super::bane_bonus;
use crate::dungeon::{CYCLE, DDX, DDY, direction_to};
use crate::monster::{MonTimed, Monster, MonsterId, RaceFlags, Stance};
use crate::player::{Ability, Skill, TimedEffect};
use crate::world::World;

/// Attack and evasion lost while stunned
pub const STUN_PENALTY: i32 = 2;

fn halve(v: &mut i32) {
    if *v > 0 {
        *v /= 2;
    }
}

/// Player's attack score against a monster
pub fn total_player_attack(world: &World, mid: MonsterId, base: i32) -> i32 {
    let Some(mon) = world.monsters.get(mid) else {
        return base;
    };
    let p = &world.player;
    let mut att = base;

    att += bane_bonus(world, mid);
    if p.active_ability(Ability::Concentration) {
        att += (p.consecutive_attacks as i32).min(p.skill(Skill::Perception) / 2);
    }
    att -= p.grid.distance(mon.grid) / 5;

    if !mon.ml {
        halve(&mut att);
    }
    if world.traps.pit_at(p.grid) {
        halve(&mut att);
    }
    att
}

/// Player's evasion score against an attacker, if there is one
pub fn total_player_evasion(world: &World, attacker: Option<MonsterId>, base: i32) -> i32 {
    let p = &world.player;
    let mut evn = base;

    let unseen = attacker
        .and_then(|m| world.monsters.get(m))
        .is_some_and(|m| !m.ml);
    if unseen || p.timed(TimedEffect::Blind) > 0 {
        halve(&mut evn);
    }
    if world.traps.pit_at(p.grid) {
        halve(&mut evn);
    }
    evn
}

/// Can this monster see the player?
pub fn monster_can_see_player(world: &World, mon: &Monster) -> bool {
    if world.player.timed(TimedEffect::Invis) == 0 {
        return true;
    }
    world
        .race(mon.race)
        .is_some_and(|r| r.flags.contains(RaceFlags::SEE_INVIS))
}

/// Hostile monsters next to the player, other than the attacker
///
/// The seven other directions are walked round the compass starting next
/// to the attacker's own direction.
pub fn surrounding_attackers(world: &World, mid: MonsterId) -> i32 {
    let Some(attacker) = world.monsters.get(mid) else {
        return 0;
    };
    let pgrid = world.player.grid;
    let dir = direction_to(pgrid, attacker.grid);
    let start = CYCLE.iter().position(|&d| d == dir).unwrap_or(0);
    let mut count = 0;
    for i in 1..CYCLE.len() {
        let d = CYCLE[(start + i) % CYCLE.len()];
        let grid = pgrid.offset(DDY[d], DDX[d]);
        let m_idx = world.cave.monster(grid);
        if m_idx <= 0 {
            continue;
        }
        let Some(other) = world.monsters.get(MonsterId(m_idx as u16)) else {
            continue;
        };
        if other.stance != Stance::Allied && other.stance != Stance::Fleeing && other.is_alert() {
            count += 1;
        }
    }
    count
}

/// Monster's attack score against the player
pub fn total_monster_attack(world: &World, mid: MonsterId, base: i32) -> i32 {
    let Some(mon) = world.monsters.get(mid) else {
        return base;
    };
    let mut att = base;

    if mon.timed(MonTimed::Stun) > 0 {
        att -= STUN_PENALTY;
    }
    let hurt_by_light = world
        .race(mon.race)
        .is_some_and(|r| r.flags.contains(RaceFlags::HURT_LITE));
    if hurt_by_light && world.cave.is_lit(mon.grid) {
        att -= 1;
    }

    let mut crowd = surrounding_attackers(world, mid);
    if world.player.active_ability(Ability::CrowdFighting) {
        crowd /= 2;
    }
    att += crowd;

    if !monster_can_see_player(world, mon) {
        halve(&mut att);
    }
    if world.traps.pit_at(mon.grid) {
        halve(&mut att);
    }
    att
}

/// Monster's evasion score against the player
pub fn total_monster_evasion(world: &World, mid: MonsterId, base: i32) -> i32 {
    let Some(mon) = world.monsters.get(mid) else {
        return base;
    };
    let mut evn = base;

    if mon.timed(MonTimed::Stun) > 0 {
        evn -= STUN_PENALTY;
    }
    if !mon.is_alert() {
        halve(&mut evn);
    }
    if world.traps.pit_at(mon.grid) {
        halve(&mut evn);
    }
    evn
}
