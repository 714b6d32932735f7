//! Monster turns
//!
//! Once per game turn every monster gains energy; those with enough act.
//! An action is one of: waking up, a melee round, a spell, or a step.

use strum::IntoEnumIterator;

use super::melee::make_attack_normal;
use super::spell::{choose_spell, do_mon_spell};
use super::{MonTimed, MonsterId, RaceFlags, Stance};
use crate::combat::{Source, skill_check};
use crate::consts::MOVE_ENERGY;
use crate::dungeon::{DDX, DDY, Loc};
use crate::player::Skill;
use crate::world::World;

/// Alertness gained each time a monster notices the player
const NOTICE_ALERTNESS: i16 = 5;

/// Energy gained per game turn at a given speed
pub fn turn_energy(speed: u8) -> u8 {
    speed.saturating_mul(5)
}

/// Give every monster its share of the game turn
pub fn process_monsters(world: &mut World) {
    for mid in world.monsters.ids() {
        if world.player.is_dead {
            break;
        }
        let Some(mon) = world.monsters.get_mut(mid) else {
            continue;
        };
        mon.energy = mon.energy.saturating_add(turn_energy(mon.mspeed));
        if mon.energy < MOVE_ENERGY {
            continue;
        }
        mon.energy -= MOVE_ENERGY;
        if mon.skip_next_turn {
            mon.skip_next_turn = false;
            continue;
        }

        let previous = world.mon_current.replace(mid);
        process_monster(world, mid);
        world.mon_current = previous;
    }
}

fn process_monster(world: &mut World, mid: MonsterId) {
    let Some(mon) = world.monsters.get_mut(mid) else {
        return;
    };
    for t in MonTimed::iter() {
        let v = &mut mon.timed[t as usize];
        if *v > 0 {
            *v -= 1;
        }
    }
    if mon.timed(MonTimed::Hold) > 0 {
        return;
    }

    let Some(race) = world.monster_race(mid).cloned() else {
        return;
    };
    let Some(mon) = world.monsters.get(mid).cloned() else {
        return;
    };

    if !mon.is_alert() {
        let stealth = world.player.skill(Skill::Stealth);
        if skill_check(world, Source::Monster(mid), race.per, stealth, Source::Player) > 0 {
            if let Some(m) = world.monsters.get_mut(mid) {
                m.set_alertness(m.alertness + NOTICE_ALERTNESS);
                log::trace!("monster {} notices the player ({})", mid.0, m.alertness);
            }
        }
        return;
    }

    let pgrid = world.player.grid;
    let hostile = mon.stance != Stance::Allied && !world.player.truce;

    if hostile && mon.grid.is_adjacent(pgrid) && mon.stance != Stance::Fleeing {
        make_attack_normal(world, mid);
        return;
    }

    if hostile && race.freq_ranged > 0 && world.rng.one_in(race.freq_ranged as i32) {
        if let Some(spell) = choose_spell(world, mid) {
            do_mon_spell(world, spell, mid);
            return;
        }
    }

    if race.flags.contains(RaceFlags::NEVER_MOVE) {
        return;
    }
    let confused = mon.timed(MonTimed::Conf) > 0;
    if let Some(step) = choose_step(world, mon.grid, pgrid, mon.stance == Stance::Fleeing, confused) {
        world.move_monster(mid, step);
    }
}

/// The square a monster steps to, if any
///
/// Takes the empty neighbour closest to the player, or furthest when
/// fleeing. A confused monster staggers at random.
fn choose_step(world: &mut World, from: Loc, target: Loc, fleeing: bool, confused: bool) -> Option<Loc> {
    let neighbours: Vec<Loc> = (1..10)
        .filter(|&d| d != 5)
        .map(|d| from.offset(DDY[d], DDX[d]))
        .filter(|&g| world.cave.is_empty(g))
        .collect();
    if confused {
        return world.rng.choose(&neighbours).copied();
    }

    let here = from.distance(target);
    let best = if fleeing {
        neighbours.into_iter().max_by_key(|g| g.distance(target))
    } else {
        neighbours.into_iter().min_by_key(|g| g.distance(target))
    }?;
    let there = best.distance(target);
    let better = if fleeing { there > here } else { there < here };
    better.then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::dungeon::Feat;
    use crate::monster::{ALERTNESS_ALERT, Monster};
    use crate::rng::GameRng;
    use std::sync::Arc;

    fn world() -> World {
        let mut w = World::new(Arc::new(GameData::standard()), GameRng::new(42));
        w.cave.fill(Loc::new(1, 1), Loc::new(20, 20), Feat::Floor);
        w.place_player(Loc::new(10, 10));
        w.player.mhp = 200;
        w.player.chp = 200;
        w
    }

    fn wolf(w: &mut World, grid: Loc, alertness: i16) -> MonsterId {
        w.place_monster(Monster {
            race: 1,
            hp: 10,
            maxhp: 10,
            grid,
            mspeed: 20,
            alertness,
            ml: true,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_energy_gates_turns() {
        let mut w = world();
        let mid = wolf(&mut w, Loc::new(10, 15), ALERTNESS_ALERT);
        w.monsters.get_mut(mid).unwrap().mspeed = 2;
        process_monsters(&mut w);
        assert_eq!(w.monsters.get(mid).unwrap().grid, Loc::new(10, 15));
        assert_eq!(w.monsters.get(mid).unwrap().energy, 10);
    }

    #[test]
    fn test_alert_monster_closes_in() {
        let mut w = world();
        let mid = wolf(&mut w, Loc::new(10, 15), ALERTNESS_ALERT);
        process_monsters(&mut w);
        assert_eq!(w.monsters.get(mid).unwrap().grid, Loc::new(10, 14));
        assert_eq!(w.cave.monster(Loc::new(10, 14)), mid.0 as i16);
    }

    #[test]
    fn test_fleeing_monster_backs_off() {
        let mut w = world();
        let mid = wolf(&mut w, Loc::new(10, 12), ALERTNESS_ALERT);
        w.monsters.get_mut(mid).unwrap().stance = Stance::Fleeing;
        process_monsters(&mut w);
        assert!(w.monsters.get(mid).unwrap().grid.distance(Loc::new(10, 10)) > 2);
    }

    #[test]
    fn test_adjacent_monster_attacks() {
        let mut w = world();
        let mid = wolf(&mut w, Loc::new(10, 11), ALERTNESS_ALERT);
        process_monsters(&mut w);
        assert_eq!(w.roll_events.len(), 1);
        assert_eq!(w.monsters.get(mid).unwrap().grid, Loc::new(10, 11));
    }

    #[test]
    fn test_sleeping_monster_stays_put() {
        let mut w = world();
        let mid = wolf(&mut w, Loc::new(10, 11), -20);
        process_monsters(&mut w);
        assert!(w.roll_events.is_empty());
        assert_eq!(w.monsters.get(mid).unwrap().grid, Loc::new(10, 11));
    }

    #[test]
    fn test_held_monster_loses_turn() {
        let mut w = world();
        let mid = wolf(&mut w, Loc::new(10, 11), ALERTNESS_ALERT);
        w.monsters.get_mut(mid).unwrap().timed[MonTimed::Hold as usize] = 3;
        process_monsters(&mut w);
        assert!(w.roll_events.is_empty());
        assert_eq!(w.monsters.get(mid).unwrap().timed(MonTimed::Hold), 2);
    }
}
