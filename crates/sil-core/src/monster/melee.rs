//! Monster melee against the player

use super::blow::BlowContext;
use super::message::{expand_message, monster_blow_method_action};
use super::{MonsterId, RaceFlags};
use crate::combat::{
    DamageType, Source, crit_bonus, hit_roll, protection_roll, total_monster_attack,
    total_player_evasion,
};
use crate::consts::{MONSTER_BLOW_WEIGHT, STUN_PER_CRIT};
use crate::player::{Skill, TimedEffect, inc_timed};
use crate::rng::Aspect;
use crate::world::{MessageType, World};

/// Make every blow of a monster against the adjacent player
///
/// Returns false if the monster could not attack at all.
pub fn make_attack_normal(world: &mut World, mid: MonsterId) -> bool {
    let Some(race) = world.monster_race(mid).cloned() else {
        return false;
    };
    if race.flags.contains(RaceFlags::NEVER_BLOW) {
        return false;
    }
    let race_idx = match world.monsters.get(mid) {
        Some(mon) => mon.race as usize,
        None => return false,
    };

    let previous = world.mon_current.replace(mid);
    for (i, blow) in race.blows.iter().enumerate() {
        if world.player.is_dead || world.monsters.get(mid).is_none() {
            break;
        }
        let visible = world.monsters.get(mid).is_some_and(|m| m.ml);

        let att = total_monster_attack(world, mid, blow.att as i32);
        let evn = total_player_evasion(world, Some(mid), world.player.skill(Skill::Evasion));
        let hit = hit_roll(world, att, evn, Source::Monster(mid), Source::Player, true);

        if hit <= 0 {
            if blow.method.shows_miss() && visible {
                let text = expand_message(world, mid, "{name} misses {target}.");
                world.messages.add(text, MessageType::Miss);
            }
            continue;
        }

        world.disturb();
        let text = monster_blow_method_action(world, mid, blow.method);
        world.messages.add(text, MessageType::Hit);

        let crit = crit_bonus(
            world,
            Source::Monster(mid),
            hit,
            MONSTER_BLOW_WEIGHT,
            None,
            Skill::Melee,
            false,
        );
        let dd = blow.dd as i32;
        let ds = blow.ds as i32;
        let dam = world.rng.damroll(dd, ds) + world.rng.damroll(crit, ds);
        let prot = protection_roll(world, Source::Player, DamageType::Hurt, true, Aspect::Randomise);
        let net_dam = (dam - prot).max(0);
        log::trace!("blow {i} of monster {}: {dam} damage, {prot} protection", mid.0);

        let mut ctx = BlowContext {
            mon: mid,
            method: blow.method,
            dam,
            net_dam,
            do_cut: blow.method.cuts(),
            do_stun: blow.method.stuns(),
            obvious: visible,
        };
        blow.effect.apply(world, &mut ctx);

        if ctx.do_cut && crit > 0 && ctx.net_dam > 0 {
            inc_timed(world, TimedEffect::Cut, ctx.net_dam, true, true, false);
        }
        if ctx.do_stun && crit > 0 {
            inc_timed(world, TimedEffect::Stun, crit * STUN_PER_CRIT, true, true, true);
        }

        if ctx.obvious && visible {
            if let Some(lore) = world.lore.get_mut(race_idx) {
                lore.saw_blow(i);
            }
        }
    }
    world.mon_current = previous;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::dungeon::{Feat, Loc};
    use crate::monster::Monster;
    use crate::rng::GameRng;
    use std::sync::Arc;

    fn setup(rolls: &[u32]) -> (World, MonsterId) {
        let mut w = World::new(Arc::new(GameData::standard()), GameRng::fixed(rolls));
        w.cave.fill(Loc::new(1, 1), Loc::new(10, 10), Feat::Floor);
        w.place_player(Loc::new(5, 5));
        w.player.mhp = 40;
        w.player.chp = 40;
        let mid = w
            .place_monster(Monster {
                race: 1,
                hp: 5,
                maxhp: 5,
                grid: Loc::new(5, 6),
                alertness: 10,
                ml: true,
                ..Default::default()
            })
            .unwrap();
        (w, mid)
    }

    #[test]
    fn test_miss_is_reported() {
        // attacker rolls 1, defender rolls 20
        let (mut w, mid) = setup(&[0, 19]);
        assert!(make_attack_normal(&mut w, mid));
        assert_eq!(w.player.chp, 40);
        assert!(w.messages.contains("misses you."));
        assert_eq!(w.lore[1].blows[0], 0);
        assert_eq!(w.roll_events.len(), 1);
    }

    #[test]
    fn test_hit_damages_and_is_remembered() {
        // wolf bite +3: 3 + 1 against 0 + 3 is a one point hit, too narrow
        // to crit, and the 1d6 damage die shows 6
        let (mut w, mid) = setup(&[0, 2, 5]);
        assert!(make_attack_normal(&mut w, mid));
        assert_eq!(w.roll_events[0].result, 1);
        assert_eq!(w.player.chp, 34);
        assert!(w.messages.contains("bites you."));
        assert_eq!(w.player.timed(TimedEffect::Cut), 0);
        assert_eq!(w.lore[1].blows[0], 1);
    }

    #[test]
    fn test_never_blow() {
        let (mut w, mid) = setup(&[]);
        let mut data = GameData::standard();
        data.races[1].flags |= RaceFlags::NEVER_BLOW;
        w.data = Arc::new(data);
        assert!(!make_attack_normal(&mut w, mid));
    }
}
