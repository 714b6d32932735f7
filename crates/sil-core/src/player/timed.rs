//! Player timed effects
//!
//! All changes go through [`set_timed`]. It decides whether the change is
//! worth telling the player about, picks the message, and raises the
//! disturb and redraw side effects. A `false` return means "nothing to
//! report", which is an ordinary outcome.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};

use super::calcs::{perm_resist, player_has_flag, take_hit};
use super::timed_data::GradeChain;
use super::Song;
use crate::combat::{Source, skill_check};
use crate::player::Skill;
use crate::world::{MessageType, Update, World};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum TimedEffect {
    Fast = 0,
    Slow = 1,
    Blind = 2,
    Entranced = 3,
    Confused = 4,
    Afraid = 5,
    Image = 6,
    Poisoned = 7,
    Cut = 8,
    Stun = 9,
    Rage = 10,
    Invis = 11,
    SInvis = 12,
    OppFire = 13,
    OppCold = 14,
    OppPois = 15,
    Food = 16,
}

pub const TMD_MAX: usize = 17;

/// Upper end of the "Heavy Stun" band; above it the player is knocked out
pub const STUN_HEAVY_MAX: i32 = 100;

/// Difficulty of a saving throw with no identifiable source
const DEFAULT_SAVE_DIFFICULTY: i32 = 10;

/// Set an effect to a new value
///
/// Returns whether the player was notified of the change.
pub fn set_timed(
    world: &mut World,
    effect: TimedEffect,
    v: i32,
    notify: bool,
    can_disturb: bool,
) -> bool {
    let data = world.data.clone();
    let desc = data.timed.get(effect);
    let old = world.player.timed(effect);
    let top = desc.max_value();

    if v == old {
        return false;
    }
    // Topping off an effect that is already maxed out
    if v > top && old == top {
        return false;
    }
    let v = v.clamp(desc.floor, top);
    if v == old {
        return false;
    }

    if effect == TimedEffect::Stun && old > STUN_HEAVY_MAX && v > old {
        return false;
    }

    let mut notify = notify;
    let mut msg: Option<&str> = None;
    let mut msg_type = desc.msg_type;

    if v == 0 {
        notify = true;
        msg = desc.on_end.as_deref();
        msg_type = MessageType::Recover;
    } else {
        match &desc.chain {
            GradeChain::Graded(grades) => {
                let old_g = desc.grade_index(old);
                let new_g = desc.grade_index(v);
                let grade = &grades[new_g];
                if new_g > old_g {
                    notify = true;
                    let resisted = desc
                        .temp_resist
                        .is_some_and(|elem| perm_resist(&world.player, elem) > 0);
                    msg = if resisted {
                        desc.on_increase.as_deref()
                    } else {
                        grade.up_msg.as_deref()
                    };
                } else if new_g < old_g {
                    if grade.down_msg.is_some() {
                        notify = true;
                        msg = grade.down_msg.as_deref();
                    }
                } else if notify && v < old {
                    msg = desc.on_decrease.as_deref();
                }
            }
            GradeChain::Changing { steps, divisor, .. } => {
                if v > old {
                    notify = true;
                    let delta = v - old;
                    let step = steps
                        .iter()
                        .find(|s| s.max >= delta)
                        .or(steps.last());
                    msg = step.map(|s| match (&s.inc_msg_active, old > 0) {
                        (Some(active), true) => active.as_str(),
                        _ => s.inc_msg.as_str(),
                    });
                } else {
                    let big = (old + divisor - 1) / divisor;
                    if old - v > big {
                        notify = true;
                        msg = desc.on_decrease.as_deref();
                    }
                }
            }
        }
    }

    // Coming round from a knockout leaves the player briefly unable to see.
    // Blindness is set quietly; its expiry tells the player they can see.
    if effect == TimedEffect::Stun && old > STUN_HEAVY_MAX && v <= STUN_HEAVY_MAX {
        let blind = &mut world.player.timed[TimedEffect::Blind as usize];
        if *blind < 2 {
            *blind = 2;
        }
    }

    world.player.timed[effect as usize] = v;

    if notify {
        if let Some(text) = msg {
            world.messages.add(text, msg_type);
        }
        if can_disturb {
            world.disturb();
        }
        world.upkeep.redraw |= desc.redraw;
        world.upkeep.update |= Update::BONUS;
    }
    log::trace!("timed {effect}: {old} -> {v} (notify {notify})");
    notify
}

/// Increase an effect
///
/// With `check` set, protective equipment may block the increase.
pub fn inc_timed(
    world: &mut World,
    effect: TimedEffect,
    delta: i32,
    notify: bool,
    can_disturb: bool,
    check: bool,
) -> bool {
    if delta <= 0 {
        return false;
    }
    if check && resists_timed(world, effect) {
        return false;
    }
    let old = world.player.timed(effect);
    // Entrancement cannot be extended, only started
    if effect == TimedEffect::Entranced && old > 0 {
        return false;
    }
    set_timed(world, effect, old.saturating_add(delta), notify, can_disturb)
}

/// Decrease an effect
pub fn dec_timed(
    world: &mut World,
    effect: TimedEffect,
    delta: i32,
    notify: bool,
    can_disturb: bool,
) -> bool {
    if delta <= 0 {
        return false;
    }
    let old = world.player.timed(effect);
    set_timed(world, effect, old - delta, notify, can_disturb)
}

/// End an effect
pub fn clear_timed(world: &mut World, effect: TimedEffect, notify: bool, can_disturb: bool) -> bool {
    set_timed(world, effect, 0, notify, can_disturb)
}

/// Whether the player's protection blocks an increase of `effect`
fn resists_timed(world: &mut World, effect: TimedEffect) -> bool {
    let data = world.data.clone();
    let desc = data.timed.get(effect);
    let Some(flag) = desc.fail else {
        return false;
    };
    if !player_has_flag(&world.player, flag) {
        return false;
    }
    if !desc.save {
        return true;
    }
    let (source, difficulty) = match world.mon_current {
        Some(id) => {
            let power = world
                .monsters
                .get(id)
                .and_then(|m| data.races.get(m.race as usize))
                .map_or(DEFAULT_SAVE_DIFFICULTY, |r| r.spell_power);
            (Source::Monster(id), power)
        }
        None => (Source::None, DEFAULT_SAVE_DIFFICULTY),
    };
    let will = world.player.skill(Skill::Will);
    skill_check(world, Source::Player, will, difficulty, source) > 0
}

/// Wear down every active effect by one game turn
pub fn decrease_timeouts(world: &mut World) {
    let data = world.data.clone();
    for effect in TimedEffect::iter() {
        let v = world.player.timed(effect);
        let desc = data.timed.get(effect);
        if v <= desc.floor {
            continue;
        }
        match effect {
            TimedEffect::Poisoned => take_hit(world, 1, "poison"),
            TimedEffect::Cut => take_hit(world, 1 + v / 100, "a fatal wound"),
            _ => {}
        }
        if world.player.is_dead {
            return;
        }
        let step = if desc.este && world.player.is_singing(Song::Este) { 2 } else { 1 };
        dec_timed(world, effect, step, false, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::object::{ObjFlags, Object, Tval};
    use crate::player::EquipSlot;
    use crate::rng::GameRng;
    use std::sync::Arc;

    fn world() -> World {
        World::new(Arc::new(GameData::standard()), GameRng::new(42))
    }

    #[test]
    fn test_same_value_never_notifies() {
        let mut w = world();
        assert!(set_timed(&mut w, TimedEffect::Confused, 10, false, false));
        let disturbs = w.upkeep.disturb_count;
        w.upkeep.redraw = Default::default();
        assert!(!set_timed(&mut w, TimedEffect::Confused, 10, true, true));
        assert_eq!(w.upkeep.disturb_count, disturbs);
        assert!(w.upkeep.redraw.is_empty());
    }

    #[test]
    fn test_grade_increase_always_notifies() {
        let mut w = world();
        assert!(set_timed(&mut w, TimedEffect::Stun, 20, false, false));
        assert_eq!(w.messages.last_text(), Some("You have been stunned."));
        assert!(set_timed(&mut w, TimedEffect::Stun, 60, false, false));
        assert_eq!(w.messages.last_text(), Some("You have been heavily stunned."));
    }

    #[test]
    fn test_within_band_change_is_quiet() {
        let mut w = world();
        set_timed(&mut w, TimedEffect::Stun, 20, false, false);
        let n = w.messages.len();
        assert!(!set_timed(&mut w, TimedEffect::Stun, 30, false, false));
        assert_eq!(w.messages.len(), n);
        assert!(set_timed(&mut w, TimedEffect::Stun, 25, true, false));
    }

    #[test]
    fn test_end_goes_to_recover_channel() {
        let mut w = world();
        set_timed(&mut w, TimedEffect::Afraid, 5, false, false);
        assert!(set_timed(&mut w, TimedEffect::Afraid, 0, false, false));
        let last = w.messages.last().unwrap();
        assert_eq!(last.typ, MessageType::Recover);
        assert_eq!(last.text, "You feel bolder now.");
    }

    #[test]
    fn test_topping_off_max_is_quiet() {
        let mut w = world();
        let top = w.data.timed.get(TimedEffect::Confused).max_value();
        assert!(set_timed(&mut w, TimedEffect::Confused, top + 50, false, false));
        assert_eq!(w.player.timed(TimedEffect::Confused), top);
        assert!(!set_timed(&mut w, TimedEffect::Confused, top + 1, true, true));
        assert!(!inc_timed(&mut w, TimedEffect::Confused, 5, true, true, false));
        assert_eq!(w.player.timed(TimedEffect::Confused), top);
    }

    #[test]
    fn test_knockout_blocks_further_stun() {
        let mut w = world();
        assert!(set_timed(&mut w, TimedEffect::Stun, 120, false, false));
        assert!(!inc_timed(&mut w, TimedEffect::Stun, 10, true, true, false));
        assert_eq!(w.player.timed(TimedEffect::Stun), 120);
        assert!(set_timed(&mut w, TimedEffect::Stun, 80, false, false));
        assert!(w.player.timed(TimedEffect::Blind) >= 2);
    }

    #[test]
    fn test_sight_returns_after_knockout() {
        let mut w = world();
        set_timed(&mut w, TimedEffect::Stun, 120, false, false);
        set_timed(&mut w, TimedEffect::Stun, 80, false, false);
        assert!(!w.messages.contains("You can see again."));
        assert_eq!(w.player.timed(TimedEffect::Blind), 2);

        decrease_timeouts(&mut w);
        decrease_timeouts(&mut w);
        assert_eq!(w.player.timed(TimedEffect::Blind), 0);
        assert!(w.messages.contains("You can see again."));
    }

    #[test]
    fn test_entranced_not_extended() {
        let mut w = world();
        assert!(inc_timed(&mut w, TimedEffect::Entranced, 5, true, false, false));
        assert!(!inc_timed(&mut w, TimedEffect::Entranced, 5, true, false, false));
        assert_eq!(w.player.timed(TimedEffect::Entranced), 5);
    }

    #[test]
    fn test_protection_blocks_increase() {
        let mut w = world();
        w.player.equipment[EquipSlot::Amulet as usize] = Some(Object {
            kind: 1,
            tval: Tval::Amulet,
            flags: ObjFlags::PROT_CONF,
            ..Default::default()
        });
        assert!(!inc_timed(&mut w, TimedEffect::Confused, 10, true, true, true));
        assert_eq!(w.player.timed(TimedEffect::Confused), 0);
        assert!(inc_timed(&mut w, TimedEffect::Confused, 10, true, true, false));
    }

    #[test]
    fn test_food_floor() {
        let mut w = world();
        w.player.timed[TimedEffect::Food as usize] = 5;
        set_timed(&mut w, TimedEffect::Food, -20, false, false);
        assert_eq!(w.player.timed(TimedEffect::Food), 1);
    }

    #[test]
    fn test_changing_effect_messages() {
        let mut w = world();
        assert!(inc_timed(&mut w, TimedEffect::Cut, 5, false, false, false));
        assert_eq!(w.messages.last_text(), Some("You have been given a graze."));
        assert!(inc_timed(&mut w, TimedEffect::Cut, 5, false, false, false));
        assert_eq!(w.messages.last_text(), Some("Your wound gets a little worse."));
        // small decrease stays quiet, a big one notifies
        assert!(!dec_timed(&mut w, TimedEffect::Cut, 1, false, false));
        assert!(dec_timed(&mut w, TimedEffect::Cut, 6, false, false));
    }

    #[test]
    fn test_decrease_timeouts_este() {
        let mut w = world();
        w.player.timed[TimedEffect::Afraid as usize] = 10;
        decrease_timeouts(&mut w);
        assert_eq!(w.player.timed(TimedEffect::Afraid), 9);
        w.player.song1 = Song::Este;
        decrease_timeouts(&mut w);
        assert_eq!(w.player.timed(TimedEffect::Afraid), 7);
    }

    #[test]
    fn test_poison_hurts() {
        let mut w = world();
        w.player.chp = 10;
        w.player.timed[TimedEffect::Poisoned as usize] = 3;
        decrease_timeouts(&mut w);
        assert_eq!(w.player.chp, 9);
        assert_eq!(w.player.timed(TimedEffect::Poisoned), 2);
    }
}
