//! Monster spells and ranged powers
//!
//! Each [`SpellFlags`] bit has a [`MonsterSpell`] descriptor in the game
//! data. A monster first filters its spell set down to what makes sense
//! right now ([`remove_bad_spells`]), picks one ([`choose_spell`]), and
//! casts it ([`do_mon_spell`]).

use bitflags::bitflags;

use super::message::expand_message;
use super::{ALERTNESS_ALERT, MonsterId, RaceFlags, SpellFlags, Stance};
use crate::combat::{
    DamageType, Source, hit_roll, protection_roll, skill_check, total_monster_attack,
    total_player_evasion,
};
use crate::dungeon::{DDX, DDY, Loc, SquareFlags, direction_to, earthquake};
use crate::player::calcs::{adjust_dam, take_hit};
use crate::player::{Skill, Song, TimedEffect, inc_timed};
use crate::rng::Aspect;
use crate::world::{MessageType, Redraw, Update, World};

bitflags! {
    /// How a spell is delivered
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpellKind: u8 {
        /// Fired missiles, which need a clear path
        const ARCHERY = 1 << 0;
        /// Makes no sense at melee range
        const DISTANT = 1 << 1;
        const BREATH = 1 << 2;
        const SONG = 1 << 3;
        /// Natural ability rather than a cast spell
        const INNATE = 1 << 4;
    }
}

/// What a spell does once cast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellEffect {
    /// Wake every monster on the level
    Wake,
    /// Steady the morale of the caster's companions
    Rally,
    /// A missile that must hit, then get past protection
    Bolt { typ: DamageType, dd: i32, ds: i32 },
    /// Unavoidable damage, reduced by resistance
    Damage { typ: DamageType, dd: i32, ds: i32 },
    Earthquake { radius: i32 },
    /// A quake centred on the caster
    Shatter { radius: i32 },
    /// Inflict a timed effect lasting `base + 1d(base)` turns
    Timed { effect: TimedEffect, base: i32 },
    /// Unlight the squares around the player
    Darkness { radius: i32 },
}

/// Messages for casters at or above a spell power
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpellLevel {
    pub power: i32,
    pub message_vis: String,
    pub message_invis: String,
    pub message_smart: Option<String>,
    pub message_silence: Option<String>,
    pub message_save: Option<String>,
    pub message_no_save: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterSpell {
    pub flag: SpellFlags,
    pub name: String,
    /// Mana spent on a cast
    pub mana: u8,
    /// Longest distance the spell is used at
    pub range: i32,
    pub kind: SpellKind,
    /// Ordered by increasing power
    pub levels: Vec<SpellLevel>,
    pub effect: SpellEffect,
}

impl MonsterSpell {
    /// Message level for a caster of the given power
    pub fn level(&self, power: i32) -> Option<&SpellLevel> {
        let mut level = self.levels.first()?;
        for next in &self.levels[1..] {
            if power < next.power {
                break;
            }
            level = next;
        }
        Some(level)
    }
}

/// Square next to the player on the side facing the monster
fn impact_adjacent(player: Loc, mon: Loc) -> Loc {
    let d = direction_to(player, mon);
    player.offset(DDY[d], DDX[d])
}

/// Drop spells that cannot or should not be cast right now
pub fn remove_bad_spells(world: &World, mid: MonsterId, flags: SpellFlags) -> SpellFlags {
    let Some(mon) = world.monsters.get(mid) else {
        return SpellFlags::empty();
    };
    let Some(race) = world.race(mon.race) else {
        return SpellFlags::empty();
    };
    let pgrid = world.player.grid;
    let dist = mon.grid.distance(pgrid);
    let clear_path = world.cave.projectable(mon.grid, pgrid);
    let fleeing = mon.stance == Stance::Fleeing;
    let truce = world.player.truce;
    let held_back = race.flags.contains(RaceFlags::QUESTOR) && !world.crown_removed;

    let mut out = flags;
    for spell in &world.data.spells {
        if !out.contains(spell.flag) {
            continue;
        }
        let kind = spell.kind;
        let bad = (kind.contains(SpellKind::ARCHERY) && !clear_path)
            || spell.mana > mon.mana
            || dist > spell.range
            || (kind.contains(SpellKind::DISTANT) && (dist == 1 || fleeing || truce))
            || (kind.contains(SpellKind::BREATH) && fleeing)
            || (kind.contains(SpellKind::SONG) && (truce || held_back));
        if bad {
            out.remove(spell.flag);
        }
    }

    if out.contains(SpellFlags::EARTHQUAKE)
        && world.cave.monster(impact_adjacent(pgrid, mon.grid)) > 0
    {
        out.remove(SpellFlags::EARTHQUAKE);
    }
    if out.contains(SpellFlags::DARKNESS) && !world.cave.is_lit(pgrid) {
        out.remove(SpellFlags::DARKNESS);
    }
    out
}

/// Pick one usable spell at random
pub fn choose_spell(world: &mut World, mid: MonsterId) -> Option<SpellFlags> {
    let flags = world.monster_race(mid)?.spell_flags;
    let usable: Vec<SpellFlags> = remove_bad_spells(world, mid, flags).iter().collect();
    world.rng.choose(&usable).copied()
}

/// Fill in a spell message for the casting monster
fn spell_message(world: &World, mid: MonsterId, template: &str) -> String {
    expand_message(world, mid, template)
}

/// Cast a spell at the player
///
/// Returns false if the spell or the caster is unknown.
pub fn do_mon_spell(world: &mut World, flag: SpellFlags, mid: MonsterId) -> bool {
    let data = world.data.clone();
    let Some(spell) = data.spell(flag) else {
        log::warn!("no descriptor for monster spell {flag:?}");
        return false;
    };
    let Some(mon) = world.monsters.get(mid) else {
        return false;
    };
    let seen = mon.ml;
    let race_idx = mon.race as usize;
    let Some(race) = data.races.get(race_idx) else {
        return false;
    };
    let power = race.spell_power;
    let Some(level) = spell.level(power) else {
        return false;
    };

    world.disturb();

    let silenced = world.player.is_singing(Song::Silence);
    let template = if silenced && level.message_silence.is_some() {
        level.message_silence.as_deref()
    } else if !seen {
        Some(level.message_invis.as_str())
    } else if race.flags.contains(RaceFlags::SMART) && level.message_smart.is_some() {
        level.message_smart.as_deref()
    } else {
        Some(level.message_vis.as_str())
    };
    if let Some(template) = template.filter(|t| !t.is_empty()) {
        let text = spell_message(world, mid, template);
        world.messages.add(text, MessageType::MonsterSpell);
    }

    if let Some(mon) = world.monsters.get_mut(mid) {
        mon.mana = mon.mana.saturating_sub(spell.mana);
    }
    if seen {
        if let Some(lore) = world.lore.get_mut(race_idx) {
            lore.spell_flags |= flag;
            if spell.kind.contains(SpellKind::INNATE) {
                lore.cast_innate = lore.cast_innate.saturating_add(1);
            } else {
                lore.cast_spell = lore.cast_spell.saturating_add(1);
            }
        }
    }

    if let Some(save) = &level.message_save {
        let will = world.player.skill(Skill::Will);
        if skill_check(world, Source::Player, will, power, Source::Monster(mid)) > 0 {
            let text = spell_message(world, mid, save);
            world.messages.add(text, MessageType::Save);
            return true;
        }
    }
    if let Some(no_save) = &level.message_no_save {
        let text = spell_message(world, mid, no_save);
        world.messages.add(text, MessageType::MonsterSpell);
    }

    let previous = world.mon_current.replace(mid);
    spell_effect(world, mid, spell, &race.name);
    world.mon_current = previous;
    true
}

fn spell_effect(world: &mut World, mid: MonsterId, spell: &MonsterSpell, killer: &str) {
    let pgrid = world.player.grid;
    match spell.effect {
        SpellEffect::Wake => {
            for id in world.monsters.ids() {
                if let Some(m) = world.monsters.get_mut(id) {
                    m.set_alertness(m.alertness.max(ALERTNESS_ALERT));
                }
            }
        }
        SpellEffect::Rally => {
            for id in world.monsters.ids() {
                if let Some(m) = world.monsters.get_mut(id) {
                    if m.stance == Stance::Fleeing {
                        m.stance = Stance::Confident;
                    }
                    m.tmp_morale = m.tmp_morale.saturating_add(RALLY_MORALE);
                }
            }
        }
        SpellEffect::Bolt { typ, dd, ds } => {
            let base = world.monster_race(mid).map_or(0, |r| r.spell_power);
            let att = total_monster_attack(world, mid, base);
            let evn = total_player_evasion(world, Some(mid), world.player.skill(Skill::Evasion));
            if hit_roll(world, att, evn, Source::Monster(mid), Source::Player, true) <= 0 {
                let text = expand_message(world, mid, "{name} misses {target}.");
                world.messages.add(text, MessageType::Miss);
                return;
            }
            let dam = world.rng.damroll(dd, ds);
            let prot = protection_roll(world, Source::Player, typ, false, Aspect::Randomise);
            take_hit(world, dam - prot, killer);
        }
        SpellEffect::Damage { typ, dd, ds } => {
            let mut dam = world.rng.damroll(dd, ds);
            if let Some(elem) = typ.element() {
                dam = adjust_dam(&world.player, elem, dam);
            }
            take_hit(world, dam, killer);
        }
        SpellEffect::Earthquake { radius } => {
            earthquake(world, pgrid, radius);
        }
        SpellEffect::Shatter { radius } => {
            if let Some(centre) = world.monsters.get(mid).map(|m| m.grid) {
                earthquake(world, centre, radius);
            }
        }
        SpellEffect::Timed { effect, base } => {
            let duration = base + world.rng.randint1(base);
            inc_timed(world, effect, duration, true, true, true);
        }
        SpellEffect::Darkness { radius } => {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let grid = pgrid.offset(dy, dx);
                    if pgrid.distance(grid) <= radius {
                        world.cave.off(grid, SquareFlags::GLOW);
                    }
                }
            }
            world.upkeep.update |= Update::VIEW;
            world.upkeep.redraw |= Redraw::MAP;
        }
    }
}

/// Temporary morale granted by a rallying cry
const RALLY_MORALE: i16 = 20;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::dungeon::Feat;
    use crate::monster::Monster;
    use crate::rng::GameRng;
    use std::sync::Arc;

    fn caster(w: &mut World, grid: Loc) -> MonsterId {
        let orc = w
            .data
            .races
            .iter()
            .position(|r| r.spell_flags.contains(SpellFlags::ARROW1))
            .unwrap();
        w.place_monster(Monster {
            race: orc as u16,
            hp: 10,
            maxhp: 10,
            mana: 20,
            grid,
            alertness: 10,
            ml: true,
            ..Default::default()
        })
        .unwrap()
    }

    fn world(rolls: &[u32]) -> World {
        let mut w = World::new(Arc::new(GameData::standard()), GameRng::fixed(rolls));
        w.cave.fill(Loc::new(1, 1), Loc::new(20, 20), Feat::Floor);
        w.place_player(Loc::new(10, 10));
        w.player.mhp = 30;
        w.player.chp = 30;
        w
    }

    #[test]
    fn test_archery_needs_clear_path() {
        let mut w = world(&[]);
        let mid = caster(&mut w, Loc::new(10, 15));
        let all = SpellFlags::ARROW1 | SpellFlags::SCARE;
        assert!(remove_bad_spells(&w, mid, all).contains(SpellFlags::ARROW1));
        w.cave.set_feat(Loc::new(10, 12), Feat::Granite);
        let left = remove_bad_spells(&w, mid, all);
        assert!(!left.contains(SpellFlags::ARROW1));
        assert!(left.contains(SpellFlags::SCARE));
    }

    #[test]
    fn test_distant_spells_not_at_melee_range() {
        let mut w = world(&[]);
        let mid = caster(&mut w, Loc::new(10, 11));
        assert!(!remove_bad_spells(&w, mid, SpellFlags::ARROW1).contains(SpellFlags::ARROW1));
        let far = caster(&mut w, Loc::new(10, 14));
        w.player.truce = true;
        assert!(remove_bad_spells(&w, far, SpellFlags::ARROW1).is_empty());
    }

    #[test]
    fn test_mana_and_range() {
        let mut w = world(&[]);
        w.cave.fill(Loc::new(1, 1), Loc::new(20, 60), Feat::Floor);
        let mid = caster(&mut w, Loc::new(10, 14));
        assert!(!remove_bad_spells(&w, mid, SpellFlags::SCARE).is_empty());
        w.monsters.get_mut(mid).unwrap().mana = 0;
        assert!(remove_bad_spells(&w, mid, SpellFlags::SCARE).is_empty());

        let range = w.data.spell(SpellFlags::SCARE).unwrap().range;
        let far = caster(&mut w, Loc::new(10, 10 + range + 1));
        assert!(remove_bad_spells(&w, far, SpellFlags::SCARE).is_empty());
    }

    #[test]
    fn test_breath_and_songs_filtered() {
        let mut w = world(&[]);
        let mid = caster(&mut w, Loc::new(10, 13));
        w.monsters.get_mut(mid).unwrap().stance = Stance::Fleeing;
        assert!(remove_bad_spells(&w, mid, SpellFlags::BR_FIRE).is_empty());
        w.monsters.get_mut(mid).unwrap().stance = Stance::Aggressive;
        assert!(!remove_bad_spells(&w, mid, SpellFlags::BR_FIRE).is_empty());
        w.player.truce = true;
        assert!(remove_bad_spells(&w, mid, SpellFlags::SNG_BIND).is_empty());
    }

    #[test]
    fn test_situational_filters() {
        let mut w = world(&[]);
        let mid = caster(&mut w, Loc::new(10, 14));
        assert!(remove_bad_spells(&w, mid, SpellFlags::EARTHQUAKE).contains(SpellFlags::EARTHQUAKE));
        caster(&mut w, Loc::new(10, 11));
        assert!(remove_bad_spells(&w, mid, SpellFlags::EARTHQUAKE).is_empty());

        assert!(remove_bad_spells(&w, mid, SpellFlags::DARKNESS).is_empty());
        w.cave.on(Loc::new(10, 10), SquareFlags::GLOW);
        assert!(!remove_bad_spells(&w, mid, SpellFlags::DARKNESS).is_empty());
    }

    #[test]
    fn test_level_walk() {
        let spell = MonsterSpell {
            flag: SpellFlags::SCARE,
            name: String::from("scare"),
            mana: 0,
            range: 10,
            kind: SpellKind::empty(),
            levels: vec![
                SpellLevel { power: 0, message_vis: "a".into(), ..Default::default() },
                SpellLevel { power: 10, message_vis: "b".into(), ..Default::default() },
                SpellLevel { power: 20, message_vis: "c".into(), ..Default::default() },
            ],
            effect: SpellEffect::Wake,
        };
        assert_eq!(spell.level(3).unwrap().message_vis, "a");
        assert_eq!(spell.level(10).unwrap().message_vis, "b");
        assert_eq!(spell.level(99).unwrap().message_vis, "c");
    }

    #[test]
    fn test_saved_spell_has_no_effect() {
        // player rolls 10 with huge will, caster rolls 1
        let mut w = world(&[9, 0]);
        w.player.skill_use[Skill::Will as usize] = 50;
        let mid = caster(&mut w, Loc::new(10, 14));
        assert!(do_mon_spell(&mut w, SpellFlags::SCARE, mid));
        assert_eq!(w.player.timed(TimedEffect::Afraid), 0);
        assert_eq!(w.upkeep.disturb_count, 1);
        let save = w.data.spell(SpellFlags::SCARE).unwrap().levels[0]
            .message_save
            .clone()
            .unwrap();
        assert!(w.messages.contains(&save));
    }

    #[test]
    fn test_failed_save_applies_effect() {
        // player rolls 1, caster rolls 10, then the duration roll
        let mut w = world(&[0, 9, 0]);
        let mid = caster(&mut w, Loc::new(10, 14));
        w.player.skill_use[Skill::Will as usize] = -10;
        assert!(do_mon_spell(&mut w, SpellFlags::SCARE, mid));
        assert!(w.player.timed(TimedEffect::Afraid) > 0);
        assert!(w.lore[w.monsters.get(mid).unwrap().race as usize]
            .spell_flags
            .contains(SpellFlags::SCARE));
    }

    #[test]
    fn test_unseen_caster_message() {
        let mut w = world(&[]);
        let mid = caster(&mut w, Loc::new(10, 14));
        w.monsters.get_mut(mid).unwrap().ml = false;
        do_mon_spell(&mut w, SpellFlags::SHRIEK, mid);
        let invis = &w.data.spell(SpellFlags::SHRIEK).unwrap().levels[0]
            .message_invis;
        assert!(w.messages.contains(invis));
    }
}
