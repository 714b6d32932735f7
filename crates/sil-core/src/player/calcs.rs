//! Derived player values: stat and skill totals, resistances, damage

use strum::IntoEnumIterator;

use super::{Ability, EquipSlot, Player, Skill, Stat};
use crate::combat::Element;
use crate::consts::PY_MAX_LEVEL;
use crate::data::GameData;
use crate::object::{ObjFlags, Tval};
use crate::world::{MessageType, Redraw, World};

/// Experience needed for each level after the first
fn level_threshold(level: u32) -> u32 {
    100 * level * level
}

/// Character level implied by an experience total
pub fn exp_level(exp: u32) -> usize {
    (1..PY_MAX_LEVEL as u32)
        .take_while(|&l| exp >= level_threshold(l))
        .count()
        + 1
}

/// Recompute stat_use, skill_use and maximum hit points
pub fn update_bonuses(player: &mut Player, data: &GameData) {
    let race = data.player_races.get(player.race as usize);
    let house = data.houses.get(player.house as usize);

    for stat in Stat::iter() {
        let i = stat as usize;
        let equip: i16 = player.equipment_iter().map(|(_, o)| o.bonus_stat[i]).sum();
        player.stat_use[i] = player.stat_cur[i] + equip;
    }

    for skill in Skill::iter() {
        let i = skill as usize;
        let mut v = player.skill_base[i] + player.stat_use[skill.stat() as usize];
        v += race.map_or(0, |r| r.skill_adj[i]);
        v += house.map_or(0, |h| h.skill_adj[i]);
        if let Some(bonus) = bonus_index(skill) {
            v += player
                .equipment_iter()
                .map(|(_, o)| o.bonus_other[bonus])
                .sum::<i16>();
        }
        player.skill_use[i] = v;
    }

    let level = exp_level(player.exp);
    let con = player.stat_use[Stat::Con as usize] as i32;
    let base = player.player_hp.get(level - 1).copied().unwrap_or(0) as i32;
    player.mhp = (base + 3 * con).max(1) as i16;
    if player.chp > player.mhp {
        player.chp = player.mhp;
    }
}

/// Which slot of an item's `bonus_other` array modifies a skill
const fn bonus_index(skill: Skill) -> Option<usize> {
    match skill {
        Skill::Melee => Some(0),
        Skill::Archery => Some(1),
        Skill::Evasion => Some(2),
        Skill::Stealth => Some(3),
        Skill::Perception => Some(4),
        Skill::Will => Some(5),
        Skill::Smithing | Skill::Song => None,
    }
}

/// Does any equipped item carry `flag`?
pub fn player_has_flag(player: &Player, flag: ObjFlags) -> bool {
    player.equipment_iter().any(|(_, o)| o.flags.contains(flag))
}

/// Permanent resistance level to an element
pub fn perm_resist(player: &Player, elem: Element) -> i32 {
    let mut level = player
        .equipment_iter()
        .filter(|(_, o)| o.flags.intersects(elem.res_flag()))
        .count() as i32;
    if elem == Element::Poison && player.innate.has(Ability::PoisonResistance) {
        level += 1;
    }
    level
}

/// Total resistance level, counting temporary resistance
pub fn resist_level(player: &Player, elem: Element) -> i32 {
    let temp = elem
        .temp_effect()
        .is_some_and(|t| player.timed(t) > 0) as i32;
    perm_resist(player, elem) + temp
}

/// Reduce elemental damage by resistance: each level divides it further
pub fn adjust_dam(player: &Player, elem: Element, dam: i32) -> i32 {
    dam / (resist_level(player, elem) + 1)
}

/// Weight of worn armour, in tenths of a pound
pub fn armour_weight(player: &Player) -> i32 {
    player
        .equipment_iter()
        .filter(|(_, o)| o.tval.is_armour())
        .map(|(_, o)| o.total_weight())
        .sum()
}

/// Whether the off-hand slot holds a real shield
pub fn has_shield(player: &Player) -> bool {
    player
        .equipped(EquipSlot::Shield)
        .is_some_and(|o| o.tval == Tval::Shield)
}

/// Apply damage to the player
pub fn take_hit(world: &mut World, dam: i32, kb_str: &str) {
    if world.player.is_dead || dam <= 0 {
        return;
    }
    world.disturb();
    world.player.chp = (world.player.chp as i32 - dam).max(i16::MIN as i32) as i16;
    world.upkeep.redraw |= Redraw::HP;
    if world.player.chp < 0 {
        world.messages.add("You die.", MessageType::Death);
        world.player.is_dead = true;
        world.player.died_from = kb_str.to_string();
        log::debug!("player killed by {kb_str}");
    }
}

/// Drain a stat by one point unless it is sustained
///
/// Returns whether the stat actually dropped.
pub fn player_stat_dec(world: &mut World, stat: Stat) -> bool {
    let sustain = match stat {
        Stat::Str => ObjFlags::SUST_STR,
        Stat::Dex => ObjFlags::SUST_DEX,
        Stat::Con => ObjFlags::SUST_CON,
        Stat::Gra => ObjFlags::SUST_GRA,
    };
    if player_has_flag(&world.player, sustain) {
        world.messages.add(
            format!("You feel very {} for a moment, but the feeling passes.", drain_word(stat)),
            MessageType::Drain,
        );
        return false;
    }
    world.player.stat_cur[stat as usize] -= 1;
    world.messages.add(format!("You feel very {}.", drain_word(stat)), MessageType::Drain);
    let data = world.data.clone();
    update_bonuses(&mut world.player, &data);
    world.upkeep.redraw |= Redraw::STATS;
    true
}

fn drain_word(stat: Stat) -> &'static str {
    match stat {
        Stat::Str => "weak",
        Stat::Dex => "clumsy",
        Stat::Con => "sickly",
        Stat::Gra => "dull",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;
    use crate::player::TimedEffect;

    #[test]
    fn test_exp_level() {
        assert_eq!(exp_level(0), 1);
        assert_eq!(exp_level(99), 1);
        assert_eq!(exp_level(100), 2);
        assert_eq!(exp_level(400), 3);
        assert_eq!(exp_level(u32::MAX), PY_MAX_LEVEL);
    }

    #[test]
    fn test_resist_levels_stack() {
        let mut p = Player::default();
        p.equipment[EquipSlot::Ring1 as usize] = Some(Object {
            kind: 1,
            tval: Tval::Ring,
            flags: ObjFlags::RES_FIRE,
            ..Default::default()
        });
        assert_eq!(perm_resist(&p, Element::Fire), 1);
        p.timed[TimedEffect::OppFire as usize] = 10;
        assert_eq!(resist_level(&p, Element::Fire), 2);
        assert_eq!(adjust_dam(&p, Element::Fire, 30), 10);
        assert_eq!(resist_level(&p, Element::Cold), 0);
    }

    #[test]
    fn test_armour_weight_ignores_weapons() {
        let mut p = Player::default();
        p.equipment[EquipSlot::Body as usize] = Some(Object {
            kind: 1,
            tval: Tval::Mail,
            weight: 250,
            number: 1,
            ..Default::default()
        });
        p.equipment[EquipSlot::Weapon as usize] = Some(Object {
            kind: 2,
            tval: Tval::Sword,
            weight: 100,
            number: 1,
            ..Default::default()
        });
        assert_eq!(armour_weight(&p), 250);
    }
}
