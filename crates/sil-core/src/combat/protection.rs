//! Protection dice
//!
//! Damage is reduced by a roll of the defender's protection dice. Armour
//! only stops physical damage; jewellery protects against everything.

use super::{DamageType, Source};
use crate::object::Tval;
use crate::player::calcs::armour_weight;
use crate::player::{Ability, EquipSlot, Skill, Song};
use crate::rng::Aspect;
use crate::world::World;

/// Armour weight (tenths of a pound) at which armour proficiency starts
/// to pay off
const ARMOUR_PROFICIENCY_MIN: i32 = 300;

/// Roll protection for the target of an attack
///
/// `melee` marks attacks made in hand-to-hand combat, which a shield only
/// blocks fully when the player did not attack last turn.
pub fn protection_roll(
    world: &mut World,
    target: Source,
    typ: DamageType,
    melee: bool,
    aspect: Aspect,
) -> i32 {
    match target {
        Source::Player => player_protection(world, typ, melee, aspect),
        Source::Monster(mid) => {
            let Some((pd, ps)) = world.monster_race(mid).map(|r| (r.pd, r.ps))
            else {
                return 0;
            };
            world.rng.aspect_roll(pd, ps, aspect)
        }
        Source::None => 0,
    }
}

fn player_protection(world: &mut World, typ: DamageType, melee: bool, aspect: Aspect) -> i32 {
    let p = &world.player;
    let hurt = typ == DamageType::Hurt;
    let mut dice = Vec::new();
    let mut flat = 0;

    if p.is_singing(Song::Staying) {
        dice.push((1, p.skill(Skill::Song) / 3));
    }
    if p.active_ability(Ability::Hardiness) {
        flat += 1;
    }

    for (slot, obj) in p.equipment_iter() {
        if slot == EquipSlot::Shield && obj.tval != Tval::Shield {
            continue;
        }
        if !hurt && !slot.is_jewellery() {
            continue;
        }
        let mut pd = obj.pd as i32;
        if slot == EquipSlot::Shield
            && hurt
            && p.active_ability(Ability::Blocking)
            && (!melee || !p.attacked_last_turn)
        {
            pd *= 2;
        }
        dice.push((pd, obj.ps as i32));
    }

    if hurt && p.active_ability(Ability::ArmourProficiency) {
        let weight = armour_weight(p);
        if weight >= ARMOUR_PROFICIENCY_MIN {
            flat += weight / 100;
        }
    }

    dice.into_iter()
        .map(|(n, s)| world.rng.aspect_roll(n, s, aspect))
        .sum::<i32>()
        + flat
}
