//! Monster blows
//!
//! A blow pairs a delivery method (how it lands) with an effect (what it
//! does once it lands). Both are closed sets looked up by name when the
//! race tables are loaded.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::MonsterId;
use crate::combat::{Element, Source, skill_check};
use crate::data::DataError;
use crate::dungeon::earthquake;
use crate::object::Tval;
use crate::player::calcs::{adjust_dam, player_stat_dec, take_hit};
use crate::player::{EquipSlot, Stat, TimedEffect, inc_timed};
use crate::world::{MessageType, World};

/// How a blow is delivered
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BlowMethod {
    Hit,
    Touch,
    Punch,
    Kick,
    Claw,
    Bite,
    Sting,
    Butt,
    Crush,
    Engulf,
    Crawl,
    Spore,
    Beg,
    Insult,
}

impl BlowMethod {
    pub fn from_name(name: &str) -> Result<Self, DataError> {
        Self::iter()
            .find(|m| m.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| DataError::UnknownName {
                kind: "blow method",
                name: name.to_string(),
            })
    }

    /// Can this method cause cuts
    pub const fn cuts(self) -> bool {
        matches!(self, BlowMethod::Claw | BlowMethod::Bite | BlowMethod::Sting)
    }

    /// Can this method cause stunning
    pub const fn stuns(self) -> bool {
        matches!(
            self,
            BlowMethod::Hit | BlowMethod::Punch | BlowMethod::Kick | BlowMethod::Butt | BlowMethod::Crush
        )
    }

    /// Whether a miss is worth mentioning
    pub const fn shows_miss(self) -> bool {
        !matches!(self, BlowMethod::Spore | BlowMethod::Beg | BlowMethod::Insult)
    }

    /// Message template, completed by the monster's name
    pub const fn action(self) -> &'static str {
        match self {
            BlowMethod::Hit => "hits {target}",
            BlowMethod::Touch => "touches {target}",
            BlowMethod::Punch => "punches {target}",
            BlowMethod::Kick => "kicks {target}",
            BlowMethod::Claw => "claws {target}",
            BlowMethod::Bite => "bites {target}",
            BlowMethod::Sting => "stings {target}",
            BlowMethod::Butt => "butts {target}",
            BlowMethod::Crush => "crushes {target}",
            BlowMethod::Engulf => "engulfs {target}",
            BlowMethod::Crawl => "crawls on {target}",
            BlowMethod::Spore => "releases spores at {target}",
            BlowMethod::Beg => "begs {target} for money",
            BlowMethod::Insult => "insults {target}!",
        }
    }
}

/// What a blow does when it lands
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BlowEffect {
    None,
    Hurt,
    Wound,
    Batter,
    Shatter,
    Poison,
    Blind,
    Confuse,
    Terrify,
    Entrance,
    Hallu,
    LoseStr,
    LoseDex,
    LoseCon,
    LoseGra,
    LoseAll,
    Disarm,
    EatItem,
    EatFood,
    Fire,
    Cold,
    Dark,
}

/// State shared between the blow loop and an effect handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlowContext {
    pub mon: MonsterId,
    pub method: BlowMethod,
    /// Damage before protection
    pub dam: i32,
    /// Damage after protection
    pub net_dam: i32,
    pub do_cut: bool,
    pub do_stun: bool,
    /// The player can tell what happened
    pub obvious: bool,
}

/// Radius of the quake a shattering blow sets off
const SHATTER_RADIUS: i32 = 2;

impl BlowEffect {
    /// Look up an effect by its data-file name, ignoring case
    pub fn from_name(name: &str) -> Result<Self, DataError> {
        Self::iter()
            .find(|e| e.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| DataError::UnknownName {
                kind: "blow effect",
                name: name.to_string(),
            })
    }

    /// Elemental effects and the element they deal
    pub const fn element(self) -> Option<Element> {
        match self {
            BlowEffect::Poison => Some(Element::Poison),
            BlowEffect::Fire => Some(Element::Fire),
            BlowEffect::Cold => Some(Element::Cold),
            BlowEffect::Dark => Some(Element::Dark),
            _ => None,
        }
    }

    /// Apply the effect of a blow that has landed
    pub fn apply(self, world: &mut World, ctx: &mut BlowContext) {
        let killer = world
            .monster_race(ctx.mon)
            .map_or_else(|| String::from("a monster"), |r| r.name.clone());
        let level = world.monster_race(ctx.mon).map_or(1, |r| r.level.max(1));

        match self {
            BlowEffect::None => {}
            BlowEffect::Hurt => {
                ctx.obvious = true;
                take_hit(world, ctx.net_dam, &killer);
            }
            BlowEffect::Wound => {
                ctx.obvious = true;
                take_hit(world, ctx.net_dam, &killer);
                if ctx.do_stun && world.rng.randint0(5) < 4 {
                    ctx.do_stun = false;
                }
                ctx.do_cut = true;
            }
            BlowEffect::Batter | BlowEffect::Shatter => {
                ctx.obvious = true;
                take_hit(world, ctx.net_dam, &killer);
                if ctx.do_cut && world.rng.randint0(5) < 4 {
                    ctx.do_cut = false;
                }
                ctx.do_stun = true;
                if self == BlowEffect::Shatter && ctx.dam > ctx.net_dam {
                    let centre = world.player.grid;
                    if earthquake(world, centre, SHATTER_RADIUS) > 0 {
                        world
                            .messages
                            .add("The ground shakes!", MessageType::Earthquake);
                    }
                }
            }
            BlowEffect::Poison | BlowEffect::Fire | BlowEffect::Cold | BlowEffect::Dark => {
                let Some(elem) = self.element() else {
                    return;
                };
                let dam = adjust_dam(&world.player, elem, ctx.net_dam);
                if dam < ctx.net_dam {
                    world.messages.add("You resist.", MessageType::Resist);
                }
                take_hit(world, dam, &killer);
                if self == BlowEffect::Poison && dam > 0 {
                    inc_timed(world, TimedEffect::Poisoned, dam, true, true, true);
                }
                ctx.obvious = true;
            }
            BlowEffect::Blind
            | BlowEffect::Confuse
            | BlowEffect::Terrify
            | BlowEffect::Entrance
            | BlowEffect::Hallu => {
                take_hit(world, ctx.net_dam, &killer);
                let effect = match self {
                    BlowEffect::Blind => TimedEffect::Blind,
                    BlowEffect::Confuse => TimedEffect::Confused,
                    BlowEffect::Terrify => TimedEffect::Afraid,
                    BlowEffect::Entrance => TimedEffect::Entranced,
                    _ => TimedEffect::Image,
                };
                let duration = 3 + world.rng.randint1(level);
                if inc_timed(world, effect, duration, true, true, true) {
                    ctx.obvious = true;
                }
            }
            BlowEffect::LoseStr | BlowEffect::LoseDex | BlowEffect::LoseCon | BlowEffect::LoseGra => {
                take_hit(world, ctx.net_dam, &killer);
                let stat = match self {
                    BlowEffect::LoseStr => Stat::Str,
                    BlowEffect::LoseDex => Stat::Dex,
                    BlowEffect::LoseCon => Stat::Con,
                    _ => Stat::Gra,
                };
                player_stat_dec(world, stat);
                ctx.obvious = true;
            }
            BlowEffect::LoseAll => {
                take_hit(world, ctx.net_dam, &killer);
                for stat in Stat::iter() {
                    player_stat_dec(world, stat);
                }
                ctx.obvious = true;
            }
            BlowEffect::Disarm => {
                take_hit(world, ctx.net_dam, &killer);
                if disarm(world, ctx.mon, level) {
                    ctx.obvious = true;
                }
            }
            BlowEffect::EatItem => {
                take_hit(world, ctx.net_dam, &killer);
                if steal_item(world, ctx.mon, |_| true) {
                    ctx.obvious = true;
                }
            }
            BlowEffect::EatFood => {
                take_hit(world, ctx.net_dam, &killer);
                if steal_item(world, ctx.mon, |tval| tval == Tval::Food) {
                    ctx.obvious = true;
                }
            }
        }
    }
}

/// Knock the player's weapon to the floor on an opposed strength check
fn disarm(world: &mut World, mid: MonsterId, level: i32) -> bool {
    if world.player.equipped(EquipSlot::Weapon).is_none() {
        return false;
    }
    let difficulty = 10 + 2 * world.player.stat(Stat::Str) as i32;
    if skill_check(world, Source::Monster(mid), level, difficulty, Source::Player) <= 0 {
        return false;
    }
    let Some(weapon) = world.player.equipment[EquipSlot::Weapon as usize].take() else {
        return false;
    };
    let grid = world.player.grid;
    if world.floor_carry(grid, weapon.clone()).is_none() {
        log::warn!("no room on the floor for a disarmed weapon");
        world.player.equipment[EquipSlot::Weapon as usize] = Some(weapon);
        return false;
    }
    world
        .messages
        .add("Your weapon is knocked from your grasp!", MessageType::Disarm);
    true
}

/// Take one item matching `wanted` from the pack and give it to the thief
fn steal_item(world: &mut World, mid: MonsterId, wanted: impl Fn(Tval) -> bool) -> bool {
    let candidates: Vec<usize> = world
        .player
        .inventory
        .iter()
        .enumerate()
        .filter(|(_, o)| !o.is_empty() && wanted(o.tval))
        .map(|(i, _)| i)
        .collect();
    let Some(&slot) = world.rng.choose(&candidates) else {
        return false;
    };

    let mut taken = world.player.inventory[slot].clone();
    taken.number = 1;
    // Eaten food is gone; stolen goods ride along with the thief
    if taken.tval != Tval::Food && world.monster_carry(mid, taken.clone()).is_none() {
        log::warn!("monster {} has no room for a stolen item", mid.0);
        return false;
    }
    let stack = &mut world.player.inventory[slot];
    if stack.number > 1 {
        stack.number -= 1;
    } else {
        world.player.inventory.remove(slot);
    }

    let (text, typ) = if taken.tval == Tval::Food {
        ("Your food has been eaten!", MessageType::Eat)
    } else {
        ("Something has been stolen from your pack!", MessageType::Steal)
    };
    world.messages.add(text, typ);
    true
}
