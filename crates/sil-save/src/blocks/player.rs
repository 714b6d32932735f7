//! Player, hitpoint table, songs and gear

use sil_core::monster::Bane;
use sil_core::player::{AbilitySet, Song, TMD_MAX};
use sil_core::{EQUIP_MAX, PACK_MAX, PY_MAX_LEVEL, SKILL_MAX, STAT_MAX, World};

use super::dungeon::{rd_item, rd_item_bounds, wr_item, wr_item_bounds};
use crate::codec::{Reader, Writer};
use crate::error::{LoadError, check_bound};

const NAME_LEN: usize = 32;
const DIED_FROM_LEN: usize = 80;
const HISTORY_LEN: usize = 250;

fn put_abilities(out: &mut Writer, set: &AbilitySet) {
    for &w in &set.0 {
        out.put_u16(w);
    }
}

fn get_abilities(input: &mut Reader<'_>, skills: usize) -> Result<AbilitySet, LoadError> {
    let mut set = AbilitySet::default();
    for w in set.0.iter_mut().take(skills) {
        *w = input.get_u16()?;
    }
    Ok(set)
}

pub(crate) fn wr_player(out: &mut Writer, world: &World) {
    let p = &world.player;
    out.put_string(&p.name);
    out.put_string(&p.died_from);
    out.put_string(&p.history);
    out.put_u8(p.race);
    out.put_u8(p.house);
    out.put_u8(p.sex);

    out.put_u8(STAT_MAX as u8);
    for i in 0..STAT_MAX {
        out.put_i16(p.stat_base[i]);
        out.put_i16(p.stat_cur[i]);
    }
    out.put_u8(SKILL_MAX as u8);
    for &s in &p.skill_base {
        out.put_i16(s);
    }
    put_abilities(out, &p.innate);
    put_abilities(out, &p.active);

    out.put_u32(p.exp);
    out.put_u32(p.new_exp);
    out.put_u32(p.encounter_exp);
    out.put_i16(p.mhp);
    out.put_i16(p.chp);
    out.put_u16(p.chp_frac);
    out.put_i16(p.msp);
    out.put_i16(p.csp);
    out.put_u16(p.csp_frac);
    out.put_i16(p.depth);
    out.put_i16(p.max_depth);
    out.put_u8(p.energy);

    out.put_u8(TMD_MAX as u8);
    for &t in &p.timed {
        out.put_i32(t);
    }

    out.put_bool(p.cursed);
    out.put_u8(p.bane.map_or(0, |b| b as u8));
    out.put_bool(p.truce);
    out.put_bool(p.attacked_last_turn);
    out.put_u8(p.consecutive_attacks);
    out.put_bool(p.is_dead);
    out.put_bool(p.escaped);
    out.put_bool(p.morgoth_slain);
    out.put_u8(p.silmarils);
    out.put_u16(p.noscore);
}

pub(crate) fn rd_player(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let name = input.get_string(NAME_LEN)?;
    let died_from = input.get_string(DIED_FROM_LEN)?;
    let history = input.get_string(HISTORY_LEN)?;
    let race = input.get_u8()?;
    if race as usize >= world.data.player_races.len() {
        return Err(LoadError::Corrupt(format!("invalid player race {race}")));
    }
    let house = input.get_u8()?;
    if house as usize >= world.data.houses.len() {
        return Err(LoadError::Corrupt(format!("invalid player house {house}")));
    }

    let p = &mut world.player;
    p.name = name;
    p.died_from = died_from;
    p.history = history;
    p.race = race;
    p.house = house;
    p.sex = input.get_u8()?;

    let stats = input.get_u8()? as usize;
    check_bound("stats", stats, STAT_MAX)?;
    for i in 0..stats {
        p.stat_base[i] = input.get_i16()?;
        p.stat_cur[i] = input.get_i16()?;
    }
    let skills = input.get_u8()? as usize;
    check_bound("skills", skills, SKILL_MAX)?;
    for s in p.skill_base.iter_mut().take(skills) {
        *s = input.get_i16()?;
    }
    p.innate = get_abilities(input, skills)?;
    p.active = get_abilities(input, skills)?;

    p.exp = input.get_u32()?;
    p.new_exp = input.get_u32()?;
    p.encounter_exp = input.get_u32()?;
    p.mhp = input.get_i16()?;
    p.chp = input.get_i16()?;
    p.chp_frac = input.get_u16()?;
    p.msp = input.get_i16()?;
    p.csp = input.get_i16()?;
    p.csp_frac = input.get_u16()?;
    p.depth = input.get_i16()?;
    p.max_depth = input.get_i16()?;
    p.energy = input.get_u8()?;

    let timed = input.get_u8()? as usize;
    check_bound("timed effects", timed, TMD_MAX)?;
    p.timed = [0; TMD_MAX];
    for t in p.timed.iter_mut().take(timed) {
        *t = input.get_i32()?;
    }

    p.cursed = input.get_bool()?;
    p.bane = Bane::from_repr(input.get_u8()?);
    p.truce = input.get_bool()?;
    p.attacked_last_turn = input.get_bool()?;
    p.consecutive_attacks = input.get_u8()?;
    p.is_dead = input.get_bool()?;
    p.escaped = input.get_bool()?;
    p.morgoth_slain = input.get_bool()?;
    p.silmarils = input.get_u8()?;
    p.noscore = input.get_u16()?;
    Ok(())
}

pub(crate) fn wr_player_hp(out: &mut Writer, world: &World) {
    out.put_u16(world.player.player_hp.len() as u16);
    for &hp in &world.player.player_hp {
        out.put_i16(hp);
    }
}

pub(crate) fn rd_player_hp(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let n = input.get_u16()? as usize;
    check_bound("hitpoint entries", n, PY_MAX_LEVEL)?;
    let mut table = vec![0; PY_MAX_LEVEL];
    for hp in table.iter_mut().take(n) {
        *hp = input.get_i16()?;
    }
    world.player.player_hp = table;
    Ok(())
}

pub(crate) fn wr_player_spells(out: &mut Writer, world: &World) {
    out.put_u8(world.player.song1 as u8);
    out.put_u8(world.player.song2 as u8);
    out.put_i16(world.player.song_duration);
}

pub(crate) fn rd_player_spells(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let mut song = || -> Result<Song, LoadError> {
        let v = input.get_u8()?;
        Song::from_repr(v).ok_or_else(|| LoadError::Corrupt(format!("unknown song {v}")))
    };
    let song1 = song()?;
    let song2 = song()?;
    world.player.song1 = song1;
    world.player.song2 = song2;
    world.player.song_duration = input.get_i16()?;
    Ok(())
}

/// Equipment slots then the pack
pub(crate) fn wr_gear(out: &mut Writer, world: &World) {
    wr_item_bounds(out);
    out.put_u8(EQUIP_MAX as u8);
    for slot in &world.player.equipment {
        out.put_bool(slot.is_some());
        if let Some(obj) = slot {
            wr_item(out, obj, &world.quarks);
        }
    }
    out.put_u8(world.player.inventory.len() as u8);
    for obj in &world.player.inventory {
        wr_item(out, obj, &world.quarks);
    }
}

pub(crate) fn rd_gear(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let bounds = rd_item_bounds(input)?;
    let kinds = world.data.kinds.len();
    let slots = input.get_u8()? as usize;
    check_bound("equipment slots", slots, EQUIP_MAX)?;

    let mut equipment: [_; EQUIP_MAX] = Default::default();
    for slot in equipment.iter_mut().take(slots) {
        if input.get_bool()? {
            *slot = Some(rd_item(input, &bounds, &mut world.quarks, kinds)?);
        }
    }
    let carried = input.get_u8()? as usize;
    check_bound("pack items", carried, PACK_MAX)?;
    let mut inventory = Vec::with_capacity(carried);
    for _ in 0..carried {
        inventory.push(rd_item(input, &bounds, &mut world.quarks, kinds)?);
    }

    world.player.equipment = equipment;
    world.player.inventory = inventory;
    Ok(())
}
