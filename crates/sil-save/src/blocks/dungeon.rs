//! Cave, object, monster and trap records
//!
//! These four make up both the level part of the savefile and the whole
//! of a chunk file, so they work on the parts directly rather than on a
//! [`World`](sil_core::World).

use sil_core::dungeon::{Cave, Feat, Loc, SquareFlags, Trap, TrapFlags};
use sil_core::monster::{MON_TMD_MAX, Monster, MonsterId, MonsterList, Stance};
use sil_core::object::{
    CurseFlags, IdentFlags, ObjFlags, Object, ObjectId, ObjectList, QuarkTable, Tval,
};
use sil_core::{
    DUNGEON_HGT, DUNGEON_WID, MAX_P_BONUS, MAX_P_BRAND, MAX_P_RES, MAX_P_SLAY, MONSTER_MAX,
    OBJECT_MAX, STAT_MAX, TRAP_MAX,
};

use crate::codec::{Reader, Writer};
use crate::error::{LoadError, check_bound};
use crate::rle::{rle_decode, rle_encode};

/// Longest inscription kept on load
const INSCRIPTION_LEN: usize = 80;

fn put_grid(out: &mut Writer, grid: Loc) {
    out.put_u8(grid.y as u8);
    out.put_u8(grid.x as u8);
}

fn get_grid(input: &mut Reader<'_>) -> Result<Loc, LoadError> {
    let y = input.get_u8()? as i32;
    let x = input.get_u8()? as i32;
    Ok(Loc::new(y, x))
}

/// Terrain and square flags, one RLE plane per flag byte plus the features
pub(crate) fn wr_cave(out: &mut Writer, cave: &Cave) {
    out.put_i16(cave.depth as i16);
    out.put_u16(cave.height as u16);
    out.put_u16(cave.width as u16);
    out.put_u8(SquareFlags::BYTES as u8);

    let (h, w) = (cave.height as usize, cave.width as usize);
    for plane in 0..SquareFlags::BYTES {
        rle_encode(out, h, w, |y, x| {
            cave.info(Loc::new(y as i32, x as i32)).to_bytes()[plane]
        });
    }
    rle_encode(out, h, w, |y, x| cave.feat(Loc::new(y as i32, x as i32)) as u8);
}

pub(crate) fn rd_cave(input: &mut Reader<'_>) -> Result<Cave, LoadError> {
    let depth = input.get_i16()? as i32;
    let height = input.get_u16()? as usize;
    let width = input.get_u16()? as usize;
    check_bound("dungeon rows", height, DUNGEON_HGT as usize)?;
    check_bound("dungeon columns", width, DUNGEON_WID as usize)?;
    let square_size = input.get_u8()? as usize;
    check_bound("square flag bytes", square_size, SquareFlags::BYTES)?;

    let mut info = vec![[0u8; SquareFlags::BYTES]; height * width];
    for plane in 0..square_size {
        rle_decode(input, height, width, |y, x, v| info[y * width + x][plane] = v)?;
    }

    let mut cave = Cave::new(height as i32, width as i32);
    cave.depth = depth;
    let mut bad_feat = None;
    rle_decode(input, height, width, |y, x, v| {
        let grid = Loc::new(y as i32, x as i32);
        match Feat::from_repr(v) {
            Some(feat) => cave.set_feat(grid, feat),
            None => bad_feat = Some(v),
        }
        cave.set_info(grid, SquareFlags::from_bytes(&info[y * width + x]));
    })?;
    if let Some(v) = bad_feat {
        return Err(LoadError::Corrupt(format!("unknown terrain {v}")));
    }
    Ok(cave)
}

/// Array sizes declared ahead of a run of item records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ItemBounds {
    obj_flags: usize,
    curse_flags: usize,
    ident_flags: usize,
    res: usize,
    stats: usize,
    bonus: usize,
    slay: usize,
    brand: usize,
}

pub(crate) fn wr_item_bounds(out: &mut Writer) {
    for n in [
        ObjFlags::BYTES,
        CurseFlags::BYTES,
        IdentFlags::BYTES,
        MAX_P_RES,
        STAT_MAX,
        MAX_P_BONUS,
        MAX_P_SLAY,
        MAX_P_BRAND,
    ] {
        out.put_u8(n as u8);
    }
}

pub(crate) fn rd_item_bounds(input: &mut Reader<'_>) -> Result<ItemBounds, LoadError> {
    let mut next = |what: &'static str, max: usize| -> Result<usize, LoadError> {
        let n = input.get_u8()? as usize;
        check_bound(what, n, max)?;
        Ok(n)
    };
    Ok(ItemBounds {
        obj_flags: next("object flag bytes", ObjFlags::BYTES)?,
        curse_flags: next("curse flag bytes", CurseFlags::BYTES)?,
        ident_flags: next("identify flag bytes", IdentFlags::BYTES)?,
        res: next("resistances", MAX_P_RES)?,
        stats: next("stat bonuses", STAT_MAX)?,
        bonus: next("misc bonuses", MAX_P_BONUS)?,
        slay: next("slays", MAX_P_SLAY)?,
        brand: next("brands", MAX_P_BRAND)?,
    })
}

pub(crate) fn wr_item(out: &mut Writer, obj: &Object, quarks: &QuarkTable) {
    out.put_u16(obj.kind);
    out.put_u8(obj.tval as u8);
    out.put_u8(obj.sval);
    out.put_i16(obj.pval);
    out.put_u8(obj.number);
    out.put_i16(obj.weight);
    put_grid(out, obj.grid);

    out.put_i16(obj.att);
    out.put_u8(obj.dd);
    out.put_u8(obj.ds);
    out.put_i16(obj.evn);
    out.put_u8(obj.pd);
    out.put_u8(obj.ps);

    out.put_u8(obj.artifact);
    out.put_u8(obj.ego);
    out.put_i16(obj.timeout);

    out.put_bytes(&obj.flags.to_bytes());
    out.put_bytes(&obj.curses.to_bytes());
    out.put_bytes(&obj.ident.to_bytes());

    for &v in &obj.percent_res {
        out.put_i16(v);
    }
    for v in obj
        .bonus_stat
        .iter()
        .chain(&obj.bonus_other)
        .chain(&obj.multiple_slay)
        .chain(&obj.multiple_brand)
    {
        out.put_wrapped(*v);
    }

    out.put_string(quarks.get(obj.inscription));
    out.put_u16(obj.held_m_idx.0);
    out.put_u16(obj.next_o_idx.0);
    out.put_u8(obj.origin);
    out.put_u8(obj.origin_depth);
    out.put_u16(obj.origin_race);
    out.put_bool(obj.marked);
}

pub(crate) fn rd_item(
    input: &mut Reader<'_>,
    bounds: &ItemBounds,
    quarks: &mut QuarkTable,
    kinds: usize,
) -> Result<Object, LoadError> {
    let mut obj = Object {
        kind: input.get_u16()?,
        ..Default::default()
    };
    if obj.kind == 0 || obj.kind as usize >= kinds {
        return Err(LoadError::Corrupt(format!("unknown object kind {}", obj.kind)));
    }
    let tval = input.get_u8()?;
    obj.tval = Tval::from_repr(tval)
        .ok_or_else(|| LoadError::Corrupt(format!("unknown object type {tval}")))?;
    obj.sval = input.get_u8()?;
    obj.pval = input.get_i16()?;
    obj.number = input.get_u8()?;
    obj.weight = input.get_i16()?;
    obj.grid = get_grid(input)?;

    obj.att = input.get_i16()?;
    obj.dd = input.get_u8()?;
    obj.ds = input.get_u8()?;
    obj.evn = input.get_i16()?;
    obj.pd = input.get_u8()?;
    obj.ps = input.get_u8()?;

    obj.artifact = input.get_u8()?;
    obj.ego = input.get_u8()?;
    obj.timeout = input.get_i16()?;

    obj.flags = ObjFlags::from_bytes(input.get_bytes(bounds.obj_flags)?);
    obj.curses = CurseFlags::from_bytes(input.get_bytes(bounds.curse_flags)?);
    obj.ident = IdentFlags::from_bytes(input.get_bytes(bounds.ident_flags)?);

    for v in obj.percent_res.iter_mut().take(bounds.res) {
        *v = input.get_i16()?;
    }
    for (arr, n) in [
        (&mut obj.bonus_stat[..], bounds.stats),
        (&mut obj.bonus_other[..], bounds.bonus),
        (&mut obj.multiple_slay[..], bounds.slay),
        (&mut obj.multiple_brand[..], bounds.brand),
    ] {
        for v in arr.iter_mut().take(n) {
            *v = input.get_wrapped()?;
        }
    }

    let inscription = input.get_string(INSCRIPTION_LEN)?;
    obj.inscription = quarks.add(&inscription);
    obj.held_m_idx = MonsterId(input.get_u16()?);
    obj.next_o_idx = ObjectId(input.get_u16()?);
    obj.origin = input.get_u8()?;
    obj.origin_depth = input.get_u8()?;
    obj.origin_race = input.get_u16()?;
    obj.marked = input.get_bool()?;
    Ok(obj)
}

/// Every live object with its slot
pub(crate) fn wr_objects(out: &mut Writer, objects: &ObjectList, quarks: &QuarkTable) {
    out.put_u16(objects.o_max() as u16);
    wr_item_bounds(out);
    out.put_u16(objects.count() as u16);
    for (id, obj) in objects.iter() {
        out.put_u16(id.0);
        wr_item(out, obj, quarks);
    }
}

/// Rebuild an object list at its saved slots
pub(crate) fn rd_objects(
    input: &mut Reader<'_>,
    quarks: &mut QuarkTable,
    kinds: usize,
) -> Result<ObjectList, LoadError> {
    let o_max = input.get_u16()? as usize;
    check_bound("objects", o_max, OBJECT_MAX)?;
    let bounds = rd_item_bounds(input)?;
    let count = input.get_u16()? as usize;
    check_bound("live objects", count, o_max)?;

    let mut objects = ObjectList::new();
    if o_max > 1 {
        objects.set_slot(ObjectId(o_max as u16 - 1), Object::default());
    }
    for _ in 0..count {
        let idx = input.get_u16()?;
        if idx == 0 || idx as usize >= o_max {
            return Err(LoadError::Corrupt(format!("object slot {idx} out of range")));
        }
        let obj = rd_item(input, &bounds, quarks, kinds)?;
        objects.set_slot(ObjectId(idx), obj);
    }
    Ok(objects)
}

fn wr_monster(out: &mut Writer, mon: &Monster) {
    out.put_u16(mon.race);
    out.put_u16(mon.original_race);
    put_grid(out, mon.grid);
    out.put_i32(mon.hp);
    out.put_i32(mon.maxhp);
    out.put_u8(mon.mana);
    out.put_u8(mon.song);
    out.put_u8(mon.energy);
    out.put_u8(mon.mspeed);
    out.put_i16(mon.alertness);
    out.put_u8(mon.stance as u8);
    out.put_i16(mon.morale);
    out.put_i16(mon.tmp_morale);
    for &t in &mon.timed {
        out.put_i16(t);
    }
    put_grid(out, mon.target);
    out.put_u16(mon.group);
    put_grid(out, mon.home);
    out.put_u16(mon.hold_o_idx.0);
    out.put_bool(mon.ml);
    out.put_bool(mon.skip_next_turn);
    out.put_u8(mon.consecutive_attacks);
}

/// One monster; version 1 predates shapechangers
fn rd_monster(
    input: &mut Reader<'_>,
    version: u32,
    timed: usize,
    races: usize,
) -> Result<Monster, LoadError> {
    let mut mon = Monster {
        race: input.get_u16()?,
        ..Default::default()
    };
    if mon.race == 0 || mon.race as usize >= races {
        return Err(LoadError::Corrupt(format!("unknown monster race {}", mon.race)));
    }
    if version >= 2 {
        mon.original_race = input.get_u16()?;
    }
    mon.grid = get_grid(input)?;
    mon.hp = input.get_i32()?;
    mon.maxhp = input.get_i32()?;
    mon.mana = input.get_u8()?;
    mon.song = input.get_u8()?;
    mon.energy = input.get_u8()?;
    mon.mspeed = input.get_u8()?;
    mon.alertness = input.get_i16()?;
    let stance = input.get_u8()?;
    mon.stance = Stance::from_repr(stance)
        .ok_or_else(|| LoadError::Corrupt(format!("unknown stance {stance}")))?;
    mon.morale = input.get_i16()?;
    mon.tmp_morale = input.get_i16()?;
    for t in mon.timed.iter_mut().take(timed) {
        *t = input.get_i16()?;
    }
    mon.target = get_grid(input)?;
    mon.group = input.get_u16()?;
    mon.home = get_grid(input)?;
    mon.hold_o_idx = ObjectId(input.get_u16()?);
    mon.ml = input.get_bool()?;
    mon.skip_next_turn = input.get_bool()?;
    mon.consecutive_attacks = input.get_u8()?;
    Ok(mon)
}

pub(crate) fn wr_monsters(out: &mut Writer, monsters: &MonsterList) {
    out.put_u16(monsters.max() as u16);
    out.put_u8(MON_TMD_MAX as u8);
    out.put_u16(monsters.count() as u16);
    for (id, mon) in monsters.iter() {
        out.put_u16(id.0);
        wr_monster(out, mon);
    }
}

/// Rebuild a monster list at its saved slots
pub(crate) fn rd_monsters(
    input: &mut Reader<'_>,
    version: u32,
    races: usize,
) -> Result<MonsterList, LoadError> {
    let m_max = input.get_u16()? as usize;
    check_bound("monsters", m_max, MONSTER_MAX)?;
    let timed = input.get_u8()? as usize;
    check_bound("monster timed effects", timed, MON_TMD_MAX)?;
    let count = input.get_u16()? as usize;
    check_bound("live monsters", count, m_max)?;

    let mut monsters = MonsterList::new();
    if m_max > 1 {
        monsters.set_slot(MonsterId(m_max as u16 - 1), Monster::default());
    }
    for _ in 0..count {
        let idx = input.get_u16()?;
        if idx == 0 || idx as usize >= m_max {
            return Err(LoadError::Corrupt(format!("monster slot {idx} out of range")));
        }
        let mon = rd_monster(input, version, timed, races)?;
        monsters.set_slot(MonsterId(idx), mon);
    }
    Ok(monsters)
}

/// Point the cave's occupant and pile grids back at the loaded lists
///
/// Neither grid is saved. A floor object heads its pile when no other
/// object links to it.
pub(crate) fn link_level(cave: &mut Cave, objects: &ObjectList, monsters: &MonsterList) {
    for (id, mon) in monsters.iter() {
        cave.set_monster(mon.grid, id.0 as i16);
    }
    let linked: Vec<ObjectId> = objects.iter().map(|(_, o)| o.next_o_idx).collect();
    for (id, obj) in objects.iter() {
        if obj.held_m_idx.is_none() && !linked.contains(&id) {
            cave.set_object(obj.grid, id);
        }
    }
}

pub(crate) fn wr_traps<'a>(out: &mut Writer, traps: impl ExactSizeIterator<Item = &'a Trap>) {
    out.put_u16(traps.len() as u16);
    out.put_u8(TrapFlags::BYTES as u8);
    for trap in traps {
        out.put_u8(trap.kind);
        put_grid(out, trap.grid);
        out.put_bytes(&trap.flags.to_bytes());
        out.put_u8(trap.xtra);
    }
}

pub(crate) fn rd_traps(input: &mut Reader<'_>, kinds: usize) -> Result<Vec<Trap>, LoadError> {
    let count = input.get_u16()? as usize;
    check_bound("traps", count, TRAP_MAX)?;
    let flag_bytes = input.get_u8()? as usize;
    check_bound("trap flag bytes", flag_bytes, TrapFlags::BYTES)?;

    let mut traps = Vec::with_capacity(count);
    for _ in 0..count {
        let kind = input.get_u8()?;
        if kind as usize >= kinds {
            return Err(LoadError::Corrupt(format!("unknown trap kind {kind}")));
        }
        traps.push(Trap {
            kind,
            grid: get_grid(input)?,
            flags: TrapFlags::from_bytes(input.get_bytes(flag_bytes)?),
            xtra: input.get_u8()?,
        });
    }
    Ok(traps)
}
