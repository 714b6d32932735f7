//! Game-wide state: generator, options, messages, memories and the surface

use sil_core::dungeon::{ChunkRef, EdgeEffect, Feat, GenLoc, Loc, TerrainChange};
use sil_core::monster::{MonsterLore, RaceFlags, SpellFlags};
use sil_core::object::{ArtifactState, KindKnowledge};
use sil_core::world::{
    HistoryEntry, HistoryFlags, Message, MessageType, OPT_WORDS, OptionSet, WINDOW_MAX,
};
use sil_core::{CHUNK_ADJ, HISTORY_MAX, MAX_CHUNKS, MESSAGE_MAX, MONSTER_BLOW_MAX, World};
use sil_rng::{RAND_DEG, RandState};

use crate::chunk_file::{rd_chunk_payload, wr_chunk_payload};
use crate::codec::{Reader, Writer};
use crate::error::{CodecError, LoadError, check_bound};

const MESSAGE_LEN: usize = 200;
const EVENT_LEN: usize = 80;
/// Largest gen loc list a savefile may declare
const GEN_LOC_MAX: usize = 1 << 16;
/// Terrain edits recorded against one location
const CHANGES_MAX: usize = 1 << 12;

fn get_feat(input: &mut Reader<'_>) -> Result<Feat, LoadError> {
    let v = input.get_u8()?;
    Feat::from_repr(v).ok_or_else(|| LoadError::Corrupt(format!("unknown terrain {v}")))
}

pub(crate) fn wr_randomizer(out: &mut Writer, world: &World) {
    let state = world.rng.export();
    out.put_u32(state.value);
    out.put_u32(state.index);
    out.put_u8(RAND_DEG as u8);
    for &w in &state.words {
        out.put_u32(w);
    }
}

pub(crate) fn rd_randomizer(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let value = input.get_u32()?;
    let index = input.get_u32()?;
    let deg = input.get_u8()? as usize;
    check_bound("generator words", deg, RAND_DEG)?;
    if deg != RAND_DEG || index as usize >= RAND_DEG {
        return Err(LoadError::Corrupt(format!(
            "generator state of {deg} words at index {index}"
        )));
    }
    let mut words = [0u32; RAND_DEG];
    for w in &mut words {
        *w = input.get_u32()?;
    }
    world.rng.import(&RandState {
        value,
        index,
        words,
    });
    Ok(())
}

/// Option words with their masks, then window flags with theirs
pub(crate) fn wr_options(out: &mut Writer, world: &World) {
    out.put_u8(OPT_WORDS as u8);
    for w in world.options.words() {
        out.put_u32(w);
    }
    for w in OptionSet::known_mask() {
        out.put_u32(w);
    }
    out.put_u8(WINDOW_MAX as u8);
    for &w in &world.options.window_flag {
        out.put_u32(w);
    }
    for _ in 0..WINDOW_MAX {
        out.put_u32(u32::MAX);
    }
    out.put_u8(world.options.hitpoint_warn);
    out.put_u8(world.options.delay_factor);
}

pub(crate) fn rd_options(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let words = input.get_u8()? as usize;
    check_bound("option words", words, OPT_WORDS)?;
    let mut flags = [0u32; OPT_WORDS];
    let mut mask = [0u32; OPT_WORDS];
    for f in flags.iter_mut().take(words) {
        *f = input.get_u32()?;
    }
    for m in mask.iter_mut().take(words) {
        *m = input.get_u32()?;
    }

    let windows = input.get_u8()? as usize;
    check_bound("windows", windows, WINDOW_MAX)?;
    let mut window_flags = [0u32; WINDOW_MAX];
    let mut window_masks = [0u32; WINDOW_MAX];
    for f in window_flags.iter_mut().take(windows) {
        *f = input.get_u32()?;
    }
    for m in window_masks.iter_mut().take(windows) {
        *m = input.get_u32()?;
    }

    world.options.restore(&flags, &mask);
    world.options.restore_windows(&window_flags, &window_masks);
    world.options.hitpoint_warn = input.get_u8()?;
    world.options.delay_factor = input.get_u8()?;
    Ok(())
}

pub(crate) fn wr_messages(out: &mut Writer, world: &World) {
    out.put_u16(world.messages.len() as u16);
    for msg in world.messages.iter() {
        out.put_string(&msg.text);
        out.put_u16(msg.typ as u16);
        out.put_u16(msg.count);
    }
}

pub(crate) fn rd_messages(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let n = input.get_u16()? as usize;
    check_bound("messages", n, MESSAGE_MAX)?;
    world.messages.clear();
    for _ in 0..n {
        let text = input.get_string(MESSAGE_LEN)?;
        let raw = input.get_u16()?;
        let typ = MessageType::from_repr(raw)
            .ok_or_else(|| LoadError::Corrupt(format!("unknown message type {raw}")))?;
        let count = input.get_u16()?;
        world.messages.push(Message { text, typ, count });
    }
    Ok(())
}

pub(crate) fn wr_monster_memory(out: &mut Writer, world: &World) {
    out.put_u16(world.lore.len() as u16);
    out.put_u8(MONSTER_BLOW_MAX as u8);
    out.put_u8(RaceFlags::BYTES as u8);
    out.put_u8(SpellFlags::BYTES as u8);
    for lore in &world.lore {
        out.put_u16(lore.sights);
        out.put_u16(lore.deaths);
        out.put_u16(lore.pkills);
        out.put_u16(lore.tkills);
        for b in [
            lore.wake,
            lore.ignore,
            lore.drop_gold,
            lore.drop_item,
            lore.cast_innate,
            lore.cast_spell,
            lore.notice,
        ] {
            out.put_u8(b);
        }
        out.put_bytes(&lore.blows);
        out.put_bytes(&lore.flags.to_bytes());
        out.put_bytes(&lore.spell_flags.to_bytes());
        out.put_bool(lore.all_known);
    }
}

pub(crate) fn rd_monster_memory(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let n = input.get_u16()? as usize;
    check_bound("monster races", n, world.data.races.len())?;
    let blows = input.get_u8()? as usize;
    check_bound("monster blows", blows, MONSTER_BLOW_MAX)?;
    let rf = input.get_u8()? as usize;
    check_bound("monster flag bytes", rf, RaceFlags::BYTES)?;
    let rsf = input.get_u8()? as usize;
    check_bound("monster spell bytes", rsf, SpellFlags::BYTES)?;

    for i in 0..n {
        let mut lore = MonsterLore {
            sights: input.get_u16()?,
            deaths: input.get_u16()?,
            pkills: input.get_u16()?,
            tkills: input.get_u16()?,
            wake: input.get_u8()?,
            ignore: input.get_u8()?,
            drop_gold: input.get_u8()?,
            drop_item: input.get_u8()?,
            cast_innate: input.get_u8()?,
            cast_spell: input.get_u8()?,
            notice: input.get_u8()?,
            ..Default::default()
        };
        lore.blows[..blows].copy_from_slice(input.get_bytes(blows)?);
        lore.flags = RaceFlags::from_bytes(input.get_bytes(rf)?);
        lore.spell_flags = SpellFlags::from_bytes(input.get_bytes(rsf)?);
        lore.all_known = input.get_bool()?;
        world.lore[i] = lore;
    }
    Ok(())
}

pub(crate) fn wr_object_memory(out: &mut Writer, world: &World) {
    out.put_u16(world.knowledge.len() as u16);
    for k in &world.knowledge {
        out.put_u8(k.to_byte());
    }
}

pub(crate) fn rd_object_memory(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let n = input.get_u16()? as usize;
    check_bound("object kinds", n, world.data.kinds.len())?;
    for k in world.knowledge.iter_mut().take(n) {
        *k = KindKnowledge::from_byte(input.get_u8()?, k.ignore);
    }
    Ok(())
}

pub(crate) fn wr_quests(out: &mut Writer, world: &World) {
    out.put_u8(world.quests.len() as u8);
    for q in &world.quests {
        out.put_u8(q.level);
        out.put_u16(q.race);
        out.put_u8(q.cur_num);
        out.put_u8(q.max_num);
    }
}

pub(crate) fn rd_quests(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let n = input.get_u8()? as usize;
    check_bound("quests", n, world.data.quests.len())?;
    for q in world.quests.iter_mut().take(n) {
        q.level = input.get_u8()?;
        q.race = input.get_u16()?;
        q.cur_num = input.get_u8()?;
        q.max_num = input.get_u8()?;
    }
    Ok(())
}

pub(crate) fn wr_artifacts(out: &mut Writer, world: &World) {
    out.put_u16(world.artifacts.len() as u16);
    for a in &world.artifacts {
        out.put_bool(a.created);
        out.put_bool(a.seen);
        out.put_bool(a.everseen);
        out.put_bool(a.lost);
    }
}

pub(crate) fn rd_artifacts(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let n = input.get_u16()? as usize;
    check_bound("artifacts", n, world.data.artifacts.len())?;
    for a in world.artifacts.iter_mut().take(n) {
        *a = ArtifactState {
            created: input.get_bool()?,
            seen: input.get_bool()?,
            everseen: input.get_bool()?,
            lost: input.get_bool()?,
        };
    }
    Ok(())
}

/// Ignore settings, one bit per kind
pub(crate) fn wr_ignore(out: &mut Writer, world: &World) {
    out.put_u16(world.knowledge.len() as u16);
    for chunk in world.knowledge.chunks(8) {
        let byte = chunk
            .iter()
            .enumerate()
            .fold(0u8, |b, (i, k)| b | (k.ignore as u8) << i);
        out.put_u8(byte);
    }
}

pub(crate) fn rd_ignore(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let n = input.get_u16()? as usize;
    check_bound("object kinds", n, world.data.kinds.len())?;
    let bytes = input.get_bytes(n.div_ceil(8))?;
    for (i, k) in world.knowledge.iter_mut().take(n).enumerate() {
        k.ignore = bytes[i / 8] & (1 << (i % 8)) != 0;
    }
    Ok(())
}

pub(crate) fn wr_misc(out: &mut Writer, world: &World) {
    out.put_u32(world.seed_flavor);
    out.put_u32(world.seed_randart);
    out.put_i32(world.turn);
    out.put_i32(world.player_turn);
    out.put_i32(world.resting_turn);
    out.put_bool(world.crown_removed);
    out.put_bool(world.character_dungeon);
}

pub(crate) fn rd_misc(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    world.seed_flavor = input.get_u32()?;
    world.seed_randart = input.get_u32()?;
    world.turn = input.get_i32()?;
    world.player_turn = input.get_i32()?;
    world.resting_turn = input.get_i32()?;
    world.crown_removed = input.get_bool()?;
    world.character_dungeon = input.get_bool()?;
    Ok(())
}

pub(crate) fn wr_history(out: &mut Writer, world: &World) {
    out.put_u8(HistoryFlags::BYTES as u8);
    out.put_u16(world.history.len() as u16);
    for e in world.history.iter() {
        out.put_bytes(&e.flags.to_bytes());
        out.put_i16(e.dlev);
        out.put_i32(e.turn);
        out.put_u16(e.a_idx);
        out.put_string(&e.event);
    }
}

pub(crate) fn rd_history(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let flag_bytes = input.get_u8()? as usize;
    check_bound("history flag bytes", flag_bytes, HistoryFlags::BYTES)?;
    let n = input.get_u16()? as usize;
    check_bound("history", n, HISTORY_MAX)?;
    world.history.clear();
    for _ in 0..n {
        world.history.push(HistoryEntry {
            flags: HistoryFlags::from_bytes(input.get_bytes(flag_bytes)?),
            dlev: input.get_i16()?,
            turn: input.get_i32()?,
            a_idx: input.get_u16()?,
            event: input.get_string(EVENT_LEN)?,
        });
    }
    Ok(())
}

/// The chunk list, with any stored payload embedded in chunk file form
pub(crate) fn wr_chunks(out: &mut Writer, world: &World) -> Result<(), CodecError> {
    out.put_u16(world.chunks.len() as u16);
    out.put_u8(CHUNK_ADJ as u8);
    for r in world.chunks.iter() {
        out.put_u16(r.age);
        out.put_u16(r.region);
        out.put_i32(r.z);
        out.put_i32(r.y);
        out.put_i32(r.x);
        out.put_u32(r.gen_loc_idx);
        for &a in &r.adjacent {
            out.put_u16(a);
        }
        out.put_bool(r.chunk.is_some());
        if let Some(chunk) = &r.chunk {
            let payload = wr_chunk_payload(chunk, &world.quarks)?;
            out.put_u32(payload.len() as u32);
            out.put_bytes(&payload);
        }
    }
    Ok(())
}

pub(crate) fn rd_chunks(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let n = input.get_u16()? as usize;
    check_bound("chunks", n, MAX_CHUNKS)?;
    let adj = input.get_u8()? as usize;
    check_bound("chunk neighbours", adj, CHUNK_ADJ)?;

    world.chunks.clear();
    for _ in 0..n {
        let mut r = ChunkRef {
            age: input.get_u16()?,
            region: input.get_u16()?,
            z: input.get_i32()?,
            y: input.get_i32()?,
            x: input.get_i32()?,
            gen_loc_idx: input.get_u32()?,
            ..Default::default()
        };
        for a in r.adjacent.iter_mut().take(adj) {
            *a = input.get_u16()?;
        }
        if input.get_bool()? {
            let len = input.get_u32()? as usize;
            let bytes = input.get_bytes(len)?;
            r.chunk = Some(Box::new(rd_chunk_payload(bytes, &mut world.quarks, &world.data)?));
        }
        world.chunks.push(r);
    }
    world.chunks.chunk_fix_all();
    Ok(())
}

pub(crate) fn wr_gen_locs(out: &mut Writer, world: &World) {
    out.put_u32(world.gen_locs.len() as u32);
    for loc in world.gen_locs.iter() {
        out.put_u32(loc.kind);
        out.put_i32(loc.x);
        out.put_i32(loc.y);
        out.put_i32(loc.z);
        out.put_u32(loc.seed);
        out.put_u16(loc.changes.len() as u16);
        for c in &loc.changes {
            out.put_u8(c.grid.y as u8);
            out.put_u8(c.grid.x as u8);
            out.put_u8(c.feat as u8);
        }
        out.put_u16(loc.effects.len() as u16);
        for e in &loc.effects {
            out.put_u8(e.grid.y as u8);
            out.put_u8(e.grid.x as u8);
            out.put_i32(e.z);
            out.put_u8(e.feat as u8);
        }
    }
}

pub(crate) fn rd_gen_locs(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let n = input.get_u32()? as usize;
    check_bound("generation locations", n, GEN_LOC_MAX)?;
    world.gen_locs.clear();
    world.gen_locs.reserve_to(n);
    for _ in 0..n {
        let mut loc = GenLoc {
            kind: input.get_u32()?,
            x: input.get_i32()?,
            y: input.get_i32()?,
            z: input.get_i32()?,
            seed: input.get_u32()?,
            ..Default::default()
        };
        let changes = input.get_u16()? as usize;
        check_bound("terrain changes", changes, CHANGES_MAX)?;
        for _ in 0..changes {
            let y = input.get_u8()? as i32;
            let x = input.get_u8()? as i32;
            loc.changes.push(TerrainChange {
                grid: Loc::new(y, x),
                feat: get_feat(input)?,
            });
        }
        let effects = input.get_u16()? as usize;
        check_bound("edge effects", effects, CHANGES_MAX)?;
        for _ in 0..effects {
            let y = input.get_u8()? as i32;
            let x = input.get_u8()? as i32;
            loc.effects.push(EdgeEffect {
                grid: Loc::new(y, x),
                z: input.get_i32()?,
                feat: get_feat(input)?,
            });
        }
        world.gen_locs.push(loc);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sil_core::world::GameOption;
    use sil_core::{GameData, GameRng};
    use std::sync::Arc;

    fn world() -> World {
        World::new(Arc::new(GameData::standard()), GameRng::new(7))
    }

    #[test]
    fn test_rng_state_restored() {
        let mut a = world();
        a.rng.randint0(100);
        let mut w = Writer::new();
        wr_randomizer(&mut w, &a);
        let bytes = w.into_bytes();

        let mut b = world();
        rd_randomizer(&mut Reader::new(&bytes), &mut b).unwrap();
        let xs: Vec<i32> = (0..20).map(|_| a.rng.randint0(1000)).collect();
        let ys: Vec<i32> = (0..20).map(|_| b.rng.randint0(1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_unknown_option_bits_keep_defaults() {
        let mut a = world();
        a.options.set(GameOption::AlwaysPickup, false);
        a.options.set(GameOption::CenterPlayer, true);
        let mut w = Writer::new();
        wr_options(&mut w, &a);
        let mut bytes = w.into_bytes();
        // mask words follow the count byte and the flag words
        let mask0 = 1 + OPT_WORDS * 4;
        bytes[mask0 + 1] &= !(1 << 1);

        let mut b = world();
        rd_options(&mut Reader::new(&bytes), &mut b).unwrap();
        assert!(!b.options.get(GameOption::AlwaysPickup));
        assert!(!b.options.get(GameOption::CenterPlayer));
    }

    #[test]
    fn test_ignore_bits() {
        let mut a = world();
        a.knowledge[2].ignore = true;
        a.knowledge[9].ignore = true;
        a.knowledge[3].aware = true;
        let mut w = Writer::new();
        wr_object_memory(&mut w, &a);
        wr_ignore(&mut w, &a);
        let bytes = w.into_bytes();

        let mut b = world();
        let mut r = Reader::new(&bytes);
        rd_object_memory(&mut r, &mut b).unwrap();
        rd_ignore(&mut r, &mut b).unwrap();
        assert_eq!(a.knowledge, b.knowledge);
    }

    #[test]
    fn test_too_many_races() {
        let a = world();
        let mut w = Writer::new();
        w.put_u16(a.data.races.len() as u16 + 1);
        let bytes = w.into_bytes();
        let mut b = world();
        assert!(matches!(
            rd_monster_memory(&mut Reader::new(&bytes), &mut b),
            Err(LoadError::Bound { what: "monster races", .. })
        ));
    }

    #[test]
    fn test_gen_locs_keep_changes() {
        let mut a = world();
        let idx = a.gen_locs.gen_loc_make(3, -2, 1, 77);
        a.gen_locs.add_change(idx, Loc::new(4, 5), Feat::Rubble);
        a.gen_locs.add_change(idx, Loc::new(4, 6), Feat::Floor);
        let mut w = Writer::new();
        wr_gen_locs(&mut w, &a);
        let bytes = w.into_bytes();

        let mut b = world();
        rd_gen_locs(&mut Reader::new(&bytes), &mut b).unwrap();
        assert_eq!(b.gen_locs.get(0), a.gen_locs.get(0));
    }

    #[test]
    fn test_unknown_message_type_rejected() {
        let mut w = Writer::new();
        w.put_u16(1);
        w.put_string("The orc hits you.");
        w.put_u16(u16::MAX);
        w.put_u16(1);
        let bytes = w.into_bytes();
        let mut b = world();
        assert!(matches!(
            rd_messages(&mut Reader::new(&bytes), &mut b),
            Err(LoadError::Corrupt(_))
        ));
    }
}
