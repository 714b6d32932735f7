//! Savefile blocks
//!
//! Every block the savefile can hold is a [`BlockKind`]. Saving walks
//! [`SAVE_ORDER`]; loading looks each `(name, version)` pair up in
//! [`LOADERS`] and dispatches on the kind.

pub(crate) mod dungeon;
mod meta;
mod player;

use sil_core::World;
use sil_core::dungeon::{Loc, PLAYER_OCCUPANT};

use crate::block::write_block;
use crate::codec::{Reader, Writer};
use crate::error::{CodecError, LoadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Randomizer,
    Options,
    Messages,
    MonsterMemory,
    ObjectMemory,
    Quests,
    Artifacts,
    Player,
    Ignore,
    Misc,
    PlayerHp,
    PlayerSpells,
    Randarts,
    Gear,
    Dungeon,
    Objects,
    Monsters,
    Ghost,
    History,
    Traps,
    Chunks,
    GenLocs,
}

/// Blocks in the order they are written
pub(crate) const SAVE_ORDER: [BlockKind; 22] = [
    BlockKind::Randomizer,
    BlockKind::Options,
    BlockKind::Messages,
    BlockKind::MonsterMemory,
    BlockKind::ObjectMemory,
    BlockKind::Quests,
    BlockKind::Artifacts,
    BlockKind::Player,
    BlockKind::Ignore,
    BlockKind::Misc,
    BlockKind::PlayerHp,
    BlockKind::PlayerSpells,
    BlockKind::Randarts,
    BlockKind::Gear,
    BlockKind::Dungeon,
    BlockKind::Objects,
    BlockKind::Monsters,
    BlockKind::Ghost,
    BlockKind::History,
    BlockKind::Traps,
    BlockKind::Chunks,
    BlockKind::GenLocs,
];

/// Every `(name, version)` this build can read
pub(crate) const LOADERS: [(&str, u32, BlockKind); 23] = [
    ("rng", 1, BlockKind::Randomizer),
    ("options", 1, BlockKind::Options),
    ("messages", 1, BlockKind::Messages),
    ("monster memory", 1, BlockKind::MonsterMemory),
    ("object memory", 1, BlockKind::ObjectMemory),
    ("quests", 1, BlockKind::Quests),
    ("artifacts", 1, BlockKind::Artifacts),
    ("player", 1, BlockKind::Player),
    ("ignore", 1, BlockKind::Ignore),
    ("misc", 1, BlockKind::Misc),
    ("player hp", 1, BlockKind::PlayerHp),
    ("player spells", 1, BlockKind::PlayerSpells),
    ("randarts", 1, BlockKind::Randarts),
    ("gear", 1, BlockKind::Gear),
    ("dungeon", 1, BlockKind::Dungeon),
    ("objects", 1, BlockKind::Objects),
    ("monsters", 1, BlockKind::Monsters),
    ("monsters", 2, BlockKind::Monsters),
    ("ghost", 1, BlockKind::Ghost),
    ("history", 1, BlockKind::History),
    ("traps", 1, BlockKind::Traps),
    ("chunks", 1, BlockKind::Chunks),
    ("gen locs", 1, BlockKind::GenLocs),
];

impl BlockKind {
    /// Name and version written by this build
    pub(crate) fn current(self) -> (&'static str, u32) {
        LOADERS
            .iter()
            .rev()
            .find(|(_, _, kind)| *kind == self)
            .map_or(("", 0), |&(name, version, _)| (name, version))
    }

    pub(crate) fn lookup(name: &str, version: u32) -> Option<BlockKind> {
        LOADERS
            .iter()
            .find(|(n, v, _)| *n == name && *v == version)
            .map(|&(_, _, kind)| kind)
    }
}

/// Encode one block of `world` and frame it into `out`
pub(crate) fn save_block(out: &mut Writer, kind: BlockKind, world: &World) -> Result<(), CodecError> {
    let mut w = Writer::new();
    match kind {
        BlockKind::Randomizer => meta::wr_randomizer(&mut w, world),
        BlockKind::Options => meta::wr_options(&mut w, world),
        BlockKind::Messages => meta::wr_messages(&mut w, world),
        BlockKind::MonsterMemory => meta::wr_monster_memory(&mut w, world),
        BlockKind::ObjectMemory => meta::wr_object_memory(&mut w, world),
        BlockKind::Quests => meta::wr_quests(&mut w, world),
        BlockKind::Artifacts => meta::wr_artifacts(&mut w, world),
        BlockKind::Player => player::wr_player(&mut w, world),
        BlockKind::Ignore => meta::wr_ignore(&mut w, world),
        BlockKind::Misc => meta::wr_misc(&mut w, world),
        BlockKind::PlayerHp => player::wr_player_hp(&mut w, world),
        BlockKind::PlayerSpells => player::wr_player_spells(&mut w, world),
        BlockKind::Randarts | BlockKind::Ghost => {}
        BlockKind::Gear => player::wr_gear(&mut w, world),
        BlockKind::Dungeon => wr_dungeon(&mut w, world),
        BlockKind::Objects => dungeon::wr_objects(&mut w, &world.objects, &world.quarks),
        BlockKind::Monsters => dungeon::wr_monsters(&mut w, &world.monsters),
        BlockKind::History => meta::wr_history(&mut w, world),
        BlockKind::Traps => dungeon::wr_traps(&mut w, world.traps.iter()),
        BlockKind::Chunks => meta::wr_chunks(&mut w, world)?,
        BlockKind::GenLocs => meta::wr_gen_locs(&mut w, world),
    }
    let (name, version) = kind.current();
    write_block(out, name, version, w.as_bytes())
}

/// Apply one block's payload to `world`
pub(crate) fn load_block(
    kind: BlockKind,
    version: u32,
    payload: &[u8],
    world: &mut World,
) -> Result<(), LoadError> {
    let input = &mut Reader::new(payload);
    match kind {
        BlockKind::Randomizer => meta::rd_randomizer(input, world)?,
        BlockKind::Options => meta::rd_options(input, world)?,
        BlockKind::Messages => meta::rd_messages(input, world)?,
        BlockKind::MonsterMemory => meta::rd_monster_memory(input, world)?,
        BlockKind::ObjectMemory => meta::rd_object_memory(input, world)?,
        BlockKind::Quests => meta::rd_quests(input, world)?,
        BlockKind::Artifacts => meta::rd_artifacts(input, world)?,
        BlockKind::Player => player::rd_player(input, world)?,
        BlockKind::Ignore => meta::rd_ignore(input, world)?,
        BlockKind::Misc => meta::rd_misc(input, world)?,
        BlockKind::PlayerHp => player::rd_player_hp(input, world)?,
        BlockKind::PlayerSpells => player::rd_player_spells(input, world)?,
        BlockKind::Randarts | BlockKind::Ghost => {}
        BlockKind::Gear => player::rd_gear(input, world)?,
        BlockKind::Dungeon => rd_dungeon(input, world)?,
        BlockKind::Objects => {
            world.objects = dungeon::rd_objects(input, &mut world.quarks, world.data.kinds.len())?
        }
        BlockKind::Monsters => {
            world.monsters = dungeon::rd_monsters(input, version, world.data.races.len())?
        }
        BlockKind::History => meta::rd_history(input, world)?,
        BlockKind::Traps => {
            world.traps.clear();
            for trap in dungeon::rd_traps(input, world.data.trap_kinds.len())? {
                world.traps.place(trap);
            }
        }
        BlockKind::Chunks => meta::rd_chunks(input, world)?,
        BlockKind::GenLocs => meta::rd_gen_locs(input, world)?,
    }
    if !input.is_at_end() {
        log::warn!(
            "{:?} block v{version} left {} bytes unread",
            kind,
            input.remaining()
        );
    }
    Ok(())
}

/// The player's position and the live cave
fn wr_dungeon(out: &mut Writer, world: &World) {
    out.put_u16(world.player.grid.y as u16);
    out.put_u16(world.player.grid.x as u16);
    out.put_i32(world.player.stage);
    dungeon::wr_cave(out, &world.cave);
}

fn rd_dungeon(input: &mut Reader<'_>, world: &mut World) -> Result<(), LoadError> {
    let y = input.get_u16()? as i32;
    let x = input.get_u16()? as i32;
    let stage = input.get_i32()?;
    let cave = dungeon::rd_cave(input)?;
    let grid = Loc::new(y, x);
    if !cave.in_bounds(grid) {
        return Err(LoadError::Corrupt(format!("player at ({y}, {x}) is off the map")));
    }
    world.cave = cave;
    world.player.grid = grid;
    world.player.stage = stage;
    Ok(())
}

/// Rebuild the grids the savefile leaves out once every block is in
pub(crate) fn finish_level(world: &mut World) {
    dungeon::link_level(&mut world.cave, &world.objects, &world.monsters);
    world.cave.set_monster(world.player.grid, PLAYER_OCCUPANT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_current_version() {
        for kind in SAVE_ORDER {
            let (name, version) = kind.current();
            assert!(!name.is_empty(), "{kind:?}");
            assert_eq!(BlockKind::lookup(name, version), Some(kind));
        }
        assert_eq!(BlockKind::Monsters.current(), ("monsters", 2));
    }

    #[test]
    fn test_unknown_pair() {
        assert_eq!(BlockKind::lookup("monsters", 3), None);
        assert_eq!(BlockKind::lookup("player ghost", 1), None);
    }
}
