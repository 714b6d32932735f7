//! Stored chunks
//!
//! A chunk payload is four blocks: `dungeon`, `objects`, `monsters` and
//! `traps`. The same bytes are embedded in the savefile's chunk list and
//! can be written on their own with [`chunk_save`].

use std::fs;
use std::path::Path;

use sil_core::GameData;
use sil_core::dungeon::Chunk;
use sil_core::object::QuarkTable;

use crate::block::{read_block, write_block};
use crate::blocks::dungeon::{
    link_level, rd_cave, rd_monsters, rd_objects, rd_traps, wr_cave, wr_monsters, wr_objects,
    wr_traps,
};
use crate::codec::{Reader, Writer};
use crate::error::{CodecError, LoadError, SaveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkBlock {
    Dungeon,
    Objects,
    Monsters,
    Traps,
}

/// Loaders known for chunk payloads
const CHUNK_LOADERS: [(&str, u32, ChunkBlock); 5] = [
    ("dungeon", 1, ChunkBlock::Dungeon),
    ("objects", 1, ChunkBlock::Objects),
    ("monsters", 1, ChunkBlock::Monsters),
    ("monsters", 2, ChunkBlock::Monsters),
    ("traps", 1, ChunkBlock::Traps),
];

/// Encode a chunk as its four blocks
pub(crate) fn wr_chunk_payload(chunk: &Chunk, quarks: &QuarkTable) -> Result<Vec<u8>, CodecError> {
    let mut out = Writer::new();

    let mut w = Writer::new();
    wr_cave(&mut w, &chunk.cave);
    write_block(&mut out, "dungeon", 1, w.as_bytes())?;

    let mut w = Writer::new();
    wr_objects(&mut w, &chunk.objects, quarks);
    write_block(&mut out, "objects", 1, w.as_bytes())?;

    let mut w = Writer::new();
    wr_monsters(&mut w, &chunk.monsters);
    write_block(&mut out, "monsters", 2, w.as_bytes())?;

    let mut w = Writer::new();
    wr_traps(&mut w, chunk.traps.iter());
    write_block(&mut out, "traps", 1, w.as_bytes())?;

    Ok(out.into_bytes())
}

/// Decode a chunk payload, interning inscriptions into `quarks`
pub(crate) fn rd_chunk_payload(
    bytes: &[u8],
    quarks: &mut QuarkTable,
    data: &GameData,
) -> Result<Chunk, LoadError> {
    let mut chunk = Chunk::new();
    let mut input = Reader::new(bytes);
    while !input.is_at_end() {
        let block = read_block(&mut input)?;
        let kind = CHUNK_LOADERS
            .iter()
            .find(|(name, version, _)| *name == block.name && *version == block.version)
            .map(|&(_, _, kind)| kind)
            .ok_or_else(|| LoadError::UnknownBlock {
                name: block.name.clone(),
                version: block.version,
            })?;

        let mut r = Reader::new(block.payload);
        match kind {
            ChunkBlock::Dungeon => chunk.cave = rd_cave(&mut r)?,
            ChunkBlock::Objects => chunk.objects = rd_objects(&mut r, quarks, data.kinds.len())?,
            ChunkBlock::Monsters => {
                chunk.monsters = rd_monsters(&mut r, block.version, data.races.len())?
            }
            ChunkBlock::Traps => chunk.traps = rd_traps(&mut r, data.trap_kinds.len())?,
        }
        log::trace!("read chunk block {} v{}", block.name, block.version);
    }
    link_level(&mut chunk.cave, &chunk.objects, &chunk.monsters);
    Ok(chunk)
}

/// Write one chunk to its own file
pub fn chunk_save(chunk: &Chunk, quarks: &QuarkTable, path: &Path) -> Result<(), SaveError> {
    let bytes = wr_chunk_payload(chunk, quarks)?;
    fs::write(path, bytes)?;
    log::debug!("saved chunk to {}", path.display());
    Ok(())
}

/// Read a chunk written by [`chunk_save`]
pub fn chunk_load(path: &Path, quarks: &mut QuarkTable, data: &GameData) -> Result<Chunk, LoadError> {
    let bytes = fs::read(path)?;
    rd_chunk_payload(&bytes, quarks, data)
}
