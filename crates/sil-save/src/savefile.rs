//! The savefile
//!
//! An eight-byte header, every block in [`SAVE_ORDER`], then a `checksum`
//! block holding the byte-sum of everything before it.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sil_core::World;
use sil_core::world::MessageType;

use crate::block::{read_block, write_block};
use crate::blocks::{BlockKind, SAVE_ORDER, finish_level, load_block, save_block};
use crate::codec::{Reader, Writer};
use crate::error::{CodecError, LoadError, SaveError};

/// Magic bytes opening every savefile
pub const SAVEFILE_MAGIC: [u8; 4] = [83, 97, 118, 101];
/// Game tag following the magic
pub const SAVEFILE_NAME: [u8; 4] = *b"SILC";
pub const HEADER_LEN: usize = 8;

const CHECKSUM_BLOCK: &str = "checksum";

/// Random names tried before a counter is added
const NAME_TRIES: u32 = 100;

/// Encode the whole game
pub fn encode(world: &World) -> Result<Vec<u8>, CodecError> {
    let mut out = Writer::new();
    out.put_bytes(&SAVEFILE_MAGIC);
    out.put_bytes(&SAVEFILE_NAME);
    for kind in SAVE_ORDER {
        save_block(&mut out, kind, world)?;
    }
    let sum = out.checksum();
    write_block(&mut out, CHECKSUM_BLOCK, 1, &sum.to_le_bytes())?;
    log::debug!("encoded savefile, {} bytes", out.len());
    Ok(out.into_bytes())
}

/// Decode a savefile into `world`
///
/// Blocks are applied as they are read. A failure part way leaves the
/// earlier blocks applied, so the world must be thrown away on error. A bad
/// header fails before anything is touched.
pub fn decode(bytes: &[u8], world: &mut World) -> Result<(), LoadError> {
    if bytes.len() < HEADER_LEN
        || bytes[..4] != SAVEFILE_MAGIC
        || bytes[4..HEADER_LEN] != SAVEFILE_NAME
    {
        return Err(LoadError::BadHeader);
    }
    let mut input = Reader::new(bytes);
    input.skip(HEADER_LEN)?;

    loop {
        if input.is_at_end() {
            return Err(LoadError::Corrupt(String::from("missing checksum block")));
        }
        let expected = input.checksum();
        let block = read_block(&mut input)?;

        if block.name == CHECKSUM_BLOCK && block.version == 1 {
            let found = Reader::new(block.payload).get_u32()?;
            if found != expected {
                return Err(LoadError::Checksum(String::from("savefile")));
            }
            if !input.is_at_end() {
                return Err(LoadError::Corrupt(String::from("data after the checksum block")));
            }
            break;
        }

        let kind = BlockKind::lookup(&block.name, block.version).ok_or_else(|| {
            LoadError::UnknownBlock {
                name: block.name.clone(),
                version: block.version,
            }
        })?;
        load_block(kind, block.version, block.payload, world)?;
        log::trace!("loaded block {} v{}", block.name, block.version);
    }

    finish_level(world);
    Ok(())
}

/// `path` with `.tag.suffix` appended
fn with_suffix(path: &Path, tag: &str, suffix: &str) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(format!(".{tag}.{suffix}"));
    PathBuf::from(s)
}

/// A name next to `path` that does not exist yet
fn unique_name(path: &Path, tag: &str) -> Result<PathBuf, SaveError> {
    for _ in 0..NAME_TRIES {
        let candidate = with_suffix(path, tag, &rand::random::<u32>().to_string());
        if !candidate.exists() {
            return Ok(candidate);
        }
    }
    for count in 0..NAME_TRIES {
        let suffix = format!("{}.{count}", rand::random::<u32>());
        let candidate = with_suffix(path, tag, &suffix);
        if !candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(SaveError::TempFile(path.to_path_buf()))
}

fn rename(from: &Path, to: &Path) -> Result<(), SaveError> {
    fs::rename(from, to).map_err(|source| SaveError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Write `bytes` to `path` without ever leaving it missing
///
/// The data goes to a fresh `.new` file first. An existing save is moved
/// aside to `.old`, the new file takes its place, and the backup is then
/// removed. If the final move fails the backup is put back.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SaveError> {
    let new_path = unique_name(path, "new")?;
    let written = File::create(&new_path).and_then(|file| {
        let mut w = BufWriter::new(file);
        w.write_all(bytes)?;
        w.flush()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&new_path);
        return Err(e.into());
    }

    let old_path = if path.exists() {
        let old_path = unique_name(path, "old")?;
        if let Err(e) = rename(path, &old_path) {
            let _ = fs::remove_file(&new_path);
            return Err(e);
        }
        Some(old_path)
    } else {
        None
    };

    if let Err(e) = rename(&new_path, path) {
        if let Some(old) = &old_path {
            if let Err(restore) = fs::rename(old, path) {
                log::warn!("could not restore {}: {restore}", old.display());
            }
        }
        return Err(e);
    }

    if let Some(old) = old_path {
        if let Err(e) = fs::remove_file(&old) {
            log::warn!("could not remove {}: {e}", old.display());
        }
    }
    Ok(())
}

fn save_to(world: &World, path: &Path) -> Result<(), SaveError> {
    let bytes = encode(world)?;
    write_atomic(path, &bytes)?;
    log::debug!("saved game to {}", path.display());
    Ok(())
}

fn load_from(world: &mut World, path: &Path) -> Result<(), LoadError> {
    let bytes = fs::read(path)?;
    decode(&bytes, world)?;
    log::debug!("loaded game from {}", path.display());
    Ok(())
}

/// Save the game, reporting any failure through the message log
pub fn savefile_save(world: &mut World, path: impl AsRef<Path>) -> bool {
    match save_to(world, path.as_ref()) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("save failed: {e}");
            world.messages.add(format!("Failed to save: {e}"), MessageType::Save);
            false
        }
    }
}

/// Load a game into `world`, reporting any failure through the message log
pub fn savefile_load(world: &mut World, path: impl AsRef<Path>) -> bool {
    match load_from(world, path.as_ref()) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("load failed: {e}");
            world.messages.add(format!("Error loading savefile: {e}"), MessageType::Save);
            false
        }
    }
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sil_core::{GameData, GameRng};

    fn world() -> World {
        World::new(Arc::new(GameData::standard()), GameRng::new(3))
    }

    #[test]
    fn test_header_and_trailer() {
        let bytes = encode(&world()).unwrap();
        assert_eq!(&bytes[..4], b"Save");
        assert_eq!(&bytes[4..8], b"SILC");
        let tail = &bytes[bytes.len() - 32..];
        assert_eq!(&tail[..9], b"checksum\0");
        let sum = bytes[..bytes.len() - 32]
            .iter()
            .fold(0u32, |s, &b| s.wrapping_add(b as u32));
        assert_eq!(&tail[28..], &sum.to_le_bytes());
    }

    #[test]
    fn test_bad_header_touches_nothing() {
        let mut bytes = encode(&world()).unwrap();
        bytes[5] = b'X';
        let mut w = world();
        w.turn = 99;
        assert!(matches!(decode(&bytes, &mut w), Err(LoadError::BadHeader)));
        assert_eq!(w.turn, 99);
    }

    #[test]
    fn test_flipped_byte_fails_checksum() {
        let mut bytes = encode(&world()).unwrap();
        // last byte of the rng block's first word
        bytes[HEADER_LEN + 28 + 3] ^= 0x40;
        let mut w = world();
        assert!(decode(&bytes, &mut w).is_err());
    }

    #[test]
    fn test_missing_trailer() {
        let bytes = encode(&world()).unwrap();
        let cut = &bytes[..bytes.len() - 32];
        let mut w = world();
        assert!(matches!(decode(cut, &mut w), Err(LoadError::Corrupt(_))));
    }

    #[test]
    fn test_suffix_keeps_name() {
        let p = with_suffix(Path::new("/tmp/Beren"), "new", "42");
        assert_eq!(p, PathBuf::from("/tmp/Beren.new.42"));
    }
}
