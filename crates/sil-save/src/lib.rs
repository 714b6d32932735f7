//! sil-save: savefile and chunk file format
//!
//! Both formats are sequences of named, versioned blocks (see [`block`])
//! built from the little-endian primitives in [`codec`]. Grid planes are
//! run-length coded by [`rle`]. Loaders are matched on block name and
//! version, so an older block layout can be read beside the current one.

pub mod block;
pub mod codec;
pub mod rle;

mod blocks;
mod chunk_file;
mod error;
mod savefile;

use std::path::PathBuf;

pub use chunk_file::{chunk_load, chunk_save};
pub use error::{CodecError, LoadError, SaveError};
pub use savefile::{
    HEADER_LEN, SAVEFILE_MAGIC, SAVEFILE_NAME, decode, encode, save_exists, savefile_load,
    savefile_save, write_atomic,
};

/// Get the default save path for a character name
pub fn default_save_path(player_name: &str) -> PathBuf {
    let mut path = sil_core::world::default_user_dir();
    path.push("save");
    std::fs::create_dir_all(&path).ok();
    path.push(player_name);
    path
}
