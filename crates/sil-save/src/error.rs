//! Savefile errors

use std::path::PathBuf;

use thiserror::Error;

/// Low-level encode/decode failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unexpected end of data: wanted {wanted} bytes, {remaining} left")]
    Eof { wanted: usize, remaining: usize },

    #[error("Block name '{0}' does not fit in the header")]
    NameTooLong(String),
}

/// Reasons a savefile or chunk file is rejected
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Savefile has an incorrect header")]
    BadHeader,

    #[error("Block header is mangled: {0}")]
    MangledBlock(String),

    #[error("Block '{name}' is truncated: {declared} bytes declared, {available} present")]
    Truncated {
        name: String,
        declared: usize,
        available: usize,
    },

    #[error("Savefile too old: no loader for block '{name}' version {version}")]
    UnknownBlock { name: String, version: u32 },

    #[error("Too many {what}: savefile has {found}, this build allows {max}")]
    Bound {
        what: &'static str,
        found: usize,
        max: usize,
    },

    #[error("Checksum mismatch in {0}")]
    Checksum(String),

    #[error("Corrupt savefile: {0}")]
    Corrupt(String),
}

/// Reasons a savefile could not be written
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Could not pick a temporary name next to {0}")]
    TempFile(PathBuf),

    #[error("Could not move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Fail with [`LoadError::Bound`] when a declared size exceeds this build's
pub(crate) fn check_bound(what: &'static str, found: usize, max: usize) -> Result<(), LoadError> {
    if found > max {
        log::warn!("savefile declares {found} {what}, limit {max}");
        return Err(LoadError::Bound { what, found, max });
    }
    Ok(())
}
