//! Block framing
//!
//! Each block is a 28-byte header followed by its payload, padded to a
//! four-byte boundary:
//!
//! | bytes | field |
//! |-------|-------|
//! | 16    | name, NUL padded, last byte always NUL |
//! | 4     | version |
//! | 4     | payload size |
//! | 4     | byte-sum of the payload |

use crate::codec::{Reader, Writer};
use crate::error::{CodecError, LoadError};

pub const BLOCK_NAME_LEN: usize = 16;
pub const BLOCK_HEADER_LEN: usize = BLOCK_NAME_LEN + 12;

/// A framed block read back from a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub name: String,
    pub version: u32,
    pub payload: &'a [u8],
}

fn byte_sum(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |s, &b| s.wrapping_add(b as u32))
}

const fn padding(size: usize) -> usize {
    (4 - size % 4) % 4
}

/// Frame `payload` as block `name`
pub fn write_block(
    out: &mut Writer,
    name: &str,
    version: u32,
    payload: &[u8],
) -> Result<(), CodecError> {
    if name.len() >= BLOCK_NAME_LEN || name.contains('\0') {
        return Err(CodecError::NameTooLong(name.to_string()));
    }
    let mut raw = [0u8; BLOCK_NAME_LEN];
    raw[..name.len()].copy_from_slice(name.as_bytes());
    out.put_bytes(&raw);
    out.put_u32(version);
    out.put_u32(payload.len() as u32);
    out.put_u32(byte_sum(payload));
    out.put_bytes(payload);
    out.put_bytes(&[0u8; 3][..padding(payload.len())]);
    log::trace!("wrote block {name} v{version}, {} bytes", payload.len());
    Ok(())
}

/// Read the next block, checking its header and payload sum
pub fn read_block<'a>(input: &mut Reader<'a>) -> Result<Block<'a>, LoadError> {
    if input.remaining() < BLOCK_HEADER_LEN {
        return Err(LoadError::MangledBlock(format!(
            "{} bytes left, a header needs {BLOCK_HEADER_LEN}",
            input.remaining()
        )));
    }
    let raw = input.get_bytes(BLOCK_NAME_LEN)?;
    if raw[BLOCK_NAME_LEN - 1] != 0 {
        return Err(LoadError::MangledBlock(String::from("name is not terminated")));
    }
    let end = raw.iter().position(|&b| b == 0).unwrap_or(BLOCK_NAME_LEN);
    let name = std::str::from_utf8(&raw[..end])
        .map_err(|_| LoadError::MangledBlock(String::from("name is not text")))?
        .to_string();
    let version = input.get_u32()?;
    let size = input.get_u32()? as usize;
    let sum = input.get_u32()?;

    let available = input.remaining();
    if size > available {
        return Err(LoadError::Truncated {
            name,
            declared: size,
            available,
        });
    }
    let payload = input.get_bytes(size)?;
    if byte_sum(payload) != sum {
        return Err(LoadError::Checksum(format!("block {name}")));
    }
    let pad = padding(size);
    if input.remaining() < pad {
        return Err(LoadError::Truncated {
            name,
            declared: size + pad,
            available,
        });
    }
    input.skip(pad)?;
    Ok(Block {
        name,
        version,
        payload,
    })
}
