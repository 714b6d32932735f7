//! Run-length coding of grid planes
//!
//! A plane is walked in row-major order and written as `(count, value)`
//! byte pairs. A run ends when the value changes, at 255 repeats, or at
//! the end of the plane.

use crate::codec::{Reader, Writer};
use crate::error::LoadError;

/// Longest run one pair can hold
pub const MAX_RUN: u8 = u8::MAX;

/// Encode a `height` by `width` plane
pub fn rle_encode(out: &mut Writer, height: usize, width: usize, get: impl Fn(usize, usize) -> u8) {
    let mut run: Option<(u8, u8)> = None;
    for y in 0..height {
        for x in 0..width {
            let v = get(y, x);
            run = match run {
                Some((count, prev)) if prev == v && count < MAX_RUN => Some((count + 1, prev)),
                Some((count, prev)) => {
                    out.put_u8(count);
                    out.put_u8(prev);
                    Some((1, v))
                }
                None => Some((1, v)),
            };
        }
    }
    if let Some((count, prev)) = run {
        out.put_u8(count);
        out.put_u8(prev);
    }
}

/// Decode a plane written by [`rle_encode`], handing each square to `set`
pub fn rle_decode(
    input: &mut Reader<'_>,
    height: usize,
    width: usize,
    mut set: impl FnMut(usize, usize, u8),
) -> Result<(), LoadError> {
    let (mut y, mut x) = (0, 0);
    while y < height {
        let count = input.get_u8()?;
        let value = input.get_u8()?;
        if count == 0 {
            return Err(LoadError::Corrupt(String::from("empty run in grid data")));
        }
        for _ in 0..count {
            if y >= height {
                return Err(LoadError::Corrupt(String::from("grid run overflows the plane")));
            }
            set(y, x, value);
            x += 1;
            if x == width {
                x = 0;
                y += 1;
            }
        }
    }
    Ok(())
}
