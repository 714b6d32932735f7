//! Little-endian primitives over an in-memory stream
//!
//! [`Writer`] appends to a growable buffer and [`Reader`] walks a byte
//! slice. Both keep a running byte-sum of everything that passed through
//! them, which the block framing and the file trailer check on load.

use crate::error::CodecError;

/// Growth step of the output buffer
pub const BUFFER_BLOCK: usize = 4096;

/// Output stream
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
    sum: u32,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(BUFFER_BLOCK),
            sum: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Byte-sum of everything written so far
    pub fn checksum(&self) -> u32 {
        self.sum
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        let free = self.buf.capacity() - self.buf.len();
        if bytes.len() > free {
            let blocks = (bytes.len() - free).div_ceil(BUFFER_BLOCK);
            self.buf.reserve(blocks * BUFFER_BLOCK);
        }
        self.buf.extend_from_slice(bytes);
        self.sum = bytes
            .iter()
            .fold(self.sum, |s, &b| s.wrapping_add(b as u32));
    }

    pub fn put_u8(&mut self, v: u8) {
        self.put_bytes(&[v]);
    }

    pub fn put_u16(&mut self, v: u16) {
        self.put_bytes(&v.to_le_bytes());
    }

    pub fn put_u32(&mut self, v: u32) {
        self.put_bytes(&v.to_le_bytes());
    }

    pub fn put_i8(&mut self, v: i8) {
        self.put_u8(v as u8);
    }

    pub fn put_i16(&mut self, v: i16) {
        self.put_u16(v as u16);
    }

    pub fn put_i32(&mut self, v: i32) {
        self.put_u32(v as u32);
    }

    pub fn put_bool(&mut self, v: bool) {
        self.put_u8(v as u8);
    }

    /// String bytes and a NUL terminator
    pub fn put_string(&mut self, s: &str) {
        self.put_bytes(s.as_bytes());
        self.put_u8(0);
    }

    /// A signed value in one byte, wrapping negatives to 129..=255
    pub fn put_wrapped(&mut self, v: i16) {
        self.put_u8(v as u8);
    }
}

/// Input stream
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    sum: u32,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, sum: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Byte-sum of everything read so far
    pub fn checksum(&self) -> u32 {
        self.sum
    }

    pub fn get_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::Eof {
                wanted: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        self.sum = out.iter().fold(self.sum, |s, &b| s.wrapping_add(b as u32));
        Ok(out)
    }

    fn get_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.get_bytes(N)?);
        Ok(out)
    }

    pub fn get_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.get_array::<1>()?[0])
    }

    pub fn get_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.get_array()?))
    }

    pub fn get_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.get_array()?))
    }

    pub fn get_i8(&mut self) -> Result<i8, CodecError> {
        Ok(self.get_u8()? as i8)
    }

    pub fn get_i16(&mut self) -> Result<i16, CodecError> {
        Ok(self.get_u16()? as i16)
    }

    pub fn get_i32(&mut self) -> Result<i32, CodecError> {
        Ok(self.get_u32()? as i32)
    }

    pub fn get_bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.get_u8()? != 0)
    }

    /// Read a NUL-terminated string, keeping at most `max - 1` bytes
    ///
    /// The rest of an over-long string is consumed and dropped so the
    /// stream stays in step.
    pub fn get_string(&mut self, max: usize) -> Result<String, CodecError> {
        let mut kept = Vec::new();
        loop {
            let b = self.get_u8()?;
            if b == 0 {
                break;
            }
            if kept.len() + 1 < max {
                kept.push(b);
            }
        }
        Ok(String::from_utf8_lossy(&kept).into_owned())
    }

    /// Inverse of [`Writer::put_wrapped`]
    pub fn get_wrapped(&mut self) -> Result<i16, CodecError> {
        Ok(unwrap_byte(self.get_u8()?))
    }

    /// Skip filler bytes
    pub fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        self.get_bytes(n).map(|_| ())
    }
}

/// Decode a wrapped signed byte: 0..=128 stand for themselves, 129..=255
/// for the negatives
pub fn unwrap_byte(b: u8) -> i16 {
    if b < 129 { b as i16 } else { b as i16 - 256 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_layout() {
        let mut w = Writer::new();
        w.put_u16(0x1234);
        w.put_u32(0xdeadbeef);
        w.put_i16(-2);
        assert_eq!(w.as_bytes(), &[0x34, 0x12, 0xef, 0xbe, 0xad, 0xde, 0xfe, 0xff]);

        let mut r = Reader::new(w.as_bytes());
        assert_eq!(r.get_u16().unwrap(), 0x1234);
        assert_eq!(r.get_u32().unwrap(), 0xdeadbeef);
        assert_eq!(r.get_i16().unwrap(), -2);
        assert!(r.is_at_end());
        assert_eq!(r.checksum(), w.checksum());
    }

    #[test]
    fn test_wrapped_bytes() {
        let mut w = Writer::new();
        for v in [-5, 0, 128, -127, 3] {
            w.put_wrapped(v);
        }
        assert_eq!(w.as_bytes()[0], 251);
        let mut r = Reader::new(w.as_bytes());
        let back: Vec<i16> = (0..5).map(|_| r.get_wrapped().unwrap()).collect();
        assert_eq!(back, [-5, 0, 128, -127, 3]);
    }

    #[test]
    fn test_long_string_keeps_stream_in_step() {
        let mut w = Writer::new();
        w.put_string("Glorfindel of the Golden Flower");
        w.put_u8(42);
        let mut r = Reader::new(w.as_bytes());
        assert_eq!(r.get_string(11).unwrap(), "Glorfindel");
        assert_eq!(r.get_u8().unwrap(), 42);
    }

    #[test]
    fn test_eof_is_an_error() {
        let mut r = Reader::new(&[1, 2, 3]);
        assert_eq!(
            r.get_u32(),
            Err(CodecError::Eof {
                wanted: 4,
                remaining: 3
            })
        );
        let mut r = Reader::new(b"abc");
        assert!(r.get_string(80).is_err());
    }

    #[test]
    fn test_buffer_grows_in_blocks() {
        let mut w = Writer::new();
        w.put_bytes(&vec![7u8; BUFFER_BLOCK + 1]);
        assert_eq!(w.len(), BUFFER_BLOCK + 1);
        assert_eq!(w.checksum(), 7 * (BUFFER_BLOCK as u32 + 1));
    }
}
