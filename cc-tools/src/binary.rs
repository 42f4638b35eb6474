//! Little-endian binary stream reading and writing.
//!
//! Every format in this crate (DAT, C2M, TWS) is read and written through
//! these two small wrappers instead of poking at byte slices directly.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

/// Maps a byte to the Unicode codepoint windows-1252 assigns it. The
/// printable ASCII range and Latin-1 range are identical; only 0x80-0x9f
/// differ, and those bytes almost never appear in CC level text.
fn decode_windows_1252(bytes: &[u8]) -> Result<String> {
    let mut s = String::with_capacity(bytes.len());
    for &b in bytes {
        match WINDOWS_1252_HIGH.get((b as usize).wrapping_sub(0x80)) {
            Some(&Some(c)) if b >= 0x80 => s.push(c),
            Some(&None) if b >= 0x80 => {
                log::warn!("byte {:#04x} has no windows-1252 mapping, using replacement", b);
                s.push('\u{fffd}');
            }
            _ => s.push(b as char),
        }
    }
    Ok(s)
}

#[rustfmt::skip]
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Encodes a string back to windows-1252 bytes, best-effort: codepoints
/// with no single-byte representation fall back to `?`.
fn encode_windows_1252(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| {
            if (c as u32) < 0x80 {
                c as u8
            } else if let Some(pos) = WINDOWS_1252_HIGH.iter().position(|&m| m == Some(c)) {
                (pos + 0x80) as u8
            } else if (0xa0..=0xff).contains(&(c as u32)) {
                c as u8
            } else {
                b'?'
            }
        })
        .collect()
}

/// Reads primitives out of an in-memory byte buffer. Overruns surface as
/// `Error::UnexpectedEof`; nothing is read speculatively.
pub struct BinaryReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> BinaryReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BinaryReader {
            cursor: Cursor::new(bytes),
        }
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.cursor.read_u8()?)
    }

    pub fn u16(&mut self) -> Result<u16> {
        Ok(self.cursor.read_u16::<LittleEndian>()?)
    }

    pub fn u32(&mut self) -> Result<u32> {
        Ok(self.cursor.read_u32::<LittleEndian>()?)
    }

    pub fn i8(&mut self) -> Result<i8> {
        Ok(self.cursor.read_i8()?)
    }

    pub fn i32(&mut self) -> Result<i32> {
        Ok(self.cursor.read_i32::<LittleEndian>()?)
    }

    /// Reads exactly `n` bytes, failing if fewer remain.
    pub fn bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof);
        }
        let mut buf = vec![0u8; n];
        std::io::Read::read_exact(&mut self.cursor, &mut buf)?;
        Ok(buf)
    }

    /// Reads `n` bytes and decodes them as windows-1252 text.
    pub fn text(&mut self, n: usize) -> Result<String> {
        decode_windows_1252(&self.bytes(n)?)
    }

    /// Reads a NUL-terminated windows-1252 string, consuming the NUL.
    /// If no NUL is found before the buffer ends, the remainder is used.
    pub fn text_nul_terminated(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        loop {
            if self.remaining() == 0 {
                break;
            }
            let b = self.u8()?;
            if b == 0 {
                break;
            }
            buf.push(b);
        }
        decode_windows_1252(&buf)
    }

    pub fn remaining(&self) -> usize {
        self.raw().len() - self.position()
    }

    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn seek(&mut self, position: usize) {
        self.cursor.set_position(position as u64);
    }

    pub fn seek_relative(&mut self, delta: i64) {
        let new_pos = self.cursor.position() as i64 + delta;
        self.cursor.set_position(new_pos as u64);
    }

    pub fn raw(&self) -> &'a [u8] {
        *self.cursor.get_ref()
    }
}

/// Accumulates bytes for a format writer. Mirrors `BinaryReader` field for
/// field so parser and writer read the same way round.
#[derive(Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        BinaryWriter { buf: Vec::new() }
    }

    pub fn u8(&mut self, v: u8) {
        self.buf.write_u8(v).unwrap();
    }

    pub fn u16(&mut self, v: u16) {
        self.buf.write_u16::<LittleEndian>(v).unwrap();
    }

    pub fn u32(&mut self, v: u32) {
        self.buf.write_u32::<LittleEndian>(v).unwrap();
    }

    pub fn i8(&mut self, v: i8) {
        self.buf.write_i8(v).unwrap();
    }

    pub fn i32(&mut self, v: i32) {
        self.buf.write_i32::<LittleEndian>(v).unwrap();
    }

    pub fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn text(&mut self, s: &str) {
        self.bytes(&encode_windows_1252(s));
    }

    pub fn text_nul_terminated(&mut self, s: &str) {
        self.text(s);
        self.u8(0);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn written(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_primitives() {
        let mut w = BinaryWriter::new();
        w.u8(0x42);
        w.u16(0x1234);
        w.u32(0xdeadbeef);
        let bytes = w.written();

        let mut r = BinaryReader::new(&bytes);
        assert_eq!(r.u8().unwrap(), 0x42);
        assert_eq!(r.u16().unwrap(), 0x1234);
        assert_eq!(r.u32().unwrap(), 0xdeadbeef);
    }

    #[test]
    fn overrun_is_unexpected_eof() {
        let bytes = [0x01];
        let mut r = BinaryReader::new(&bytes);
        assert!(r.u16().is_err());
    }

    #[test]
    fn nul_terminated_text_stops_at_nul() {
        let bytes = [b'h', b'i', 0, b'X'];
        let mut r = BinaryReader::new(&bytes);
        assert_eq!(r.text_nul_terminated().unwrap(), "hi");
        assert_eq!(r.position(), 3);
    }

    #[test]
    fn remaining_and_seek() {
        let bytes = [0u8; 10];
        let mut r = BinaryReader::new(&bytes);
        assert_eq!(r.remaining(), 10);
        r.seek(4);
        assert_eq!(r.remaining(), 6);
        r.seek_relative(-2);
        assert_eq!(r.position(), 2);
    }

    #[test]
    fn windows_1252_round_trips_ascii() {
        let mut w = BinaryWriter::new();
        w.text_nul_terminated("Hello, CHIP!");
        let bytes = w.written();
        let mut r = BinaryReader::new(&bytes);
        assert_eq!(r.text_nul_terminated().unwrap(), "Hello, CHIP!");
    }
}
