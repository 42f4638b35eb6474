//! The `.c2m` container format: a sequence of 4-byte-tag, `u32`-length
//! sections terminated by an `"END "` marker.
//!
//! Unlike the `DAT` trailer, an unrecognized tag here is a hard parse
//! error rather than something carried through opaquely - `.c2m` files are
//! produced by one editor lineage and the format doesn't need DAT's
//! tolerance for unknown third-party extensions.

use crate::binary::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};
use serde::Serialize;

const TAG_CC2M: &[u8; 4] = b"CC2M";
const TAG_LOCK: &[u8; 4] = b"LOCK";
const TAG_TITL: &[u8; 4] = b"TITL";
const TAG_AUTH: &[u8; 4] = b"AUTH";
const TAG_VERS: &[u8; 4] = b"VERS";
const TAG_CLUE: &[u8; 4] = b"CLUE";
const TAG_NOTE: &[u8; 4] = b"NOTE";
const TAG_MAP: &[u8; 4] = b"MAP ";
const TAG_PACK: &[u8; 4] = b"PACK";
const TAG_KEY: &[u8; 4] = b"KEY ";
const TAG_REPL: &[u8; 4] = b"REPL";
const TAG_PRPL: &[u8; 4] = b"PRPL";
const TAG_OPTN: &[u8; 4] = b"OPTN";
const TAG_RDNY: &[u8; 4] = b"RDNY";
const TAG_END: &[u8; 4] = b"END ";

/// The `OPTN` section's sub-fields. Each is present only if the section was
/// long enough to contain it - levels saved by older editors truncate this
/// list rather than zero-filling it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionFields {
    pub time: Option<u16>,
    pub editor_window: Option<u8>,
    pub verified_replay: Option<u8>,
    pub hide_map: Option<u8>,
    pub read_only_option: Option<u8>,
    pub replay_hash: Option<[u8; 16]>,
    pub hide_logic: Option<u8>,
    pub cc1_boots: Option<u8>,
    pub blob_patterns: Option<u8>,
}

/// A parsed `.c2m` file: the text and byte sections plus `OPTN`/`RDNY`
/// flags. The map/replay payloads are kept as raw bytes here - decoding
/// them into cells or moves is [`super::map`]'s and [`crate::tws`]'s job,
/// called separately once this layer has pulled out the sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct C2mLevel {
    pub file_version: Option<String>,
    pub lock: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub editor_version: Option<String>,
    pub clue: Option<String>,
    pub note: Option<String>,
    pub map: Option<Vec<u8>>,
    pub packed_map: Option<Vec<u8>>,
    pub key: Option<Vec<u8>>,
    pub replay: Option<Vec<u8>>,
    pub packed_replay: Option<Vec<u8>>,
    pub options: OptionFields,
    pub read_only: bool,
}

pub fn parse_c2m(bytes: &[u8]) -> Result<C2mLevel> {
    let mut r = BinaryReader::new(bytes);
    let mut level = C2mLevel::default();

    loop {
        let tag = r.bytes(4)?;
        let tag: [u8; 4] = tag.try_into().unwrap();
        let length = r.u32()? as usize;

        if &tag == TAG_END {
            break;
        }

        log::trace!("c2m section {:?}, {} byte(s)", String::from_utf8_lossy(&tag), length);

        let value = r.bytes(length)?;
        let mut vr = BinaryReader::new(&value);

        match &tag {
            t if t == TAG_CC2M => level.file_version = Some(vr.text(length)?),
            t if t == TAG_LOCK => level.lock = Some(vr.text(length)?),
            t if t == TAG_TITL => level.title = Some(vr.text(length)?),
            t if t == TAG_AUTH => level.author = Some(vr.text(length)?),
            t if t == TAG_VERS => level.editor_version = Some(vr.text(length)?),
            t if t == TAG_CLUE => level.clue = Some(vr.text(length)?),
            t if t == TAG_NOTE => level.note = Some(vr.text(length)?),
            t if t == TAG_MAP => level.map = Some(value),
            t if t == TAG_PACK => level.packed_map = Some(value),
            t if t == TAG_KEY => level.key = Some(value),
            t if t == TAG_REPL => level.replay = Some(value),
            t if t == TAG_PRPL => level.packed_replay = Some(value),
            t if t == TAG_OPTN => level.options = parse_optn(&mut vr, length)?,
            t if t == TAG_RDNY => {
                if length != 0 {
                    return Err(Error::SectionLengthMismatch);
                }
                level.read_only = true;
            }
            _ => {
                return Err(Error::UnknownSection(String::from_utf8_lossy(&tag).to_string()));
            }
        }
    }

    Ok(level)
}

fn parse_optn(r: &mut BinaryReader, length: usize) -> Result<OptionFields> {
    let mut opt = OptionFields::default();

    if r.position() < length {
        opt.time = Some(r.u16()?);
    }
    if r.position() < length {
        opt.editor_window = Some(r.u8()?);
    }
    if r.position() < length {
        opt.verified_replay = Some(r.u8()?);
    }
    if r.position() < length {
        opt.hide_map = Some(r.u8()?);
    }
    if r.position() < length {
        opt.read_only_option = Some(r.u8()?);
    }
    if r.position() < length {
        let hash: [u8; 16] = r.bytes(16)?.try_into().unwrap();
        opt.replay_hash = Some(hash);
    }
    if r.position() < length {
        opt.hide_logic = Some(r.u8()?);
    }
    if r.position() < length {
        opt.cc1_boots = Some(r.u8()?);
    }
    if r.position() < length {
        opt.blob_patterns = Some(r.u8()?);
    }

    if r.position() != length {
        return Err(Error::SectionLengthMismatch);
    }

    Ok(opt)
}

pub fn write_c2m(level: &C2mLevel) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();

    write_text_section(&mut w, TAG_CC2M, &level.file_version);
    write_text_section(&mut w, TAG_LOCK, &level.lock);
    write_text_section(&mut w, TAG_TITL, &level.title);
    write_text_section(&mut w, TAG_AUTH, &level.author);
    write_text_section(&mut w, TAG_VERS, &level.editor_version);
    write_text_section(&mut w, TAG_CLUE, &level.clue);
    write_text_section(&mut w, TAG_NOTE, &level.note);

    write_byte_section(&mut w, TAG_MAP, &level.map);
    write_byte_section(&mut w, TAG_PACK, &level.packed_map);
    write_byte_section(&mut w, TAG_KEY, &level.key);
    write_byte_section(&mut w, TAG_REPL, &level.replay);
    write_byte_section(&mut w, TAG_PRPL, &level.packed_replay);

    write_optn(&mut w, &level.options);

    if level.read_only {
        w.bytes(TAG_RDNY);
        w.u32(0);
    }

    w.bytes(TAG_END);
    w.u32(0);

    Ok(w.written())
}

fn write_text_section(w: &mut BinaryWriter, tag: &[u8; 4], value: &Option<String>) {
    if let Some(s) = value {
        let mut body = BinaryWriter::new();
        body.text(s);
        w.bytes(tag);
        w.u32(body.len() as u32);
        w.bytes(body.as_slice());
    }
}

fn write_byte_section(w: &mut BinaryWriter, tag: &[u8; 4], value: &Option<Vec<u8>>) {
    if let Some(bytes) = value {
        w.bytes(tag);
        w.u32(bytes.len() as u32);
        w.bytes(bytes);
    }
}

fn write_optn(w: &mut BinaryWriter, opt: &OptionFields) {
    let mut body = BinaryWriter::new();

    if let Some(v) = opt.time {
        body.u16(v);
    } else {
        return finish_optn(w, body);
    }
    if let Some(v) = opt.editor_window {
        body.u8(v);
    } else {
        return finish_optn(w, body);
    }
    if let Some(v) = opt.verified_replay {
        body.u8(v);
    } else {
        return finish_optn(w, body);
    }
    if let Some(v) = opt.hide_map {
        body.u8(v);
    } else {
        return finish_optn(w, body);
    }
    if let Some(v) = opt.read_only_option {
        body.u8(v);
    } else {
        return finish_optn(w, body);
    }
    if let Some(v) = opt.replay_hash {
        body.bytes(&v);
    } else {
        return finish_optn(w, body);
    }
    if let Some(v) = opt.hide_logic {
        body.u8(v);
    } else {
        return finish_optn(w, body);
    }
    if let Some(v) = opt.cc1_boots {
        body.u8(v);
    } else {
        return finish_optn(w, body);
    }
    if let Some(v) = opt.blob_patterns {
        body.u8(v);
    }

    finish_optn(w, body)
}

fn finish_optn(w: &mut BinaryWriter, body: BinaryWriter) {
    if body.is_empty() {
        return;
    }
    w.bytes(TAG_OPTN);
    w.u32(body.len() as u32);
    w.bytes(body.as_slice());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_level_round_trips() {
        let level = C2mLevel {
            file_version: Some("7".to_string()),
            title: Some("Test Level".to_string()),
            map: Some(vec![1, 2, 3]),
            ..C2mLevel::default()
        };
        let bytes = write_c2m(&level).unwrap();
        let parsed = parse_c2m(&bytes).unwrap();
        assert_eq!(parsed, level);
    }

    #[test]
    fn optn_partial_fields_round_trip() {
        let level = C2mLevel {
            options: OptionFields {
                time: Some(500),
                editor_window: Some(1),
                ..OptionFields::default()
            },
            ..C2mLevel::default()
        };
        let bytes = write_c2m(&level).unwrap();
        let parsed = parse_c2m(&bytes).unwrap();
        assert_eq!(parsed.options.time, Some(500));
        assert_eq!(parsed.options.editor_window, Some(1));
        assert_eq!(parsed.options.verified_replay, None);
    }

    #[test]
    fn read_only_flag_round_trips() {
        let level = C2mLevel {
            read_only: true,
            ..C2mLevel::default()
        };
        let bytes = write_c2m(&level).unwrap();
        let parsed = parse_c2m(&bytes).unwrap();
        assert!(parsed.read_only);
    }

    #[test]
    fn unknown_section_is_a_hard_error() {
        let mut w = BinaryWriter::new();
        w.bytes(b"ZZZZ");
        w.u32(2);
        w.bytes(&[1, 2]);
        w.bytes(TAG_END);
        w.u32(0);
        let err = parse_c2m(&w.written()).unwrap_err();
        assert!(matches!(err, Error::UnknownSection(_)));
    }
}
