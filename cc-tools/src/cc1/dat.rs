//! The CC1 `DAT` level-pack container: magic number, level count, then one
//! size-prefixed level record per level (two RLE layers plus a tagged
//! trailer). See `spec.md` §4.6.

use super::cell::Cc1Cell;
use super::level::{Cc1Level, Cc1Levelset, CELL_COUNT, WIDTH};
use super::tile::Cc1Tile;
use crate::binary::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};

pub const DEFAULT_MAGIC_NUMBER: u32 = 0x0002AAAC;

const TITLE_FIELD: u8 = 3;
const TRAPS_FIELD: u8 = 4;
const CLONERS_FIELD: u8 = 5;
const PASSWORD_FIELD: u8 = 6;
const HINT_FIELD: u8 = 7;
const MOVEMENT_FIELD: u8 = 10;
const STANDARD_FIELDS: [u8; 6] = [
    TITLE_FIELD,
    TRAPS_FIELD,
    CLONERS_FIELD,
    PASSWORD_FIELD,
    HINT_FIELD,
    MOVEMENT_FIELD,
];

/// Reads a whole DAT levelset from bytes.
pub fn parse(bytes: &[u8]) -> Result<Cc1Levelset> {
    let mut r = BinaryReader::new(bytes);
    let magic_number = r.u32()?;
    let num_levels = r.u16()?;
    let mut levels = Vec::with_capacity(num_levels as usize);
    for _ in 0..num_levels {
        let size = r.u16()? as usize;
        let level_bytes = r.bytes(size)?;
        levels.push(parse_level(&level_bytes)?);
    }
    Ok(Cc1Levelset {
        levels,
        magic_number: Some(magic_number),
    })
}

fn parse_level(bytes: &[u8]) -> Result<Cc1Level> {
    let mut r = BinaryReader::new(bytes);
    r.u16()?; // level number, unused: the writer renumbers sequentially
    let time = r.u16()?;
    let chips = r.u16()?;
    r.u16()?; // map detail, always 1 in practice; not modeled on Cc1Level

    let top_len = r.u16()? as usize;
    let top = decompress_layer(&r.bytes(top_len)?)?;
    let bottom_len = r.u16()? as usize;
    let bottom = decompress_layer(&r.bytes(bottom_len)?)?;

    let mut map = Vec::with_capacity(CELL_COUNT);
    for i in 0..CELL_COUNT {
        map.push(Cc1Cell::new(Cc1Tile::from_code(top[i])?, Cc1Tile::from_code(bottom[i])?));
    }

    let mut level = Cc1Level {
        map,
        ..Cc1Level::default()
    };
    level.time = time;
    level.chips = chips;

    let mut bytes_remaining = r.u16()? as i32;
    while bytes_remaining > 0 {
        let field = r.u8()?;
        let length = r.u8()? as usize;
        let content = r.bytes(length)?;
        bytes_remaining -= length as i32 + 2;
        log::trace!("dat trailer field {}, {} byte(s)", field, length);
        level.field_order.push(field);
        match field {
            TITLE_FIELD => level.title = nul_terminated_latin1(&content),
            TRAPS_FIELD => level.traps = parse_traps(&content)?,
            CLONERS_FIELD => level.cloners = parse_cloners(&content)?,
            PASSWORD_FIELD => level.password = decode_password(&content)?,
            HINT_FIELD => level.hint = nul_terminated_latin1(&content),
            MOVEMENT_FIELD => level.movement = parse_movement(&content)?,
            _ => {
                log::warn!("encountered unexpected DAT field {}", field);
                level.extra_fields.push((field, content));
            }
        }
    }
    Ok(level)
}

fn nul_terminated_latin1(bytes: &[u8]) -> String {
    let trimmed = bytes.strip_suffix(&[0u8]).unwrap_or(bytes);
    trimmed.iter().map(|&b| b as char).collect()
}

fn parse_traps(bytes: &[u8]) -> Result<Vec<(usize, usize)>> {
    let mut r = BinaryReader::new(bytes);
    let mut traps = Vec::with_capacity(bytes.len() / 10);
    for _ in 0..(bytes.len() / 10) {
        let (bx, by) = (r.u16()? as usize, r.u16()? as usize);
        let (tx, ty) = (r.u16()? as usize, r.u16()? as usize);
        r.u16()?; // open/shut flag: not modeled, traps start shut
        traps.push((by * WIDTH + bx, ty * WIDTH + tx));
    }
    Ok(traps)
}

fn parse_cloners(bytes: &[u8]) -> Result<Vec<(usize, usize)>> {
    let mut r = BinaryReader::new(bytes);
    let mut cloners = Vec::with_capacity(bytes.len() / 8);
    for _ in 0..(bytes.len() / 8) {
        let (bx, by) = (r.u16()? as usize, r.u16()? as usize);
        let (cx, cy) = (r.u16()? as usize, r.u16()? as usize);
        cloners.push((by * WIDTH + bx, cy * WIDTH + cx));
    }
    Ok(cloners)
}

fn parse_movement(bytes: &[u8]) -> Result<Vec<usize>> {
    let mut r = BinaryReader::new(bytes);
    let mut movement = Vec::with_capacity(bytes.len() / 2);
    for _ in 0..(bytes.len() / 2) {
        let x = r.u8()? as usize;
        let y = r.u8()? as usize;
        movement.push(y * WIDTH + x);
    }
    Ok(movement)
}

fn decode_password(bytes: &[u8]) -> Result<String> {
    let trimmed = bytes.strip_suffix(&[0u8]).unwrap_or(bytes);
    Ok(trimmed.iter().map(|&b| (b ^ 0x99) as char).collect())
}

fn encode_password(s: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(s.len() + 1);
    for &b in s.as_bytes() {
        if !(b'A'..=b'Z').contains(&b) {
            return Err(Error::InvalidPassword(b));
        }
        out.push(b ^ 0x99);
    }
    out.push(0);
    Ok(out)
}

/// 1-byte RLE used for the two 1024-byte map layers: a byte `< 0xFF` is
/// literal; `0xFF len code` repeats `code` `len` times.
fn decompress_layer(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut r = BinaryReader::new(bytes);
    let mut layer = Vec::with_capacity(CELL_COUNT);
    while layer.len() < CELL_COUNT {
        let b = r.u8()?;
        if b == 0xFF {
            let length = r.u8()? as usize;
            let code = r.u8()?;
            layer.extend(std::iter::repeat(code).take(length));
        } else {
            layer.push(b);
        }
    }
    Ok(layer)
}

fn compress_layer(layer: &[u8]) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    let mut i = 0;
    while i < layer.len() {
        let c = layer[i];
        let mut end = i;
        while end + 1 < layer.len() && layer[end + 1] == c && end + 1 - i < 255 {
            end += 1;
        }
        let length = end + 1 - i;
        if length <= 3 {
            for _ in 0..length {
                w.u8(c);
            }
        } else {
            w.u8(0xFF);
            w.u8(length as u8);
            w.u8(c);
        }
        i += length;
    }
    w.written()
}

/// Writes a whole DAT levelset to bytes.
pub fn write(levelset: &Cc1Levelset) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();
    w.u32(levelset.magic_number.unwrap_or(DEFAULT_MAGIC_NUMBER));
    w.u16(levelset.levels.len() as u16);
    for (i, level) in levelset.levels.iter().enumerate() {
        let level_bytes = write_level(level, (i + 1) as u16)?;
        w.u16(level_bytes.len() as u16);
        w.bytes(&level_bytes);
    }
    Ok(w.written())
}

fn write_level(level: &Cc1Level, number: u16) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();
    w.u16(number);
    w.u16(level.time);
    w.u16(level.chips);
    w.u16(1); // map_detail

    let mut top = Vec::with_capacity(CELL_COUNT);
    let mut bottom = Vec::with_capacity(CELL_COUNT);
    for cell in &level.map {
        top.push(cell.top.code());
        bottom.push(cell.bottom.code());
    }
    let top_bytes = compress_layer(&top);
    let bottom_bytes = compress_layer(&bottom);
    w.u16(top_bytes.len() as u16);
    w.bytes(&top_bytes);
    w.u16(bottom_bytes.len() as u16);
    w.bytes(&bottom_bytes);

    let trailer = write_trailer(level)?;
    w.u16(trailer.len() as u16);
    w.bytes(&trailer);
    Ok(w.written())
}

fn write_trailer(level: &Cc1Level) -> Result<Vec<u8>> {
    if level.movement.len() > super::level::MAX_MOVEMENT {
        return Err(Error::MovementCapacity(level.movement.len()));
    }

    let mut order = level.field_order.clone();
    if order.is_empty() {
        order = STANDARD_FIELDS.to_vec();
    }
    let mut append_if_missing = |field: u8, present: bool| {
        if present && !order.contains(&field) {
            order.push(field);
        }
    };
    append_if_missing(TITLE_FIELD, !level.title.is_empty());
    append_if_missing(TRAPS_FIELD, !level.traps.is_empty());
    append_if_missing(CLONERS_FIELD, !level.cloners.is_empty());
    append_if_missing(PASSWORD_FIELD, !level.password.is_empty());
    append_if_missing(HINT_FIELD, !level.hint.is_empty());
    append_if_missing(MOVEMENT_FIELD, !level.movement.is_empty());

    let mut w = BinaryWriter::new();
    for field in order {
        match field {
            TITLE_FIELD if !level.title.is_empty() => {
                let mut bytes: Vec<u8> = level.title.bytes().collect();
                bytes.push(0);
                w.u8(TITLE_FIELD);
                w.u8(bytes.len() as u8);
                w.bytes(&bytes);
            }
            TRAPS_FIELD if !level.traps.is_empty() => {
                w.u8(TRAPS_FIELD);
                w.u8((10 * level.traps.len()) as u8);
                for &(k, v) in &level.traps {
                    w.u16((k % WIDTH) as u16);
                    w.u16((k / WIDTH) as u16);
                    w.u16((v % WIDTH) as u16);
                    w.u16((v / WIDTH) as u16);
                    w.u16(0); // open/shut flag
                }
            }
            CLONERS_FIELD if !level.cloners.is_empty() => {
                w.u8(CLONERS_FIELD);
                w.u8((8 * level.cloners.len()) as u8);
                for &(k, v) in &level.cloners {
                    w.u16((k % WIDTH) as u16);
                    w.u16((k / WIDTH) as u16);
                    w.u16((v % WIDTH) as u16);
                    w.u16((v / WIDTH) as u16);
                }
            }
            PASSWORD_FIELD if !level.password.is_empty() => {
                let bytes = encode_password(&level.password)?;
                w.u8(PASSWORD_FIELD);
                w.u8(bytes.len() as u8);
                w.bytes(&bytes);
            }
            HINT_FIELD if !level.hint.is_empty() => {
                let mut bytes: Vec<u8> = level.hint.bytes().collect();
                bytes.push(0);
                w.u8(HINT_FIELD);
                w.u8(bytes.len() as u8);
                w.bytes(&bytes);
            }
            MOVEMENT_FIELD if !level.movement.is_empty() => {
                w.u8(MOVEMENT_FIELD);
                w.u8((2 * level.movement.len()) as u8);
                for &p in &level.movement {
                    w.u8((p % WIDTH) as u8);
                    w.u8((p / WIDTH) as u8);
                }
            }
            f if !STANDARD_FIELDS.contains(&f) => {
                if let Some((_, content)) = level.extra_fields.iter().find(|(tag, _)| *tag == f) {
                    w.u8(f);
                    w.u8(content.len() as u8);
                    w.bytes(content);
                }
            }
            _ => {}
        }
    }
    Ok(w.written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cc1::level::MAX_MOVEMENT;

    #[test]
    fn layer_rle_round_trips() {
        let mut layer = vec![0u8; CELL_COUNT];
        for (i, b) in layer.iter_mut().enumerate() {
            *b = (i % 5) as u8;
        }
        for b in layer.iter_mut().skip(100).take(10) {
            *b = 7;
        }
        let compressed = compress_layer(&layer);
        let decompressed = decompress_layer(&compressed).unwrap();
        assert_eq!(decompressed, layer);
    }

    #[test]
    fn password_round_trips_uppercase() {
        let encoded = encode_password("ABCZ").unwrap();
        assert_eq!(decode_password(&encoded).unwrap(), "ABCZ");
    }

    #[test]
    fn password_rejects_lowercase() {
        assert!(encode_password("abc").is_err());
    }

    #[test]
    fn level_round_trips_through_write_parse() {
        let mut level = Cc1Level::default();
        level.title = "TEST LEVEL".to_string();
        level.password = "ABCD".to_string();
        level.hint = "a hint".to_string();
        level.time = 100;
        level.chips = 5;
        level.at_mut(0usize).add(Cc1Tile::TrapButton);
        level.at_mut(1usize).add(Cc1Tile::Trap);
        level.connect(0usize, 1usize);
        level.add(10usize, Cc1Tile::TeethN);

        let levelset = Cc1Levelset {
            levels: vec![level.clone()],
            magic_number: Some(DEFAULT_MAGIC_NUMBER),
        };
        let bytes = write(&levelset).unwrap();
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.levels.len(), 1);
        let parsed_level = &parsed.levels[0];
        assert_eq!(parsed_level.title, level.title);
        assert_eq!(parsed_level.password, level.password);
        assert_eq!(parsed_level.hint, level.hint);
        assert_eq!(parsed_level.time, level.time);
        assert_eq!(parsed_level.chips, level.chips);
        assert_eq!(parsed_level.traps, level.traps);
        assert_eq!(parsed_level.movement, level.movement);
        assert_eq!(parsed_level.map, level.map);
    }

    #[test]
    fn unknown_trailer_fields_round_trip_opaque() {
        let mut level = Cc1Level::default();
        level.extra_fields.push((9, vec![1, 2, 3]));
        level.field_order.push(9);
        let levelset = Cc1Levelset {
            levels: vec![level],
            magic_number: Some(DEFAULT_MAGIC_NUMBER),
        };
        let bytes = write(&levelset).unwrap();
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.levels[0].extra_fields, vec![(9, vec![1, 2, 3])]);
    }

    #[test]
    fn write_rejects_movement_list_built_past_the_cap() {
        let mut level = Cc1Level::default();
        level.movement = (0..(MAX_MOVEMENT + 1)).collect();
        let levelset = Cc1Levelset {
            levels: vec![level],
            magic_number: None,
        };
        let err = write(&levelset).unwrap_err();
        assert!(matches!(err, Error::MovementCapacity(_)));
    }

    #[test]
    fn movement_cap_preserved_on_write() {
        let mut level = Cc1Level::default();
        for i in 0..130usize {
            level.add(i, Cc1Tile::TeethN);
        }
        assert_eq!(level.movement.len(), MAX_MOVEMENT);
        let levelset = Cc1Levelset {
            levels: vec![level],
            magic_number: None,
        };
        let bytes = write(&levelset).unwrap();
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.levels[0].movement.len(), MAX_MOVEMENT);
    }
}
