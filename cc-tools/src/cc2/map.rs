//! Decoding and encoding the `MAP `/`PACK` section body: a byte-pair
//! width/height header followed by a stream of per-cell element lists.

use super::cell::C2mCell;
use super::element::C2mElement;
use super::modifiers::{build_dblock_arrows, build_direction, build_modifier, build_thinwall_canopy, parse_dblock_arrows, parse_direction, parse_modifier, parse_thinwall_canopy};
use super::tile::Cc2Tile;
use crate::binary::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};
use num_traits::FromPrimitive;
use serde::Serialize;

/// A decoded map: its dimensions plus one cell per (x, y), stored row-major
/// with x varying fastest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct C2mMap {
    pub width: u8,
    pub height: u8,
    pub cells: Vec<C2mCell>,
}

impl C2mMap {
    pub fn at(&self, x: u8, y: u8) -> &C2mCell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }
}

fn tile_from_code(code: u8) -> Result<Cc2Tile> {
    Cc2Tile::from_u8(code).ok_or(Error::InvalidTileCode(code as u16))
}

pub fn decode(bytes: &[u8]) -> Result<C2mMap> {
    let mut r = BinaryReader::new(bytes);
    let width = r.u8()?;
    let height = r.u8()?;
    let cell_count = width as usize * height as usize;

    let mut cells = Vec::with_capacity(cell_count);
    for _ in 0..cell_count {
        cells.push(decode_cell(&mut r)?);
    }

    Ok(C2mMap { width, height, cells })
}

fn decode_cell(r: &mut BinaryReader) -> Result<C2mCell> {
    let mut cell = C2mCell::new();
    while cell.terrain.is_none() {
        let elem = parse_elem(r)?;
        assign_layer(&mut cell, elem);
    }
    Ok(cell)
}

fn assign_layer(cell: &mut C2mCell, elem: C2mElement) {
    if Cc2Tile::panels().contains(&elem.id) {
        cell.panel = Some(elem);
    } else if Cc2Tile::all_mobs().contains(&elem.id) {
        cell.mob = Some(elem);
    } else if elem.id == Cc2Tile::NotAllowedMarker {
        cell.not_allowed = Some(elem);
    } else if Cc2Tile::pickups().contains(&elem.id) {
        cell.pickup = Some(elem);
    } else {
        cell.terrain = Some(elem);
    }
}

fn parse_elem(r: &mut BinaryReader) -> Result<C2mElement> {
    let code = r.u8()?;
    let tile = tile_from_code(code)?;

    if Cc2Tile::all_mobs().contains(&tile) {
        let mut elem = C2mElement::new(tile);
        elem.direction = Some(parse_direction(r.u8()?)?);
        if tile == Cc2Tile::DirectionalBlock {
            elem.directions = Some(parse_dblock_arrows(r.u8()?));
        }
        return Ok(elem);
    }

    if tile == Cc2Tile::ThinWallCanopy {
        let mut elem = C2mElement::new(tile);
        elem.directions = Some(parse_thinwall_canopy(r.u8()?));
        return Ok(elem);
    }

    if tile == Cc2Tile::Modifier8Bit || tile == Cc2Tile::Modifier16Bit || tile == Cc2Tile::Modifier32Bit {
        let width = match tile {
            Cc2Tile::Modifier8Bit => 1,
            Cc2Tile::Modifier16Bit => 2,
            _ => 4,
        };
        let modifier_bytes = r.bytes(width)?;
        let mut inner = parse_elem(r)?;
        parse_modifier(&mut inner, &modifier_bytes)?;
        return Ok(inner);
    }

    Ok(C2mElement::new(tile))
}

pub fn encode(map: &C2mMap) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();
    w.u8(map.width);
    w.u8(map.height);

    for cell in &map.cells {
        for elem in cell.layers() {
            encode_elem(&mut w, elem)?;
        }
    }

    Ok(w.written())
}

fn encode_elem(w: &mut BinaryWriter, elem: &C2mElement) -> Result<()> {
    if Cc2Tile::modified_tiles().contains(&elem.id) {
        let modifier_bytes = build_modifier(elem)?;
        let value = le_value(&modifier_bytes);
        if value != 0 {
            write_modifier_prefix(w, value);
        }
        w.u8(elem.id.code());
        return Ok(());
    }

    if Cc2Tile::all_mobs().contains(&elem.id) {
        w.u8(elem.id.code());
        w.u8(build_direction(elem.direction.as_deref().unwrap_or("N"))?);
        if elem.id == Cc2Tile::DirectionalBlock {
            w.u8(build_dblock_arrows(elem.directions.as_deref().unwrap_or("")));
        }
        return Ok(());
    }

    if elem.id == Cc2Tile::ThinWallCanopy {
        w.u8(elem.id.code());
        w.u8(build_thinwall_canopy(elem.directions.as_deref().unwrap_or("")));
        return Ok(());
    }

    w.u8(elem.id.code());
    Ok(())
}

fn le_value(bytes: &[u8]) -> u32 {
    bytes.iter().rev().fold(0u32, |acc, &b| (acc << 8) | b as u32)
}

/// Writes the smallest-width `MODIFIER_*` prefix tile plus `value`'s bytes
/// at that width. Callers only reach this once `value != 0` - a zero
/// modifier is always omitted entirely rather than written as a no-op
/// prefix.
fn write_modifier_prefix(w: &mut BinaryWriter, value: u32) {
    if value <= 0xFF {
        w.u8(Cc2Tile::Modifier8Bit.code());
        w.u8(value as u8);
    } else if value <= 0xFFFF {
        w.u8(Cc2Tile::Modifier16Bit.code());
        w.u8((value & 0xFF) as u8);
        w.u8(((value >> 8) & 0xFF) as u8);
    } else {
        w.u8(Cc2Tile::Modifier32Bit.code());
        w.u32(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_cell() -> C2mCell {
        let mut cell = C2mCell::new();
        cell.terrain = Some(C2mElement::new(Cc2Tile::Floor));
        cell
    }

    #[test]
    fn single_plain_floor_cell_round_trips() {
        let map = C2mMap {
            width: 1,
            height: 1,
            cells: vec![floor_cell()],
        };
        let bytes = encode(&map).unwrap();
        assert_eq!(bytes, vec![1, 1, Cc2Tile::Floor.code()]);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn wired_floor_with_wires_gets_modifier_prefix() {
        let mut elem = C2mElement::new(Cc2Tile::Floor);
        elem.wires = Some("NS".to_string());
        let mut cell = C2mCell::new();
        cell.terrain = Some(elem);
        let map = C2mMap {
            width: 1,
            height: 1,
            cells: vec![cell],
        };
        let bytes = encode(&map).unwrap();
        assert_eq!(bytes, vec![1, 1, Cc2Tile::Modifier8Bit.code(), 0b0000_0101, Cc2Tile::Floor.code()]);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.at(0, 0).terrain.as_ref().unwrap().wires.as_deref(), Some("NS"));
    }

    #[test]
    fn wired_floor_with_no_wires_omits_modifier_prefix() {
        let elem = C2mElement::new(Cc2Tile::Floor);
        let mut cell = C2mCell::new();
        cell.terrain = Some(elem);
        let map = C2mMap {
            width: 1,
            height: 1,
            cells: vec![cell],
        };
        let bytes = encode(&map).unwrap();
        assert_eq!(bytes, vec![1, 1, Cc2Tile::Floor.code()]);
    }

    #[test]
    fn mob_with_direction_round_trips() {
        let mut elem = C2mElement::new(Cc2Tile::Ant);
        elem.direction = Some("E".to_string());
        let mut cell = C2mCell::new();
        cell.mob = Some(elem);
        cell.terrain = Some(C2mElement::new(Cc2Tile::Floor));
        let map = C2mMap {
            width: 1,
            height: 1,
            cells: vec![cell],
        };
        let bytes = encode(&map).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.at(0, 0).mob.as_ref().unwrap().direction.as_deref(), Some("E"));
        assert_eq!(decoded.at(0, 0).terrain.as_ref().unwrap().id, Cc2Tile::Floor);
    }

    #[test]
    fn directional_block_arrows_round_trip() {
        let mut elem = C2mElement::new(Cc2Tile::DirectionalBlock);
        elem.direction = Some("N".to_string());
        elem.directions = Some("NE".to_string());
        let mut cell = C2mCell::new();
        cell.mob = Some(elem);
        cell.terrain = Some(C2mElement::new(Cc2Tile::Floor));
        let map = C2mMap {
            width: 1,
            height: 1,
            cells: vec![cell],
        };
        let bytes = encode(&map).unwrap();
        let decoded = decode(&bytes).unwrap();
        let mob = decoded.at(0, 0).mob.as_ref().unwrap();
        assert_eq!(mob.direction.as_deref(), Some("N"));
        assert_eq!(mob.directions.as_deref(), Some("NE"));
    }

    #[test]
    fn multi_cell_map_decodes_in_row_major_order() {
        let map = C2mMap {
            width: 2,
            height: 1,
            cells: vec![floor_cell(), floor_cell()],
        };
        let bytes = encode(&map).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.width, 2);
        assert_eq!(decoded.height, 1);
        assert_eq!(decoded.cells.len(), 2);
    }
}
