//! A single parsed map tile plus whatever modifier data decorates it.

use super::tile::Cc2Tile;
use serde::Serialize;

const DIR_ORDER: &str = "NESW";

/// Canonicalizes a direction-set string to `"NESWC"` order, keeping only
/// recognized letters. Mirrors how the map codec always emits wire/
/// direction bitmasks in a fixed order regardless of input order.
fn canon(s: &str) -> String {
    "NESWC".chars().filter(|c| s.contains(*c)).collect()
}

fn rotate_compound(s: &str, map: &[(char, char)]) -> String {
    if s.is_empty() {
        return String::new();
    }
    let canopy = s.contains('C');
    let core: String = s.chars().filter(|c| DIR_ORDER.contains(*c)).collect();
    let mut out: String = core.chars().rev().map(|c| lookup(map, c)).collect();
    if canopy {
        out.push('C');
    }
    out
}

fn rotate_set_string(s: &str, map: &[(char, char)]) -> String {
    if s.is_empty() {
        return String::new();
    }
    let rotated: String = s.chars().map(|c| lookup(map, c)).collect();
    canon(&rotated)
}

fn lookup(map: &[(char, char)], c: char) -> char {
    map.iter().find(|(k, _)| *k == c).map(|(_, v)| *v).unwrap_or(c)
}

fn map_str(s: &str, map: &[(&str, &str)]) -> String {
    map.iter().find(|(k, _)| *k == s).map(|(_, v)| v.to_string()).unwrap_or_else(|| s.to_string())
}

const DIR_RIGHT: [(char, char); 4] = [('N', 'E'), ('E', 'S'), ('S', 'W'), ('W', 'N')];
const DIR_LEFT: [(char, char); 4] = [('E', 'N'), ('S', 'E'), ('W', 'S'), ('N', 'W')];
const DIR_REV: [(char, char); 4] = [('N', 'S'), ('S', 'N'), ('E', 'W'), ('W', 'E')];

const ARROW_RIGHT: [(char, char); 4] = [('\u{2191}', '\u{2192}'), ('\u{2192}', '\u{2193}'), ('\u{2193}', '\u{2190}'), ('\u{2190}', '\u{2191}')];
const ARROW_LEFT: [(char, char); 4] = [('\u{2192}', '\u{2191}'), ('\u{2193}', '\u{2192}'), ('\u{2190}', '\u{2193}'), ('\u{2191}', '\u{2190}')];
const ARROW_REV: [(char, char); 4] = [('\u{2191}', '\u{2193}'), ('\u{2193}', '\u{2191}'), ('\u{2192}', '\u{2190}'), ('\u{2190}', '\u{2192}')];

const TRACK_RIGHT: [(&str, &str); 7] = [
    ("NE", "SE"),
    ("SE", "SW"),
    ("SW", "NW"),
    ("NW", "NE"),
    ("HORIZONTAL", "VERTICAL"),
    ("VERTICAL", "HORIZONTAL"),
    ("SWITCH", "SWITCH"),
];
const TRACK_LEFT: [(&str, &str); 7] = [
    ("SE", "NE"),
    ("SW", "SE"),
    ("NW", "SW"),
    ("NE", "NW"),
    ("VERTICAL", "HORIZONTAL"),
    ("HORIZONTAL", "VERTICAL"),
    ("SWITCH", "SWITCH"),
];
const TRACK_REV: [(&str, &str); 7] = [
    ("NE", "SW"),
    ("SW", "NE"),
    ("SE", "NW"),
    ("NW", "SE"),
    ("HORIZONTAL", "HORIZONTAL"),
    ("VERTICAL", "VERTICAL"),
    ("SWITCH", "SWITCH"),
];

const ACTIVE_RIGHT: [(&str, &str); 6] = [
    ("NE", "SE"),
    ("SE", "SW"),
    ("SW", "NW"),
    ("NW", "NE"),
    ("HORIZONTAL", "VERTICAL"),
    ("VERTICAL", "HORIZONTAL"),
];
const ACTIVE_LEFT: [(&str, &str); 6] = [
    ("SE", "NE"),
    ("SW", "SE"),
    ("NW", "SW"),
    ("NE", "NW"),
    ("VERTICAL", "HORIZONTAL"),
    ("HORIZONTAL", "VERTICAL"),
];
const ACTIVE_REV: [(&str, &str); 6] = [
    ("NE", "SW"),
    ("SW", "NE"),
    ("SE", "NW"),
    ("NW", "SE"),
    ("HORIZONTAL", "HORIZONTAL"),
    ("VERTICAL", "VERTICAL"),
];

fn rotate_char(c: char, map: &[(char, char)]) -> char {
    map.iter().find(|(k, _)| *k == c).map(|(_, v)| *v).unwrap_or(c)
}

/// A tile placed on the map, with whatever modifier fields its category
/// calls for. Unset fields stay `None` regardless of tile type; which
/// fields are meaningful for a given `id` is determined by
/// `Cc2Tile::wired()`/`custom_tiles()`/etc., not by the struct shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct C2mElement {
    pub id: Cc2Tile,
    pub wires: Option<String>,
    pub wire_tunnels: Option<String>,
    pub char: Option<char>,
    pub direction: Option<String>,
    pub directions: Option<String>,
    pub color: Option<String>,
    pub gate: Option<String>,
    pub tracks: Option<Vec<String>>,
    pub active_track: Option<String>,
    pub initial_entry: Option<String>,
}

impl C2mElement {
    pub fn new(id: Cc2Tile) -> Self {
        C2mElement {
            id,
            wires: None,
            wire_tunnels: None,
            char: None,
            direction: None,
            directions: None,
            color: None,
            gate: None,
            tracks: None,
            active_track: None,
            initial_entry: None,
        }
    }

    /// Canonicalizes the direction-set fields (`wires`, `wire_tunnels`,
    /// `directions`) to `"NESWC"` order. Call after constructing or mutating
    /// one of these fields directly.
    pub fn canonicalize(&mut self) {
        self.wires = self.wires.as_deref().map(canon);
        self.wire_tunnels = self.wire_tunnels.as_deref().map(canon);
        self.directions = self.directions.as_deref().map(canon);
    }

    fn rotated(&self, dmap: &[(char, char)], amap: &[(char, char)], tmap: &[(&str, &str)], trmap: &[(&str, &str)], id_turn: fn(&Cc2Tile) -> Cc2Tile) -> C2mElement {
        C2mElement {
            id: id_turn(&self.id),
            wires: self.wires.as_deref().map(|s| rotate_set_string(s, dmap)),
            wire_tunnels: self.wire_tunnels.as_deref().map(|s| rotate_set_string(s, dmap)),
            char: self.char.map(|c| rotate_char(c, amap)),
            direction: self.direction.as_deref().map(|s| map_char_str(s, dmap)),
            directions: self.directions.as_deref().map(|s| rotate_compound(s, dmap)),
            color: self.color.clone(),
            gate: self.gate.clone(),
            tracks: self.tracks.as_ref().map(|ts| ts.iter().map(|t| map_str(t, tmap)).collect()),
            active_track: self.active_track.as_deref().map(|s| map_str(s, trmap)),
            initial_entry: self.initial_entry.as_deref().map(|s| map_char_str(s, dmap)),
        }
    }

    pub fn right(&self) -> C2mElement {
        self.rotated(&DIR_RIGHT, &ARROW_RIGHT, &TRACK_RIGHT, &ACTIVE_RIGHT, Cc2Tile::right)
    }

    pub fn left(&self) -> C2mElement {
        self.rotated(&DIR_LEFT, &ARROW_LEFT, &TRACK_LEFT, &ACTIVE_LEFT, Cc2Tile::left)
    }

    pub fn reverse(&self) -> C2mElement {
        self.rotated(&DIR_REV, &ARROW_REV, &TRACK_REV, &ACTIVE_REV, Cc2Tile::reverse)
    }
}

fn map_char_str(s: &str, map: &[(char, char)]) -> String {
    s.chars().map(|c| lookup(map, c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_rotates_single_direction() {
        let e = C2mElement {
            direction: Some("N".to_string()),
            ..C2mElement::new(Cc2Tile::Ant)
        };
        assert_eq!(e.right().direction.as_deref(), Some("E"));
        assert_eq!(e.right().id, Cc2Tile::Ant);
    }

    #[test]
    fn right_rotates_wire_set_and_canonicalizes() {
        let mut e = C2mElement::new(Cc2Tile::Floor);
        e.wires = Some("NS".to_string());
        let r = e.right();
        assert_eq!(r.wires.as_deref(), Some("EW"));
    }

    #[test]
    fn reverse_is_two_rights() {
        let e = C2mElement {
            direction: Some("N".to_string()),
            ..C2mElement::new(Cc2Tile::Ant)
        };
        assert_eq!(e.reverse().direction, e.right().right().direction);
    }

    #[test]
    fn canopy_suffix_survives_rotation() {
        let mut e = C2mElement::new(Cc2Tile::ThinWallCanopy);
        e.directions = Some("NC".to_string());
        let r = e.right();
        assert_eq!(r.directions.as_deref(), Some("EC"));
    }
}
