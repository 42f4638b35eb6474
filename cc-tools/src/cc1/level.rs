//! A full CC1 level: 32x32 grid plus metadata (title/password/etc.), trap
//! and cloner wiring, and the monster movement order list.

use super::cell::Cc1Cell;
use super::tile::Cc1Tile;
use serde::Serialize;

pub const WIDTH: usize = 32;
pub const HEIGHT: usize = 32;
pub const CELL_COUNT: usize = WIDTH * HEIGHT;
pub const MAX_MOVEMENT: usize = 127;

/// A grid position, accepted either as a linear index or an `(x, y)` pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Position {
    Index(usize),
    Xy(usize, usize),
}

impl Position {
    fn normalize(self) -> usize {
        match self {
            Position::Index(i) => i,
            Position::Xy(x, y) => y * WIDTH + x,
        }
    }
}

impl From<usize> for Position {
    fn from(i: usize) -> Self {
        Position::Index(i)
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Position::Xy(x, y)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Cc1Level {
    pub title: String,
    pub time: u16,
    pub chips: u16,
    pub hint: String,
    pub password: String,
    pub author: String,
    pub map: Vec<Cc1Cell>,
    /// Button-to-target wiring, `(button_pos, target_pos)`, in file order.
    /// A plain map can't preserve that order, and the DAT writer needs to
    /// reproduce the source file's record order byte for byte.
    pub traps: Vec<(usize, usize)>,
    pub cloners: Vec<(usize, usize)>,
    pub movement: Vec<usize>,
    /// DAT trailer tag order as seen by the parser, so the writer can
    /// replay it exactly. Empty for a level built up programmatically.
    pub field_order: Vec<u8>,
    /// DAT trailer tags the parser didn't recognise, carried opaquely so
    /// writing back reproduces them byte for byte.
    pub extra_fields: Vec<(u8, Vec<u8>)>,
}

impl Default for Cc1Level {
    fn default() -> Self {
        Cc1Level {
            title: "Untitled".to_string(),
            time: 0,
            chips: 0,
            hint: String::new(),
            password: String::new(),
            author: String::new(),
            map: vec![Cc1Cell::default(); CELL_COUNT],
            traps: Vec::new(),
            cloners: Vec::new(),
            movement: Vec::new(),
            field_order: Vec::new(),
            extra_fields: Vec::new(),
        }
    }
}

impl Cc1Level {
    pub fn at<P: Into<Position>>(&self, pos: P) -> &Cc1Cell {
        &self.map[pos.into().normalize()]
    }

    pub fn at_mut<P: Into<Position>>(&mut self, pos: P) -> &mut Cc1Cell {
        &mut self.map[pos.into().normalize()]
    }

    pub fn is_valid(&self) -> bool {
        self.map.iter().all(Cc1Cell::is_valid)
    }

    /// Wires a trap or cloner button to its target if the two cells carry
    /// the matching pair. The "effective" tile of a cell is its top layer
    /// unless that layer is a mob, in which case the bottom layer is used
    /// (a button/trap/cloner is never itself a mob, but it can sit under
    /// one).
    pub fn connect<P: Into<Position>>(&mut self, pos1: P, pos2: P) -> bool {
        let p1 = pos1.into().normalize();
        let p2 = pos2.into().normalize();
        let e1 = self.effective_tile(p1);
        let e2 = self.effective_tile(p2);

        if is_pair(e1, e2, Cc1Tile::TrapButton, Cc1Tile::Trap) {
            let (source, dest) = if e1 == Cc1Tile::Trap { (p2, p1) } else { (p1, p2) };
            upsert(&mut self.traps, source, dest);
            return true;
        }
        if is_pair(e1, e2, Cc1Tile::CloneButton, Cc1Tile::Cloner) {
            let (source, dest) = if e1 == Cc1Tile::Cloner { (p2, p1) } else { (p1, p2) };
            upsert(&mut self.cloners, source, dest);
            return true;
        }
        false
    }

    fn effective_tile(&self, pos: usize) -> Cc1Tile {
        let cell = &self.map[pos];
        if Cc1Tile::nonmobs().contains(&cell.top) {
            cell.top
        } else {
            cell.bottom
        }
    }

    /// Adds `elem` at `pos`, reconciling the movement list and pruning any
    /// trap/cloner wiring that pointed at a tile just removed by the add.
    pub fn add<P: Into<Position>>(&mut self, pos: P, elem: Cc1Tile) {
        let pos = pos.into().normalize();
        let old_cell = self.map[pos];
        let was_monster = old_cell.top.is_monster();

        self.map[pos].add(elem);
        let is_monster = self.map[pos].top.is_monster();

        if was_monster && !is_monster {
            self.movement.retain(|&p| p != pos);
        }
        if is_monster && !was_monster && self.movement.len() < MAX_MOVEMENT {
            self.movement.push(pos);
        }

        for code in [Cc1Tile::Trap, Cc1Tile::TrapButton, Cc1Tile::Cloner, Cc1Tile::CloneButton] {
            let was_removed = old_cell.contains(code) && !self.map[pos].contains(code);
            if was_removed {
                self.update_controls(pos, code);
            }
        }
    }

    /// Removes `elem` at `pos`, applying the same movement/wiring upkeep
    /// as `add`.
    pub fn remove<P: Into<Position>>(&mut self, pos: P, elem: Cc1Tile) {
        let pos = pos.into().normalize();
        let removed = self.map[pos].remove(elem);
        if removed {
            if elem.is_monster() {
                self.movement.retain(|&p| p != pos);
            }
            self.update_controls(pos, elem);
        }
    }

    /// Counts occurrences of `elem` across the whole map; a cell whose top
    /// and bottom both match a (different) element in `elems` counts both.
    pub fn count<I: IntoIterator<Item = Cc1Tile>>(&self, elems: I) -> usize {
        let set: std::collections::HashSet<Cc1Tile> = elems.into_iter().collect();
        self.map
            .iter()
            .map(|cell| (set.contains(&cell.top) as usize) + (set.contains(&cell.bottom) as usize))
            .sum()
    }

    fn update_controls(&mut self, pos: usize, elem: Cc1Tile) {
        match elem {
            Cc1Tile::Trap => self.traps.retain(|&(_, v)| v != pos),
            Cc1Tile::TrapButton => self.traps.retain(|&(k, _)| k != pos),
            Cc1Tile::Cloner => self.cloners.retain(|&(_, v)| v != pos),
            Cc1Tile::CloneButton => self.cloners.retain(|&(k, _)| k != pos),
            _ => {}
        }
    }
}

fn is_pair(e1: Cc1Tile, e2: Cc1Tile, a: Cc1Tile, b: Cc1Tile) -> bool {
    (e1 == a && e2 == b) || (e1 == b && e2 == a)
}

/// Updates `key`'s value in place if present (matching a Python `dict`'s
/// insertion-order-preserving assignment), otherwise appends a new entry.
fn upsert(entries: &mut Vec<(usize, usize)>, key: usize, value: usize) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Cc1Levelset {
    pub levels: Vec<Cc1Level>,
    /// The magic number the set was read with, so a round-tripped write
    /// reproduces it exactly (spec.md's open question on legacy magic
    /// numbers: preserve whatever the source had, default only when
    /// building a set from scratch).
    pub magic_number: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_monster_extends_movement_once() {
        let mut level = Cc1Level::default();
        level.add(5usize, Cc1Tile::TeethN);
        assert_eq!(level.movement, vec![5]);
        level.add(5usize, Cc1Tile::TeethE);
        assert_eq!(level.movement, vec![5]);
    }

    #[test]
    fn removing_monster_drops_it_from_movement() {
        let mut level = Cc1Level::default();
        level.add(5usize, Cc1Tile::TeethN);
        level.remove(5usize, Cc1Tile::TeethN);
        assert!(level.movement.is_empty());
    }

    #[test]
    fn movement_cap_is_silent_at_127() {
        let mut level = Cc1Level::default();
        for i in 0..130usize {
            level.add(i, Cc1Tile::TeethN);
        }
        assert_eq!(level.movement.len(), MAX_MOVEMENT);
    }

    #[test]
    fn connect_trap_button_and_trap() {
        let mut level = Cc1Level::default();
        level.at_mut(0usize).add(Cc1Tile::TrapButton);
        level.at_mut(1usize).add(Cc1Tile::Trap);
        assert!(level.connect(0usize, 1usize));
        assert_eq!(level.traps, vec![(0, 1)]);
    }

    #[test]
    fn connect_rejects_mismatched_pair() {
        let mut level = Cc1Level::default();
        level.at_mut(0usize).add(Cc1Tile::TrapButton);
        level.at_mut(1usize).add(Cc1Tile::Cloner);
        assert!(!level.connect(0usize, 1usize));
    }

    #[test]
    fn removing_trap_button_prunes_wiring() {
        let mut level = Cc1Level::default();
        level.at_mut(0usize).add(Cc1Tile::TrapButton);
        level.at_mut(1usize).add(Cc1Tile::Trap);
        level.connect(0usize, 1usize);
        level.remove(0usize, Cc1Tile::TrapButton);
        assert!(level.traps.is_empty());
    }

    #[test]
    fn removing_trap_target_prunes_by_value() {
        let mut level = Cc1Level::default();
        level.at_mut(0usize).add(Cc1Tile::TrapButton);
        level.at_mut(1usize).add(Cc1Tile::Trap);
        level.connect(0usize, 1usize);
        level.remove(1usize, Cc1Tile::Trap);
        assert!(level.traps.is_empty());
    }

    #[test]
    fn count_treats_stacked_layers_independently() {
        let mut level = Cc1Level::default();
        level.at_mut(0usize).add(Cc1Tile::Water);
        level.at_mut(0usize).add(Cc1Tile::PlayerN);
        assert_eq!(level.count([Cc1Tile::Water, Cc1Tile::PlayerN]), 2);
    }
}
