//! Whole-level dihedral transforms (rotate/flip) and bulk tile replacement.

use super::level::{Cc1Level, CELL_COUNT, HEIGHT, WIDTH};
use super::tile::Cc1Tile;
use std::collections::HashSet;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transform {
    Rotate90,
    Rotate180,
    Rotate270,
    FlipHorizontal,
    FlipVertical,
    FlipNeSw,
    FlipNwSe,
}

impl Transform {
    fn position_map(self, x: usize, y: usize) -> (usize, usize) {
        let (x, y) = (x as isize, y as isize);
        let n = WIDTH as isize - 1;
        let (nx, ny) = match self {
            Transform::Rotate90 => (n - y, x),
            Transform::Rotate180 => (n - x, n - y),
            Transform::Rotate270 => (y, n - x),
            Transform::FlipVertical => (x, n - y),
            Transform::FlipHorizontal => (n - x, y),
            Transform::FlipNeSw => (n - y, n - x),
            Transform::FlipNwSe => (y, x),
        };
        (nx as usize, ny as usize)
    }

    fn element_map(self, tile: Cc1Tile) -> Cc1Tile {
        match self {
            Transform::Rotate90 => tile.right(),
            Transform::Rotate180 => tile.reverse(),
            Transform::Rotate270 => tile.left(),
            Transform::FlipVertical => tile.flip_vertical(),
            Transform::FlipHorizontal => tile.flip_horizontal(),
            Transform::FlipNeSw => tile.flip_ne_sw(),
            Transform::FlipNwSe => tile.flip_nw_se(),
        }
    }

    fn position(self, pos: usize) -> usize {
        let (x, y) = (pos % WIDTH, pos / WIDTH);
        let (nx, ny) = self.position_map(x, y);
        ny * WIDTH + nx
    }
}

/// Applies a dihedral transform to a level, returning a new level. If the
/// level contains `PANEL_SE`, the transform is a no-op: asymmetric panels
/// cannot be expressed under the implemented rotation/reflection rules.
pub fn transform(level: &Cc1Level, op: Transform) -> Cc1Level {
    let mut new_level = level.clone();
    if level.count([Cc1Tile::PanelSe]) > 0 {
        return new_level;
    }

    for pos in 0..CELL_COUNT {
        let new_pos = op.position(pos);
        let cell = level.map[pos];
        new_level.map[new_pos] = super::cell::Cc1Cell::new(
            op.element_map(cell.top),
            op.element_map(cell.bottom),
        );
    }

    new_level.traps.clear();
    new_level.cloners.clear();
    new_level.movement.clear();
    for (&k, &v) in &level.traps {
        new_level.traps.insert(op.position(k), op.position(v));
    }
    for (&k, &v) in &level.cloners {
        new_level.cloners.insert(op.position(k), op.position(v));
    }
    for &p in &level.movement {
        new_level.movement.push(op.position(p));
    }
    new_level
}

pub fn rotate_90(level: &Cc1Level) -> Cc1Level {
    transform(level, Transform::Rotate90)
}
pub fn rotate_180(level: &Cc1Level) -> Cc1Level {
    transform(level, Transform::Rotate180)
}
pub fn rotate_270(level: &Cc1Level) -> Cc1Level {
    transform(level, Transform::Rotate270)
}
pub fn flip_horizontal(level: &Cc1Level) -> Cc1Level {
    transform(level, Transform::FlipHorizontal)
}
pub fn flip_vertical(level: &Cc1Level) -> Cc1Level {
    transform(level, Transform::FlipVertical)
}
pub fn flip_ne_sw(level: &Cc1Level) -> Cc1Level {
    transform(level, Transform::FlipNeSw)
}
pub fn flip_nw_se(level: &Cc1Level) -> Cc1Level {
    transform(level, Transform::FlipNwSe)
}

/// Replaces every occurrence of a tile in `old` (top or bottom layer) with
/// `new`. `FLOOR` is handled specially since `Cc1Cell::remove` never
/// reports it as removed: an empty top, or an empty bottom under a mob
/// top, counts as a `FLOOR` slot available for replacement.
pub fn replace<I: IntoIterator<Item = Cc1Tile>>(level: &Cc1Level, old: I, new: Cc1Tile) -> Cc1Level {
    let mut level = level.clone();
    let old: HashSet<Cc1Tile> = old.into_iter().collect();
    for pos in 0..CELL_COUNT {
        for &elem in &old {
            let here = &mut level.map[pos];
            if here.remove(elem) {
                here.add(new);
            } else if elem == Cc1Tile::Floor
                && (here.top == Cc1Tile::Floor || (here.top.is_mob() && here.bottom == Cc1Tile::Floor))
            {
                here.add(new);
            }
        }
    }
    level
}

/// Replaces mobs in `old` with their direction-matched counterpart in
/// `new`, one `replace` pass per cardinal direction. Exactly one `new`
/// tile must carry each direction suffix present among `old`'s tiles.
pub fn replace_mobs<I, J>(level: &Cc1Level, old: I, new: J) -> Cc1Level
where
    I: IntoIterator<Item = Cc1Tile>,
    J: IntoIterator<Item = Cc1Tile> + Clone,
{
    let old: Vec<Cc1Tile> = old.into_iter().collect();
    let mut level = level.clone();
    for d in ["N", "E", "S", "W"] {
        let targets: Vec<Cc1Tile> = old.iter().cloned().filter(|t| t.dirs() == d).collect();
        let replacements: Vec<Cc1Tile> = new.clone().into_iter().filter(|t| t.dirs() == d).collect();
        assert_eq!(
            replacements.len(),
            1,
            "expected exactly one replacement mob for direction {}, found {:?}",
            d,
            replacements
        );
        level = replace(&level, targets, replacements[0]);
    }
    level
}

/// Erases every tile (top and bottom) not present in `keep`.
pub fn keep<I: IntoIterator<Item = Cc1Tile>>(level: &Cc1Level, keep: I) -> Cc1Level {
    let mut level = level.clone();
    let keep: HashSet<Cc1Tile> = keep.into_iter().collect();
    for pos in 0..CELL_COUNT {
        let here = &mut level.map[pos];
        let present: HashSet<Cc1Tile> = [here.top, here.bottom].iter().cloned().collect();
        for item in present.difference(&keep) {
            here.remove(*item);
        }
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_360_is_identity() {
        let mut level = Cc1Level::default();
        level.add((3usize, 4usize), Cc1Tile::TeethN);
        level.add((10usize, 1usize), Cc1Tile::Wall);

        let mut rotated = level.clone();
        for _ in 0..4 {
            rotated = rotate_90(&rotated);
        }
        assert_eq!(rotated.map, level.map);
        assert_eq!(rotated.movement, level.movement);
    }

    #[test]
    fn rotate_90_moves_position_per_formula() {
        let mut level = Cc1Level::default();
        level.add((0usize, 0usize), Cc1Tile::Wall);
        let rotated = rotate_90(&level);
        // (x,y)=(0,0) -> (31-0, 0) = (31, 0)
        assert_eq!(rotated.at((31usize, 0usize)).top, Cc1Tile::Wall);
    }

    #[test]
    fn panel_se_blocks_transform() {
        let mut level = Cc1Level::default();
        level.add(0usize, Cc1Tile::PanelSe);
        let rotated = rotate_90(&level);
        assert_eq!(rotated.map, level.map);
    }

    #[test]
    fn replace_mobs_preserves_direction() {
        let mut level = Cc1Level::default();
        for i in 0..20usize {
            level.add(i, Cc1Tile::TeethN);
            level.add(i + 20, Cc1Tile::TeethE);
            level.add(i + 40, Cc1Tile::TeethS);
            level.add(i + 60, Cc1Tile::TeethW);
        }
        let replaced = replace_mobs(&level, Cc1Tile::teeth(), Cc1Tile::walkers());
        assert_eq!(replaced.count([Cc1Tile::WalkerN]), 20);
        assert_eq!(replaced.count([Cc1Tile::WalkerE]), 20);
        assert_eq!(replaced.count([Cc1Tile::WalkerS]), 20);
        assert_eq!(replaced.count([Cc1Tile::WalkerW]), 20);
        assert_eq!(replaced.count(Cc1Tile::teeth()), 0);
    }

    #[test]
    fn keep_erases_unlisted_tiles() {
        let mut level = Cc1Level::default();
        level.add(0usize, Cc1Tile::Wall);
        level.add(1usize, Cc1Tile::Water);
        let kept = keep(&level, [Cc1Tile::Wall]);
        assert_eq!(kept.at(0usize).top, Cc1Tile::Wall);
        assert_eq!(kept.at(1usize).top, Cc1Tile::Floor);
    }
}
