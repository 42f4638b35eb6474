//! A CC1 cell: two stacked tile layers, `top` and `bottom`.

use super::tile::Cc1Tile;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Cc1Cell {
    pub top: Cc1Tile,
    pub bottom: Cc1Tile,
}

impl Default for Cc1Cell {
    fn default() -> Self {
        Cc1Cell {
            top: Cc1Tile::Floor,
            bottom: Cc1Tile::Floor,
        }
    }
}

impl Cc1Cell {
    pub fn new(top: Cc1Tile, bottom: Cc1Tile) -> Self {
        Cc1Cell { top, bottom }
    }

    /// No invariant (§3) is violated: bottom is non-floor only under a mob
    /// top, neither layer is invalid, bottom is never a mob.
    pub fn is_valid(&self) -> bool {
        if self.bottom != Cc1Tile::Floor && !self.top.is_mob() {
            return false;
        }
        if self.top.is_invalid() || self.bottom.is_invalid() {
            return false;
        }
        if self.bottom.is_mob() {
            return false;
        }
        true
    }

    pub fn contains(&self, elem: Cc1Tile) -> bool {
        self.top == elem || self.bottom == elem
    }

    /// Places `elem`, promoting any terrain currently on top to `bottom`
    /// when a mob lands on it, or replacing the existing mob outright.
    pub fn add(&mut self, elem: Cc1Tile) {
        if elem.is_mob() {
            if self.top.is_mob() {
                self.top = elem;
            } else {
                self.bottom = self.top;
                self.top = elem;
            }
        } else if self.top.is_mob() {
            self.bottom = elem;
        } else {
            self.top = elem;
        }
    }

    /// Removes `elem` if present, returning whether the cell changed.
    /// `FLOOR` is never removed (it is the default, not a stored value).
    pub fn remove(&mut self, elem: Cc1Tile) -> bool {
        if elem == Cc1Tile::Floor {
            return false;
        }
        if self.top == elem {
            self.top = self.bottom;
            self.bottom = Cc1Tile::Floor;
            true
        } else if self.bottom == elem {
            self.bottom = Cc1Tile::Floor;
            true
        } else {
            false
        }
    }

    pub fn erase(&mut self) {
        self.top = Cc1Tile::Floor;
        self.bottom = Cc1Tile::Floor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_floor_and_valid() {
        let c = Cc1Cell::default();
        assert_eq!(c.top, Cc1Tile::Floor);
        assert_eq!(c.bottom, Cc1Tile::Floor);
        assert!(c.is_valid());
    }

    #[test]
    fn add_mob_over_terrain_promotes_terrain_to_bottom() {
        let mut c = Cc1Cell::new(Cc1Tile::Water, Cc1Tile::Floor);
        c.add(Cc1Tile::PlayerN);
        assert_eq!(c.top, Cc1Tile::PlayerN);
        assert_eq!(c.bottom, Cc1Tile::Water);
        assert!(c.is_valid());
    }

    #[test]
    fn add_mob_over_mob_replaces_top() {
        let mut c = Cc1Cell::new(Cc1Tile::TeethN, Cc1Tile::Water);
        c.add(Cc1Tile::TeethE);
        assert_eq!(c.top, Cc1Tile::TeethE);
        assert_eq!(c.bottom, Cc1Tile::Water);
    }

    #[test]
    fn add_remove_mob_round_trips_cell() {
        let original = Cc1Cell::new(Cc1Tile::Water, Cc1Tile::Floor);
        let mut c = original;
        c.add(Cc1Tile::PlayerN);
        assert!(c.remove(Cc1Tile::PlayerN));
        assert_eq!(c, original);
    }

    #[test]
    fn floor_is_never_removed() {
        let mut c = Cc1Cell::default();
        assert!(!c.remove(Cc1Tile::Floor));
    }

    #[test]
    fn removing_absent_tile_is_a_no_op() {
        let mut c = Cc1Cell::new(Cc1Tile::Wall, Cc1Tile::Floor);
        assert!(!c.remove(Cc1Tile::Water));
        assert_eq!(c.top, Cc1Tile::Wall);
    }

    #[test]
    fn erase_resets_both_layers() {
        let mut c = Cc1Cell::new(Cc1Tile::PlayerN, Cc1Tile::Water);
        c.erase();
        assert_eq!(c, Cc1Cell::default());
    }
}
