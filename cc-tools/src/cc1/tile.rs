//! The closed CC1 tile code enumeration (112 codes, 0-111) and its
//! direction/rotation/reflection algebra and named subsets.

use crate::error::{Error, Result};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize)]
#[repr(u8)]
pub enum Cc1Tile {
    Floor = 0,
    Wall = 1,
    Chip = 2,
    Water = 3,
    Fire = 4,
    InvWallPerm = 5,
    PanelN = 6,
    PanelW = 7,
    PanelS = 8,
    PanelE = 9,
    Block = 10,
    Dirt = 11,
    Ice = 12,
    ForceS = 13,
    CloneBlockN = 14,
    CloneBlockW = 15,
    CloneBlockS = 16,
    CloneBlockE = 17,
    ForceN = 18,
    ForceE = 19,
    ForceW = 20,
    Exit = 21,
    BlueDoor = 22,
    RedDoor = 23,
    GreenDoor = 24,
    YellowDoor = 25,
    IceSe = 26,
    IceSw = 27,
    IceNw = 28,
    IceNe = 29,
    BlueWallFake = 30,
    BlueWallReal = 31,
    NotUsed0 = 32,
    Thief = 33,
    Socket = 34,
    GreenButton = 35,
    CloneButton = 36,
    ToggleWall = 37,
    ToggleFloor = 38,
    TrapButton = 39,
    TankButton = 40,
    Teleport = 41,
    Bomb = 42,
    Trap = 43,
    InvWallApp = 44,
    Gravel = 45,
    PopUpWall = 46,
    Hint = 47,
    PanelSe = 48,
    Cloner = 49,
    ForceRandom = 50,
    DrownChip = 51,
    BurnedChip0 = 52,
    BurnedChip1 = 53,
    NotUsed1 = 54,
    NotUsed2 = 55,
    NotUsed3 = 56,
    ChipExit = 57,
    UnusedExit0 = 58,
    UnusedExit1 = 59,
    ChipSwimmingN = 60,
    ChipSwimmingW = 61,
    ChipSwimmingS = 62,
    ChipSwimmingE = 63,
    AntN = 64,
    AntW = 65,
    AntS = 66,
    AntE = 67,
    FireballN = 68,
    FireballW = 69,
    FireballS = 70,
    FireballE = 71,
    BallN = 72,
    BallW = 73,
    BallS = 74,
    BallE = 75,
    TankN = 76,
    TankW = 77,
    TankS = 78,
    TankE = 79,
    GliderN = 80,
    GliderW = 81,
    GliderS = 82,
    GliderE = 83,
    TeethN = 84,
    TeethW = 85,
    TeethS = 86,
    TeethE = 87,
    WalkerN = 88,
    WalkerW = 89,
    WalkerS = 90,
    WalkerE = 91,
    BlobN = 92,
    BlobW = 93,
    BlobS = 94,
    BlobE = 95,
    ParameciumN = 96,
    ParameciumW = 97,
    ParameciumS = 98,
    ParameciumE = 99,
    BlueKey = 100,
    RedKey = 101,
    GreenKey = 102,
    YellowKey = 103,
    Flippers = 104,
    FireBoots = 105,
    Skates = 106,
    SuctionBoots = 107,
    PlayerN = 108,
    PlayerW = 109,
    PlayerS = 110,
    PlayerE = 111,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Dir {
    N,
    E,
    S,
    W,
}

impl Dir {
    fn right(self) -> Dir {
        match self {
            Dir::N => Dir::E,
            Dir::E => Dir::S,
            Dir::S => Dir::W,
            Dir::W => Dir::N,
        }
    }
    fn flip_horizontal(self) -> Dir {
        match self {
            Dir::E => Dir::W,
            Dir::W => Dir::E,
            other => other,
        }
    }
    fn flip_vertical(self) -> Dir {
        match self {
            Dir::N => Dir::S,
            Dir::S => Dir::N,
            other => other,
        }
    }
    fn flip_ne_sw(self) -> Dir {
        match self {
            Dir::N => Dir::E,
            Dir::E => Dir::N,
            Dir::S => Dir::W,
            Dir::W => Dir::S,
        }
    }
    fn flip_nw_se(self) -> Dir {
        match self {
            Dir::N => Dir::W,
            Dir::W => Dir::N,
            Dir::S => Dir::E,
            Dir::E => Dir::S,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Diag {
    Ne,
    Se,
    Sw,
    Nw,
}

impl Diag {
    /// NE -> SE -> SW -> NW -> NE (clockwise), matching the "build the
    /// compound suffix in reverse" rule applied to a two-letter suffix.
    fn right(self) -> Diag {
        match self {
            Diag::Ne => Diag::Se,
            Diag::Se => Diag::Sw,
            Diag::Sw => Diag::Nw,
            Diag::Nw => Diag::Ne,
        }
    }
    fn flip_horizontal(self) -> Diag {
        match self {
            Diag::Ne => Diag::Nw,
            Diag::Nw => Diag::Ne,
            Diag::Se => Diag::Sw,
            Diag::Sw => Diag::Se,
        }
    }
    fn flip_vertical(self) -> Diag {
        match self {
            Diag::Ne => Diag::Se,
            Diag::Se => Diag::Ne,
            Diag::Nw => Diag::Sw,
            Diag::Sw => Diag::Nw,
        }
    }
    fn flip_ne_sw(self) -> Diag {
        match self {
            Diag::Se => Diag::Sw,
            Diag::Sw => Diag::Se,
            other => other,
        }
    }
    fn flip_nw_se(self) -> Diag {
        match self {
            Diag::Ne => Diag::Nw,
            Diag::Nw => Diag::Ne,
            other => other,
        }
    }
}

/// A tile family that carries a single cardinal direction suffix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Family {
    Panel,
    CloneBlock,
    Force,
    ChipSwimming,
    Ant,
    Fireball,
    Ball,
    Tank,
    Glider,
    Teeth,
    Walker,
    Blob,
    Parameciums,
    Player,
}

impl Cc1Tile {
    fn family_dir(&self) -> Option<(Family, Dir)> {
        use Cc1Tile::*;
        use Dir::*;
        use Family::*;
        Some(match self {
            PanelN => (Panel, N),
            PanelE => (Panel, E),
            PanelS => (Panel, S),
            PanelW => (Panel, W),
            CloneBlockN => (CloneBlock, N),
            CloneBlockE => (CloneBlock, E),
            CloneBlockS => (CloneBlock, S),
            CloneBlockW => (CloneBlock, W),
            ForceN => (Force, N),
            ForceE => (Force, E),
            ForceS => (Force, S),
            ForceW => (Force, W),
            ChipSwimmingN => (ChipSwimming, N),
            ChipSwimmingE => (ChipSwimming, E),
            ChipSwimmingS => (ChipSwimming, S),
            ChipSwimmingW => (ChipSwimming, W),
            AntN => (Ant, N),
            AntE => (Ant, E),
            AntS => (Ant, S),
            AntW => (Ant, W),
            FireballN => (Fireball, N),
            FireballE => (Fireball, E),
            FireballS => (Fireball, S),
            FireballW => (Fireball, W),
            BallN => (Ball, N),
            BallE => (Ball, E),
            BallS => (Ball, S),
            BallW => (Ball, W),
            TankN => (Tank, N),
            TankE => (Tank, E),
            TankS => (Tank, S),
            TankW => (Tank, W),
            GliderN => (Glider, N),
            GliderE => (Glider, E),
            GliderS => (Glider, S),
            GliderW => (Glider, W),
            TeethN => (Teeth, N),
            TeethE => (Teeth, E),
            TeethS => (Teeth, S),
            TeethW => (Teeth, W),
            WalkerN => (Walker, N),
            WalkerE => (Walker, E),
            WalkerS => (Walker, S),
            WalkerW => (Walker, W),
            BlobN => (Blob, N),
            BlobE => (Blob, E),
            BlobS => (Blob, S),
            BlobW => (Blob, W),
            ParameciumN => (Parameciums, N),
            ParameciumE => (Parameciums, E),
            ParameciumS => (Parameciums, S),
            ParameciumW => (Parameciums, W),
            PlayerN => (Player, N),
            PlayerE => (Player, E),
            PlayerS => (Player, S),
            PlayerW => (Player, W),
            _ => return None,
        })
    }

    fn from_family_dir(family: Family, dir: Dir) -> Cc1Tile {
        use Cc1Tile::*;
        use Dir::*;
        use Family::*;
        match (family, dir) {
            (Panel, N) => PanelN,
            (Panel, E) => PanelE,
            (Panel, S) => PanelS,
            (Panel, W) => PanelW,
            (CloneBlock, N) => CloneBlockN,
            (CloneBlock, E) => CloneBlockE,
            (CloneBlock, S) => CloneBlockS,
            (CloneBlock, W) => CloneBlockW,
            (Force, N) => ForceN,
            (Force, E) => ForceE,
            (Force, S) => ForceS,
            (Force, W) => ForceW,
            (ChipSwimming, N) => ChipSwimmingN,
            (ChipSwimming, E) => ChipSwimmingE,
            (ChipSwimming, S) => ChipSwimmingS,
            (ChipSwimming, W) => ChipSwimmingW,
            (Ant, N) => AntN,
            (Ant, E) => AntE,
            (Ant, S) => AntS,
            (Ant, W) => AntW,
            (Fireball, N) => FireballN,
            (Fireball, E) => FireballE,
            (Fireball, S) => FireballS,
            (Fireball, W) => FireballW,
            (Ball, N) => BallN,
            (Ball, E) => BallE,
            (Ball, S) => BallS,
            (Ball, W) => BallW,
            (Tank, N) => TankN,
            (Tank, E) => TankE,
            (Tank, S) => TankS,
            (Tank, W) => TankW,
            (Glider, N) => GliderN,
            (Glider, E) => GliderE,
            (Glider, S) => GliderS,
            (Glider, W) => GliderW,
            (Teeth, N) => TeethN,
            (Teeth, E) => TeethE,
            (Teeth, S) => TeethS,
            (Teeth, W) => TeethW,
            (Walker, N) => WalkerN,
            (Walker, E) => WalkerE,
            (Walker, S) => WalkerS,
            (Walker, W) => WalkerW,
            (Blob, N) => BlobN,
            (Blob, E) => BlobE,
            (Blob, S) => BlobS,
            (Blob, W) => BlobW,
            (Parameciums, N) => ParameciumN,
            (Parameciums, E) => ParameciumE,
            (Parameciums, S) => ParameciumS,
            (Parameciums, W) => ParameciumW,
            (Player, N) => PlayerN,
            (Player, E) => PlayerE,
            (Player, S) => PlayerS,
            (Player, W) => PlayerW,
        }
    }

    fn diag(&self) -> Option<Diag> {
        match self {
            Cc1Tile::IceNe => Some(Diag::Ne),
            Cc1Tile::IceSe => Some(Diag::Se),
            Cc1Tile::IceSw => Some(Diag::Sw),
            Cc1Tile::IceNw => Some(Diag::Nw),
            _ => None,
        }
    }

    fn from_diag(diag: Diag) -> Cc1Tile {
        match diag {
            Diag::Ne => Cc1Tile::IceNe,
            Diag::Se => Cc1Tile::IceSe,
            Diag::Sw => Cc1Tile::IceSw,
            Diag::Nw => Cc1Tile::IceNw,
        }
    }

    /// The cardinal/intercardinal direction suffix carried by this tile's
    /// name, or "" for a directionless tile. `FORCE_RANDOM`, `ICE`,
    /// `PANEL_SE` and `BLOCK` are directionless by definition even though
    /// `PANEL_SE`'s name would otherwise suggest a suffix.
    pub fn dirs(&self) -> &'static str {
        match self {
            Cc1Tile::PanelN | Cc1Tile::CloneBlockN | Cc1Tile::ForceN | Cc1Tile::ChipSwimmingN
            | Cc1Tile::AntN | Cc1Tile::FireballN | Cc1Tile::BallN | Cc1Tile::TankN
            | Cc1Tile::GliderN | Cc1Tile::TeethN | Cc1Tile::WalkerN | Cc1Tile::BlobN
            | Cc1Tile::ParameciumN | Cc1Tile::PlayerN => "N",
            Cc1Tile::PanelE | Cc1Tile::CloneBlockE | Cc1Tile::ForceE | Cc1Tile::ChipSwimmingE
            | Cc1Tile::AntE | Cc1Tile::FireballE | Cc1Tile::BallE | Cc1Tile::TankE
            | Cc1Tile::GliderE | Cc1Tile::TeethE | Cc1Tile::WalkerE | Cc1Tile::BlobE
            | Cc1Tile::ParameciumE | Cc1Tile::PlayerE => "E",
            Cc1Tile::PanelS | Cc1Tile::CloneBlockS | Cc1Tile::ForceS | Cc1Tile::ChipSwimmingS
            | Cc1Tile::AntS | Cc1Tile::FireballS | Cc1Tile::BallS | Cc1Tile::TankS
            | Cc1Tile::GliderS | Cc1Tile::TeethS | Cc1Tile::WalkerS | Cc1Tile::BlobS
            | Cc1Tile::ParameciumS | Cc1Tile::PlayerS => "S",
            Cc1Tile::PanelW | Cc1Tile::CloneBlockW | Cc1Tile::ForceW | Cc1Tile::ChipSwimmingW
            | Cc1Tile::AntW | Cc1Tile::FireballW | Cc1Tile::BallW | Cc1Tile::TankW
            | Cc1Tile::GliderW | Cc1Tile::TeethW | Cc1Tile::WalkerW | Cc1Tile::BlobW
            | Cc1Tile::ParameciumW | Cc1Tile::PlayerW => "W",
            Cc1Tile::IceNe => "NE",
            Cc1Tile::IceSe => "SE",
            Cc1Tile::IceSw => "SW",
            Cc1Tile::IceNw => "NW",
            _ => "",
        }
    }

    /// Returns the tile with the same family but the direction(s) replaced.
    /// `dirs` must have the same length as `self.dirs()`.
    pub fn with_dirs(&self, dirs: &str) -> Result<Cc1Tile> {
        if dirs.len() != self.dirs().len() {
            return Err(Error::InvalidModifier(format!(
                "direction length mismatch: {:?} has dirs {:?}, requested {:?}",
                self, self.dirs(), dirs
            )));
        }
        if dirs.is_empty() {
            return Ok(*self);
        }
        if let Some((family, _)) = self.family_dir() {
            let dir = match dirs {
                "N" => Dir::N,
                "E" => Dir::E,
                "S" => Dir::S,
                "W" => Dir::W,
                _ => {
                    return Err(Error::InvalidModifier(format!(
                        "illegal single direction: {}",
                        dirs
                    )))
                }
            };
            return Ok(Cc1Tile::from_family_dir(family, dir));
        }
        if self.diag().is_some() {
            let diag = match dirs {
                "NE" => Diag::Ne,
                "SE" => Diag::Se,
                "SW" => Diag::Sw,
                "NW" => Diag::Nw,
                _ => {
                    return Err(Error::InvalidModifier(format!(
                        "illegal diagonal direction: {}",
                        dirs
                    )))
                }
            };
            return Ok(Cc1Tile::from_diag(diag));
        }
        Ok(*self)
    }

    fn is_rotation_exempt(&self) -> bool {
        matches!(self, Cc1Tile::PanelSe | Cc1Tile::ForceRandom)
    }

    /// Rotates the tile's direction 90 degrees clockwise. Directionless
    /// tiles, and the always-directionless special cases, are unchanged.
    pub fn right(&self) -> Cc1Tile {
        if self.is_rotation_exempt() {
            return *self;
        }
        if let Some((family, dir)) = self.family_dir() {
            return Cc1Tile::from_family_dir(family, dir.right());
        }
        if let Some(diag) = self.diag() {
            return Cc1Tile::from_diag(diag.right());
        }
        *self
    }

    pub fn reverse(&self) -> Cc1Tile {
        self.right().right()
    }

    pub fn left(&self) -> Cc1Tile {
        self.right().right().right()
    }

    pub fn flip_horizontal(&self) -> Cc1Tile {
        if self.is_rotation_exempt() {
            return *self;
        }
        if let Some((family, dir)) = self.family_dir() {
            return Cc1Tile::from_family_dir(family, dir.flip_horizontal());
        }
        if let Some(diag) = self.diag() {
            return Cc1Tile::from_diag(diag.flip_horizontal());
        }
        *self
    }

    pub fn flip_vertical(&self) -> Cc1Tile {
        if self.is_rotation_exempt() {
            return *self;
        }
        if let Some((family, dir)) = self.family_dir() {
            return Cc1Tile::from_family_dir(family, dir.flip_vertical());
        }
        if let Some(diag) = self.diag() {
            return Cc1Tile::from_diag(diag.flip_vertical());
        }
        *self
    }

    pub fn flip_ne_sw(&self) -> Cc1Tile {
        if self.is_rotation_exempt() {
            return *self;
        }
        if let Some((family, dir)) = self.family_dir() {
            return Cc1Tile::from_family_dir(family, dir.flip_ne_sw());
        }
        if let Some(diag) = self.diag() {
            return Cc1Tile::from_diag(diag.flip_ne_sw());
        }
        *self
    }

    pub fn flip_nw_se(&self) -> Cc1Tile {
        if self.is_rotation_exempt() {
            return *self;
        }
        if let Some((family, dir)) = self.family_dir() {
            return Cc1Tile::from_family_dir(family, dir.flip_nw_se());
        }
        if let Some(diag) = self.diag() {
            return Cc1Tile::from_diag(diag.flip_nw_se());
        }
        *self
    }

    pub fn from_code(code: u8) -> Result<Cc1Tile> {
        Cc1Tile::from_u8(code).ok_or(Error::InvalidTileCode(code as u16))
    }

    pub fn code(&self) -> u8 {
        num_traits::ToPrimitive::to_u8(self).unwrap()
    }

    pub fn all() -> HashSet<Cc1Tile> {
        (0..=111u8).map(|c| Cc1Tile::from_u8(c).unwrap()).collect()
    }

    fn compass(family: Family) -> HashSet<Cc1Tile> {
        [Dir::N, Dir::E, Dir::S, Dir::W]
            .iter()
            .map(|&d| Cc1Tile::from_family_dir(family, d))
            .collect()
    }

    pub fn invalid() -> HashSet<Cc1Tile> {
        use Cc1Tile::*;
        [
            NotUsed0, DrownChip, BurnedChip0, BurnedChip1, NotUsed1, NotUsed2, NotUsed3, ChipExit,
            UnusedExit0, UnusedExit1, ChipSwimmingN, ChipSwimmingE, ChipSwimmingS, ChipSwimmingW,
        ]
        .iter()
        .cloned()
        .collect()
    }

    pub fn valid() -> HashSet<Cc1Tile> {
        Cc1Tile::all().difference(&Cc1Tile::invalid()).cloned().collect()
    }

    pub fn ice() -> HashSet<Cc1Tile> {
        let mut s: HashSet<Cc1Tile> = [Cc1Tile::IceNe, Cc1Tile::IceNw, Cc1Tile::IceSe, Cc1Tile::IceSw]
            .iter()
            .cloned()
            .collect();
        s.insert(Cc1Tile::Ice);
        s
    }

    pub fn forces() -> HashSet<Cc1Tile> {
        let mut s = Cc1Tile::compass(Family::Force);
        s.insert(Cc1Tile::ForceRandom);
        s
    }

    pub fn walls() -> HashSet<Cc1Tile> {
        [Cc1Tile::Wall, Cc1Tile::InvWallPerm, Cc1Tile::InvWallApp, Cc1Tile::BlueWallReal]
            .iter()
            .cloned()
            .collect()
    }

    pub fn panels() -> HashSet<Cc1Tile> {
        let mut s = Cc1Tile::compass(Family::Panel);
        s.insert(Cc1Tile::PanelSe);
        s
    }

    pub fn clone_blocks() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::CloneBlock)
    }

    pub fn blocks() -> HashSet<Cc1Tile> {
        let mut s = Cc1Tile::clone_blocks();
        s.insert(Cc1Tile::Block);
        s
    }

    pub fn players() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Player)
    }

    pub fn ants() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Ant)
    }

    pub fn paramecia() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Parameciums)
    }

    pub fn gliders() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Glider)
    }

    pub fn fireballs() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Fireball)
    }

    pub fn tanks() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Tank)
    }

    pub fn balls() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Ball)
    }

    pub fn walkers() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Walker)
    }

    pub fn teeth() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Teeth)
    }

    pub fn blobs() -> HashSet<Cc1Tile> {
        Cc1Tile::compass(Family::Blob)
    }

    pub fn monsters() -> HashSet<Cc1Tile> {
        Cc1Tile::gliders()
            .union(&Cc1Tile::ants())
            .cloned()
            .collect::<HashSet<_>>()
            .union(&Cc1Tile::paramecia())
            .cloned()
            .collect::<HashSet<_>>()
            .union(&Cc1Tile::fireballs())
            .cloned()
            .collect::<HashSet<_>>()
            .union(&Cc1Tile::teeth())
            .cloned()
            .collect::<HashSet<_>>()
            .union(&Cc1Tile::tanks())
            .cloned()
            .collect::<HashSet<_>>()
            .union(&Cc1Tile::blobs())
            .cloned()
            .collect::<HashSet<_>>()
            .union(&Cc1Tile::walkers())
            .cloned()
            .collect::<HashSet<_>>()
            .union(&Cc1Tile::balls())
            .cloned()
            .collect()
    }

    pub fn mobs() -> HashSet<Cc1Tile> {
        Cc1Tile::monsters()
            .union(&Cc1Tile::blocks())
            .cloned()
            .collect::<HashSet<_>>()
            .union(&Cc1Tile::players())
            .cloned()
            .collect()
    }

    pub fn nonmobs() -> HashSet<Cc1Tile> {
        Cc1Tile::all().difference(&Cc1Tile::mobs()).cloned().collect()
    }

    pub fn doors() -> HashSet<Cc1Tile> {
        [Cc1Tile::RedDoor, Cc1Tile::GreenDoor, Cc1Tile::YellowDoor, Cc1Tile::BlueDoor]
            .iter()
            .cloned()
            .collect()
    }

    pub fn keys() -> HashSet<Cc1Tile> {
        [Cc1Tile::RedKey, Cc1Tile::GreenKey, Cc1Tile::YellowKey, Cc1Tile::BlueKey]
            .iter()
            .cloned()
            .collect()
    }

    pub fn boots() -> HashSet<Cc1Tile> {
        [Cc1Tile::Skates, Cc1Tile::SuctionBoots, Cc1Tile::FireBoots, Cc1Tile::Flippers]
            .iter()
            .cloned()
            .collect()
    }

    pub fn pickups() -> HashSet<Cc1Tile> {
        let mut s = Cc1Tile::boots().union(&Cc1Tile::keys()).cloned().collect::<HashSet<_>>();
        s.insert(Cc1Tile::Chip);
        s
    }

    pub fn buttons() -> HashSet<Cc1Tile> {
        [Cc1Tile::GreenButton, Cc1Tile::TrapButton, Cc1Tile::CloneButton, Cc1Tile::TankButton]
            .iter()
            .cloned()
            .collect()
    }

    pub fn toggles() -> HashSet<Cc1Tile> {
        [Cc1Tile::ToggleWall, Cc1Tile::ToggleFloor].iter().cloned().collect()
    }

    pub fn is_mob(&self) -> bool {
        Cc1Tile::mobs().contains(self)
    }

    pub fn is_monster(&self) -> bool {
        Cc1Tile::monsters().contains(self)
    }

    pub fn is_invalid(&self) -> bool {
        Cc1Tile::invalid().contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_rotates_compound_suffix_in_reverse() {
        assert_eq!(Cc1Tile::IceNe.right(), Cc1Tile::IceSe);
        assert_eq!(Cc1Tile::IceSe.right(), Cc1Tile::IceSw);
        assert_eq!(Cc1Tile::IceSw.right(), Cc1Tile::IceNw);
        assert_eq!(Cc1Tile::IceNw.right(), Cc1Tile::IceNe);
    }

    #[test]
    fn right_four_times_is_identity() {
        for t in Cc1Tile::all() {
            assert_eq!(t.right().right().right().right(), t);
        }
    }

    #[test]
    fn reverse_is_two_rights() {
        for t in Cc1Tile::all() {
            assert_eq!(t.reverse(), t.right().right());
        }
    }

    #[test]
    fn panel_se_and_force_random_are_rotation_exempt() {
        assert_eq!(Cc1Tile::PanelSe.right(), Cc1Tile::PanelSe);
        assert_eq!(Cc1Tile::ForceRandom.right(), Cc1Tile::ForceRandom);
    }

    #[test]
    fn flips_are_involutions() {
        for t in Cc1Tile::valid() {
            assert_eq!(t.flip_horizontal().flip_horizontal(), t);
            assert_eq!(t.flip_vertical().flip_vertical(), t);
            assert_eq!(t.flip_ne_sw().flip_ne_sw(), t);
            assert_eq!(t.flip_nw_se().flip_nw_se(), t);
        }
    }

    #[test]
    fn monsters_partition_mobs_with_blocks_and_players() {
        let mobs = Cc1Tile::mobs();
        assert!(Cc1Tile::monsters().is_subset(&mobs));
        assert!(Cc1Tile::blocks().is_subset(&mobs));
        assert!(Cc1Tile::players().is_subset(&mobs));
        assert_eq!(mobs.len(), Cc1Tile::monsters().len() + Cc1Tile::blocks().len() + Cc1Tile::players().len());
    }

    #[test]
    fn invalid_has_fourteen_codes() {
        assert_eq!(Cc1Tile::invalid().len(), 14);
    }

    #[test]
    fn from_code_rejects_out_of_range() {
        assert!(Cc1Tile::from_code(112).is_err());
        assert!(Cc1Tile::from_code(111).is_ok());
    }
}
