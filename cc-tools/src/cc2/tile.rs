//! The CC2 tile set: every terrain, mob, and item a `.c2m` map cell can
//! hold, plus the direction algebra used by mobs and a handful of
//! directional terrain tiles.

use num_derive::FromPrimitive;
use serde::Serialize;
use std::collections::HashSet;

/// One CC2 tile code. Values match the byte the `.c2m` map format uses, so
/// `Cc2Tile::Floor as u8 == 0x01`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromPrimitive, Serialize)]
#[repr(u8)]
pub enum Cc2Tile {
    Floor = 0x01,
    Wall = 0x02,
    Ice = 0x03,
    IceSw = 0x04,
    IceNw = 0x05,
    IceNe = 0x06,
    IceSe = 0x07,
    Water = 0x08,
    Fire = 0x09,
    ForceN = 0x0A,
    ForceE = 0x0B,
    ForceS = 0x0C,
    ForceW = 0x0D,
    GreenToggleWall = 0x0E,
    GreenToggleFloor = 0x0F,
    RedTeleport = 0x10,
    BlueTeleport = 0x11,
    YellowTeleport = 0x12,
    GreenTeleport = 0x13,
    Exit = 0x14,
    Slime = 0x15,
    Chip = 0x16,
    DirtBlock = 0x17,
    Walker = 0x18,
    Glider = 0x19,
    IceBlock = 0x1A,
    ThinWallS = 0x1B,
    ThinWallE = 0x1C,
    ThinWallSe = 0x1D,
    Gravel = 0x1E,
    GreenButton = 0x1F,
    BlueButton = 0x20,
    BlueTank = 0x21,
    RedDoor = 0x22,
    BlueDoor = 0x23,
    YellowDoor = 0x24,
    GreenDoor = 0x25,
    RedKey = 0x26,
    BlueKey = 0x27,
    YellowKey = 0x28,
    GreenKey = 0x29,
    IcChip = 0x2A,
    ExtraIcChip = 0x2B,
    ChipSocket = 0x2C,
    PopupWall = 0x2D,
    AppearingWall = 0x2E,
    InvisibleWall = 0x2F,
    SolidBlueWall = 0x30,
    FalseBlueWall = 0x31,
    Dirt = 0x32,
    Ant = 0x33,
    Centipede = 0x34,
    Ball = 0x35,
    Blob = 0x36,
    RedTeeth = 0x37,
    Fireball = 0x38,
    RedButton = 0x39,
    BrownButton = 0x3A,
    Cleats = 0x3B,
    SuctionBoots = 0x3C,
    FireBoots = 0x3D,
    Flippers = 0x3E,
    ToolThief = 0x3F,
    Bomb = 0x40,
    OpenTrap = 0x41,
    Trap = 0x42,
    CloneMachineOld = 0x43,
    CloneMachine = 0x44,
    Clue = 0x45,
    ForceRandom = 0x46,
    GrayButton = 0x47,
    SwivelDoorSw = 0x48,
    SwivelDoorNw = 0x49,
    SwivelDoorNe = 0x4A,
    SwivelDoorSe = 0x4B,
    TimeBonus = 0x4C,
    Stopwatch = 0x4D,
    Transmogrifier = 0x4E,
    RailroadTrack = 0x4F,
    SteelWall = 0x50,
    Tnt = 0x51,
    Helmet = 0x52,
    Unused53 = 0x53,
    Unused54 = 0x54,
    Unused55 = 0x55,
    Melinda = 0x56,
    BlueTeeth = 0x57,
    ExplosionAnimation = 0x58,
    HikingBoots = 0x59,
    MaleOnlySign = 0x5A,
    FemaleOnlySign = 0x5B,
    LogicGate = 0x5C,
    Unused5D = 0x5D,
    PinkButton = 0x5E,
    FlameJetOff = 0x5F,
    FlameJetOn = 0x60,
    OrangeButton = 0x61,
    LightningBolt = 0x62,
    YellowTank = 0x63,
    YellowTankButton = 0x64,
    MirrorChip = 0x65,
    MirrorMelinda = 0x66,
    Unused67 = 0x67,
    BowlingBall = 0x68,
    Rover = 0x69,
    TimePenalty = 0x6A,
    CustomFloor = 0x6B,
    Unused6C = 0x6C,
    ThinWallCanopy = 0x6D,
    Unused6E = 0x6E,
    RailroadSign = 0x6F,
    CustomWall = 0x70,
    LetterTileSpace = 0x71,
    PurpleToggleFloor = 0x72,
    PurpleToggleWall = 0x73,
    Unused74 = 0x74,
    Unused75 = 0x75,
    Modifier8Bit = 0x76,
    Modifier16Bit = 0x77,
    Modifier32Bit = 0x78,
    Unused79 = 0x79,
    Flag10 = 0x7A,
    Flag100 = 0x7B,
    Flag1000 = 0x7C,
    SolidGreenWall = 0x7D,
    FalseGreenWall = 0x7E,
    NotAllowedMarker = 0x7F,
    Flag2X = 0x80,
    DirectionalBlock = 0x81,
    FloorMimic = 0x82,
    GreenBomb = 0x83,
    GreenChip = 0x84,
    Unused85 = 0x85,
    Unused86 = 0x86,
    BlackButton = 0x87,
    SwitchOff = 0x88,
    SwitchOn = 0x89,
    KeyThief = 0x8A,
    Ghost = 0x8B,
    SteelFoil = 0x8C,
    Turtle = 0x8D,
    SecretEye = 0x8E,
    Bribe = 0x8F,
    SpeedBoots = 0x90,
    Unused91 = 0x91,
    Hook = 0x92,
}

impl Cc2Tile {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Whether this tile has a hardcoded direction baked into its identity
    /// (an ice corner, a force floor, or a swivel door). `FORCE_RANDOM` and
    /// plain `ICE` are excluded: they have no single direction.
    fn has_hardcoded_direction(&self) -> bool {
        let set = Self::ice().union_into(Self::forces()).union_into(Self::swivels());
        set.contains(self) && *self != Cc2Tile::ForceRandom && *self != Cc2Tile::Ice
    }

    pub fn right(&self) -> Cc2Tile {
        if !self.has_hardcoded_direction() {
            return *self;
        }
        match self {
            Cc2Tile::IceNe => Cc2Tile::IceSe,
            Cc2Tile::IceSe => Cc2Tile::IceSw,
            Cc2Tile::IceSw => Cc2Tile::IceNw,
            Cc2Tile::IceNw => Cc2Tile::IceNe,
            Cc2Tile::ForceN => Cc2Tile::ForceE,
            Cc2Tile::ForceE => Cc2Tile::ForceS,
            Cc2Tile::ForceS => Cc2Tile::ForceW,
            Cc2Tile::ForceW => Cc2Tile::ForceN,
            Cc2Tile::SwivelDoorNe => Cc2Tile::SwivelDoorSe,
            Cc2Tile::SwivelDoorSe => Cc2Tile::SwivelDoorSw,
            Cc2Tile::SwivelDoorSw => Cc2Tile::SwivelDoorNw,
            Cc2Tile::SwivelDoorNw => Cc2Tile::SwivelDoorNe,
            other => *other,
        }
    }

    pub fn reverse(&self) -> Cc2Tile {
        self.right().right()
    }

    pub fn left(&self) -> Cc2Tile {
        self.right().right().right()
    }

    /// The partner of a known on/off or toggleable pair, or `self` if this
    /// tile isn't one of the five hardcoded pairs.
    pub fn toggle(&self) -> Cc2Tile {
        let pairs: [(Cc2Tile, Cc2Tile); 5] = [
            (Cc2Tile::GreenChip, Cc2Tile::GreenBomb),
            (Cc2Tile::FlameJetOn, Cc2Tile::FlameJetOff),
            (Cc2Tile::GreenToggleFloor, Cc2Tile::GreenToggleWall),
            (Cc2Tile::PurpleToggleFloor, Cc2Tile::PurpleToggleWall),
            (Cc2Tile::SwitchOn, Cc2Tile::SwitchOff),
        ];
        for (a, b) in pairs {
            if *self == a {
                return b;
            }
            if *self == b {
                return a;
            }
        }
        *self
    }

    pub fn ice() -> HashSet<Cc2Tile> {
        set([Cc2Tile::Ice, Cc2Tile::IceNe, Cc2Tile::IceNw, Cc2Tile::IceSe, Cc2Tile::IceSw])
    }

    pub fn forces() -> HashSet<Cc2Tile> {
        set([Cc2Tile::ForceRandom, Cc2Tile::ForceE, Cc2Tile::ForceN, Cc2Tile::ForceS, Cc2Tile::ForceW])
    }

    pub fn walls() -> HashSet<Cc2Tile> {
        set([Cc2Tile::Wall, Cc2Tile::SteelWall, Cc2Tile::SolidGreenWall, Cc2Tile::SolidBlueWall])
            .union_into(Self::invisible_walls())
    }

    pub fn panels() -> HashSet<Cc2Tile> {
        set([Cc2Tile::ThinWallS, Cc2Tile::ThinWallE, Cc2Tile::ThinWallSe, Cc2Tile::ThinWallCanopy])
    }

    pub fn blocks() -> HashSet<Cc2Tile> {
        set([Cc2Tile::DirtBlock, Cc2Tile::IceBlock, Cc2Tile::DirectionalBlock])
    }

    pub fn monsters() -> HashSet<Cc2Tile> {
        set([
            Cc2Tile::Glider,
            Cc2Tile::Fireball,
            Cc2Tile::Ant,
            Cc2Tile::Centipede,
            Cc2Tile::Walker,
            Cc2Tile::Ball,
            Cc2Tile::RedTeeth,
            Cc2Tile::Blob,
            Cc2Tile::BlueTank,
            Cc2Tile::YellowTank,
            Cc2Tile::BlueTeeth,
            Cc2Tile::FloorMimic,
            Cc2Tile::MirrorChip,
            Cc2Tile::MirrorMelinda,
            Cc2Tile::Rover,
            Cc2Tile::Ghost,
        ])
    }

    pub fn mobs() -> HashSet<Cc2Tile> {
        Self::monsters().union_into(Self::blocks()).union_into(Self::players())
    }

    pub fn toggle_chips() -> HashSet<Cc2Tile> {
        set([Cc2Tile::GreenChip, Cc2Tile::GreenBomb])
    }

    pub fn ic_chips() -> HashSet<Cc2Tile> {
        set([Cc2Tile::IcChip, Cc2Tile::ExtraIcChip])
    }

    pub fn all_chips() -> HashSet<Cc2Tile> {
        Self::toggle_chips().union_into(Self::ic_chips())
    }

    pub fn swivels() -> HashSet<Cc2Tile> {
        set([Cc2Tile::SwivelDoorNe, Cc2Tile::SwivelDoorNw, Cc2Tile::SwivelDoorSe, Cc2Tile::SwivelDoorSw])
    }

    pub fn doors() -> HashSet<Cc2Tile> {
        set([Cc2Tile::RedDoor, Cc2Tile::BlueDoor, Cc2Tile::GreenDoor, Cc2Tile::YellowDoor])
    }

    pub fn keys() -> HashSet<Cc2Tile> {
        set([Cc2Tile::RedKey, Cc2Tile::BlueKey, Cc2Tile::GreenKey, Cc2Tile::YellowKey])
    }

    pub fn tools() -> HashSet<Cc2Tile> {
        set([
            Cc2Tile::Flippers,
            Cc2Tile::Cleats,
            Cc2Tile::FireBoots,
            Cc2Tile::SuctionBoots,
            Cc2Tile::Tnt,
            Cc2Tile::BowlingBall,
            Cc2Tile::SecretEye,
            Cc2Tile::Bribe,
            Cc2Tile::SpeedBoots,
            Cc2Tile::RailroadSign,
            Cc2Tile::HikingBoots,
            Cc2Tile::Helmet,
            Cc2Tile::Hook,
            Cc2Tile::SteelFoil,
            Cc2Tile::LightningBolt,
        ])
    }

    pub fn flags() -> HashSet<Cc2Tile> {
        set([Cc2Tile::Flag10, Cc2Tile::Flag100, Cc2Tile::Flag1000, Cc2Tile::Flag2X])
    }

    pub fn time_pickups() -> HashSet<Cc2Tile> {
        set([Cc2Tile::TimeBonus, Cc2Tile::TimePenalty, Cc2Tile::Stopwatch])
    }

    pub fn bombs() -> HashSet<Cc2Tile> {
        set([Cc2Tile::GreenBomb, Cc2Tile::Bomb])
    }

    pub fn pickups() -> HashSet<Cc2Tile> {
        Self::keys()
            .union_into(Self::tools())
            .union_into(Self::flags())
            .union_into(Self::time_pickups())
            .union_into(Self::bombs())
    }

    pub fn blue_walls() -> HashSet<Cc2Tile> {
        set([Cc2Tile::FalseBlueWall, Cc2Tile::SolidBlueWall])
    }

    pub fn green_walls() -> HashSet<Cc2Tile> {
        set([Cc2Tile::FalseGreenWall, Cc2Tile::SolidGreenWall])
    }

    pub fn invisible_walls() -> HashSet<Cc2Tile> {
        set([Cc2Tile::InvisibleWall, Cc2Tile::AppearingWall])
    }

    pub fn mystery_walls() -> HashSet<Cc2Tile> {
        Self::blue_walls().union_into(Self::green_walls()).union_into(Self::invisible_walls())
    }

    pub fn switches() -> HashSet<Cc2Tile> {
        set([Cc2Tile::SwitchOn, Cc2Tile::SwitchOff])
    }

    pub fn buttons() -> HashSet<Cc2Tile> {
        set([
            Cc2Tile::RedButton,
            Cc2Tile::GreenButton,
            Cc2Tile::BlueButton,
            Cc2Tile::BrownButton,
            Cc2Tile::GrayButton,
            Cc2Tile::PinkButton,
            Cc2Tile::BlackButton,
            Cc2Tile::OrangeButton,
            Cc2Tile::YellowTankButton,
        ])
    }

    pub fn buttons_and_switches() -> HashSet<Cc2Tile> {
        Self::buttons().union_into(Self::switches())
    }

    pub fn purple_toggles() -> HashSet<Cc2Tile> {
        set([Cc2Tile::PurpleToggleFloor, Cc2Tile::PurpleToggleWall])
    }

    pub fn green_toggles() -> HashSet<Cc2Tile> {
        set([Cc2Tile::GreenToggleFloor, Cc2Tile::GreenToggleWall])
    }

    pub fn flame_jets() -> HashSet<Cc2Tile> {
        set([Cc2Tile::FlameJetOn, Cc2Tile::FlameJetOff])
    }

    pub fn toggles() -> HashSet<Cc2Tile> {
        Self::purple_toggles().union_into(Self::green_toggles())
    }

    pub fn teleports() -> HashSet<Cc2Tile> {
        set([Cc2Tile::RedTeleport, Cc2Tile::BlueTeleport, Cc2Tile::YellowTeleport, Cc2Tile::GreenTeleport])
    }

    pub fn players() -> HashSet<Cc2Tile> {
        set([Cc2Tile::Chip, Cc2Tile::Melinda])
    }

    pub fn mirrors() -> HashSet<Cc2Tile> {
        set([Cc2Tile::MirrorChip, Cc2Tile::MirrorMelinda])
    }

    pub fn tanks() -> HashSet<Cc2Tile> {
        set([Cc2Tile::BlueTank, Cc2Tile::YellowTank])
    }

    pub fn thieves() -> HashSet<Cc2Tile> {
        set([Cc2Tile::KeyThief, Cc2Tile::ToolThief])
    }

    pub fn gender_signs() -> HashSet<Cc2Tile> {
        set([Cc2Tile::MaleOnlySign, Cc2Tile::FemaleOnlySign])
    }

    pub fn invalid_mobs() -> HashSet<Cc2Tile> {
        set([Cc2Tile::ExplosionAnimation, Cc2Tile::Unused79])
    }

    pub fn all_mobs() -> HashSet<Cc2Tile> {
        Self::mobs().union_into(Self::invalid_mobs())
    }

    pub fn modifiers() -> HashSet<Cc2Tile> {
        set([Cc2Tile::Modifier8Bit, Cc2Tile::Modifier16Bit, Cc2Tile::Modifier32Bit])
    }

    /// Tiles that carry a wire/wire-tunnel nibble-pair modifier byte.
    pub fn wired() -> HashSet<Cc2Tile> {
        set([
            Cc2Tile::Floor,
            Cc2Tile::SteelWall,
            Cc2Tile::Transmogrifier,
            Cc2Tile::BlueTeleport,
            Cc2Tile::RedTeleport,
            Cc2Tile::PinkButton,
            Cc2Tile::BlackButton,
            Cc2Tile::SwitchOn,
            Cc2Tile::SwitchOff,
        ])
    }

    /// Tiles that carry a one-byte color-index modifier (editor custom
    /// floor/wall).
    pub fn custom_tiles() -> HashSet<Cc2Tile> {
        set([Cc2Tile::CustomFloor, Cc2Tile::CustomWall])
    }

    /// Every tile the map codec can prefix with a `MODIFIER_*` tile: the
    /// wired tiles plus letter tiles, clone machines, railroad track, logic
    /// gates, and the custom floor/wall colors.
    pub fn modified_tiles() -> HashSet<Cc2Tile> {
        Self::wired()
            .union_into(set([
                Cc2Tile::LetterTileSpace,
                Cc2Tile::CloneMachine,
                Cc2Tile::RailroadTrack,
                Cc2Tile::LogicGate,
            ]))
            .union_into(Self::custom_tiles())
    }
}

fn set<const N: usize>(items: [Cc2Tile; N]) -> HashSet<Cc2Tile> {
    items.into_iter().collect()
}

trait UnionInto {
    fn union_into(self, other: HashSet<Cc2Tile>) -> HashSet<Cc2Tile>;
}

impl UnionInto for HashSet<Cc2Tile> {
    fn union_into(self, other: HashSet<Cc2Tile>) -> HashSet<Cc2Tile> {
        self.union(&other).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_rotates_ice_corners() {
        assert_eq!(Cc2Tile::IceNe.right(), Cc2Tile::IceSe);
        assert_eq!(Cc2Tile::IceNe.left(), Cc2Tile::IceNw);
        assert_eq!(Cc2Tile::IceNe.reverse(), Cc2Tile::IceSw);
    }

    #[test]
    fn right_is_identity_outside_hardcoded_directions() {
        assert_eq!(Cc2Tile::Chip.right(), Cc2Tile::Chip);
    }

    #[test]
    fn force_random_and_plain_ice_are_direction_invariant() {
        assert_eq!(Cc2Tile::ForceRandom.right(), Cc2Tile::ForceRandom);
        assert_eq!(Cc2Tile::Ice.right(), Cc2Tile::Ice);
    }

    #[test]
    fn toggle_swaps_known_pairs() {
        assert_eq!(Cc2Tile::GreenChip.toggle(), Cc2Tile::GreenBomb);
        assert_eq!(Cc2Tile::GreenBomb.toggle(), Cc2Tile::GreenChip);
        assert_eq!(Cc2Tile::SwitchOn.toggle(), Cc2Tile::SwitchOff);
    }

    #[test]
    fn toggle_is_identity_outside_known_pairs() {
        assert_eq!(Cc2Tile::Wall.toggle(), Cc2Tile::Wall);
    }

    #[test]
    fn code_round_trips_through_from_primitive() {
        use num_traits::FromPrimitive;
        assert_eq!(Cc2Tile::from_u8(Cc2Tile::Hook.code()), Some(Cc2Tile::Hook));
    }

    #[test]
    fn modified_tiles_matches_wired_plus_extras() {
        assert!(Cc2Tile::modified_tiles().contains(&Cc2Tile::Floor));
        assert!(Cc2Tile::modified_tiles().contains(&Cc2Tile::LogicGate));
        assert!(Cc2Tile::modified_tiles().contains(&Cc2Tile::CustomFloor));
        assert!(!Cc2Tile::modified_tiles().contains(&Cc2Tile::Wall));
    }
}
