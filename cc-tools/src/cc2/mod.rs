//! Chip's Challenge 2: tile set, element/cell model, modifier codec, and the
//! `C2M` level container format (sections, map, and the LZ77-style packer).

pub mod cell;
pub mod element;
pub mod map;
pub mod modifiers;
pub mod pack;
pub mod section;
pub mod tile;

pub use cell::C2mCell;
pub use element::C2mElement;
pub use section::{C2mLevel, OptionFields};
pub use tile::Cc2Tile;
