//! Reading, writing, and transforming Chip's Challenge level data: CC1 `DAT`
//! packs, CC2 `C2M` levels, and `TWS` replay files.

pub mod binary;
pub mod cc1;
pub mod cc2;
pub mod error;
pub mod tws;

pub use error::{Error, Result};
