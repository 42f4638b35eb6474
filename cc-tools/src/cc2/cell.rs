//! A single map cell: up to five stacked element layers.

use super::element::C2mElement;
use serde::Serialize;

/// CC2 stacks up to five kinds of thing on one cell, each independently
/// optional: a panel (thin wall), a mob, a "not allowed" editor marker, a
/// pickup, and the underlying terrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct C2mCell {
    pub panel: Option<C2mElement>,
    pub mob: Option<C2mElement>,
    pub not_allowed: Option<C2mElement>,
    pub pickup: Option<C2mElement>,
    pub terrain: Option<C2mElement>,
}

impl C2mCell {
    pub fn new() -> Self {
        C2mCell::default()
    }

    /// The layers present on this cell, in the map format's storage order.
    pub fn layers(&self) -> Vec<&C2mElement> {
        [&self.panel, &self.mob, &self.not_allowed, &self.pickup, &self.terrain]
            .into_iter()
            .filter_map(|l| l.as_ref())
            .collect()
    }
}
