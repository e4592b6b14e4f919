//! Ship loadout oracle.

use crate::state::ShipSections;

/// Ship configuration stored in a profile slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    pub name: String,
    pub sections: ShipSections,
    /// Aggregate worth of the loadout, weighed against hostile difficulty
    /// when computing combat reputation.
    pub value: u32,
}

pub trait LoadoutOracle: Send + Sync {
    fn loadout(&self, ship_slot: u32) -> Option<Loadout>;
}
