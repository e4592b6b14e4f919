//! Ship loadouts implementing [`extraction_core::LoadoutOracle`].
use std::collections::BTreeMap;

use extraction_core::{Loadout, LoadoutOracle};

/// LoadoutOracle implementation with static loadouts keyed by ship slot.
pub struct LoadoutOracleImpl {
    loadouts: BTreeMap<u32, Loadout>,
}

impl LoadoutOracleImpl {
    pub fn new(loadouts: BTreeMap<u32, Loadout>) -> Self {
        Self { loadouts }
    }

    pub fn slots(&self) -> impl Iterator<Item = u32> + '_ {
        self.loadouts.keys().copied()
    }
}

impl LoadoutOracle for LoadoutOracleImpl {
    fn loadout(&self, ship_slot: u32) -> Option<Loadout> {
        self.loadouts.get(&ship_slot).cloned()
    }
}
