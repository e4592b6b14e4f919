//! Hostile and boss tables implementing [`extraction_core::HostileOracle`].
use std::collections::{BTreeMap, HashMap};

use extraction_content::HostileCatalog;
use extraction_core::{BossConfig, BossId, HostileId, HostileOracle, HostileProfile};

/// HostileOracle implementation backed by static content.
pub struct HostileOracleImpl {
    hostiles: HashMap<HostileId, HostileProfile>,
    rosters: BTreeMap<u8, Vec<HostileId>>,
    bosses: HashMap<BossId, BossConfig>,
}

impl HostileOracleImpl {
    pub fn new() -> Self {
        Self {
            hostiles: HashMap::new(),
            rosters: BTreeMap::new(),
            bosses: HashMap::new(),
        }
    }

    pub fn from_content(catalog: HostileCatalog, bosses: Vec<BossConfig>) -> Self {
        let mut oracle = Self::new();
        for hostile in catalog.hostiles {
            oracle.add_hostile(hostile);
        }
        oracle.rosters = catalog.rosters;
        for boss in bosses {
            oracle.add_boss(boss);
        }
        oracle
    }

    pub fn add_hostile(&mut self, profile: HostileProfile) {
        self.hostiles.insert(profile.id.clone(), profile);
    }

    pub fn add_boss(&mut self, boss: BossConfig) {
        self.bosses.insert(boss.id.clone(), boss);
    }

    pub fn set_roster(&mut self, tier: u8, roster: Vec<HostileId>) {
        self.rosters.insert(tier, roster);
    }
}

impl Default for HostileOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl HostileOracle for HostileOracleImpl {
    /// Tiers past the last configured roster reuse the highest one.
    fn high_threat_roster(&self, tier: u8) -> Vec<HostileId> {
        self.rosters
            .range(..=tier)
            .next_back()
            .map(|(_, roster)| roster.clone())
            .unwrap_or_default()
    }

    fn hostile(&self, id: &HostileId) -> Option<HostileProfile> {
        self.hostiles.get(id).cloned()
    }

    fn boss(&self, id: &BossId) -> Option<BossConfig> {
        self.bosses.get(id).cloned()
    }
}
