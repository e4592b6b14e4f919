//! Hostile catalog loader.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use extraction_core::{HostileId, HostileProfile};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Hostile catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostileCatalog {
    pub hostiles: Vec<HostileProfile>,
    /// High-threat interception roster per map tier.
    #[serde(default)]
    pub rosters: BTreeMap<u8, Vec<HostileId>>,
}

impl HostileCatalog {
    /// Checks ids are unique and every roster entry names a known hostile.
    pub fn validate(&self) -> LoadResult<()> {
        let mut seen = BTreeSet::new();
        for hostile in &self.hostiles {
            if !seen.insert(&hostile.id) {
                anyhow::bail!("Duplicate hostile id '{}'", hostile.id);
            }
        }
        for (tier, roster) in &self.rosters {
            if *tier == 0 {
                anyhow::bail!("Roster tiers start at 1");
            }
            if let Some(unknown) = roster.iter().find(|id| !seen.contains(id)) {
                anyhow::bail!("Roster for tier {} names unknown hostile '{}'", tier, unknown);
            }
        }
        Ok(())
    }
}

/// Loader for hostile profiles and rosters from RON files.
pub struct HostileLoader;

impl HostileLoader {
    pub fn load(path: &Path) -> LoadResult<HostileCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<HostileCatalog> {
        let catalog: HostileCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hostile catalog RON: {}", e))?;
        catalog.validate()?;
        Ok(catalog)
    }
}
