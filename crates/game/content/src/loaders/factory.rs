//! Content factory for building oracles from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use extraction_core::{BossConfig, Loadout, RunConfig};

use crate::loaders::{
    BossLoader, ConfigLoader, HostileCatalog, HostileLoader, LoadResult, LoadoutLoader,
    LootLoader, LootTables,
};

/// Content factory that loads all run content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── hostiles.ron
/// ├── bosses.ron
/// ├── loadouts.ron
/// └── loot.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Content shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load run configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<RunConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(RunConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load hostile profiles and rosters from `hostiles.ron`.
    pub fn load_hostiles(&self) -> LoadResult<HostileCatalog> {
        let path = self.data_dir.join("hostiles.ron");
        HostileLoader::load(&path)
    }

    /// Load boss encounters from `bosses.ron`.
    pub fn load_bosses(&self) -> LoadResult<Vec<BossConfig>> {
        let path = self.data_dir.join("bosses.ron");
        BossLoader::load(&path)
    }

    /// Load ship loadouts from `loadouts.ron`.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the damaged threshold for sections that omit one
    pub fn load_loadouts(&self, config: &RunConfig) -> LoadResult<BTreeMap<u32, Loadout>> {
        let path = self.data_dir.join("loadouts.ron");
        LoadoutLoader::load(&path, config.default_damaged_threshold)
    }

    /// Load drop tables from `loot.ron`.
    pub fn load_loot(&self) -> LoadResult<LootTables> {
        let path = self.data_dir.join("loot.ron");
        LootLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
