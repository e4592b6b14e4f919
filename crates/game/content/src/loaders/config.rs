//! Run configuration loader.

use std::path::Path;

use extraction_core::RunConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for run tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`RunConfig::default`] value.
    pub fn load(path: &Path) -> LoadResult<RunConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RunConfig> {
        let config: RunConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.combat_reputation_caps.is_empty() {
            anyhow::bail!("combat_reputation_caps must list at least one tier");
        }
        if config.drone_damage_hull_percent > 100 {
            anyhow::bail!(
                "drone_damage_hull_percent must be within 0..=100, got {}",
                config.drone_damage_hull_percent
            );
        }

        Ok(config)
    }
}
