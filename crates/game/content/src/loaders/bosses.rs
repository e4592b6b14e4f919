//! Boss catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use extraction_core::BossConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Boss catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossCatalog {
    pub bosses: Vec<BossConfig>,
}

/// Loader for boss encounters from RON files.
pub struct BossLoader;

impl BossLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<BossConfig>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<BossConfig>> {
        let catalog: BossCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse boss catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for boss in &catalog.bosses {
            if !seen.insert(&boss.id) {
                anyhow::bail!("Duplicate boss id '{}'", boss.id);
            }
        }

        Ok(catalog.bosses)
    }
}
