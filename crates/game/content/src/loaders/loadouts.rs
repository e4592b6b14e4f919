//! Ship loadout loader.
//!
//! Loadouts are authored as section specs and resolved into full-hull
//! [`ShipSection`]s, so data files never carry a live hull value.

use std::collections::BTreeMap;
use std::path::Path;

use extraction_core::{Lane, Loadout, SectionKey, ShipSection, ShipSections};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One section as authored in `loadouts.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    pub key: SectionKey,
    pub max_hull: u32,
    /// Falls back to the configured default when absent.
    #[serde(default)]
    pub damaged_threshold: Option<u32>,
    #[serde(default)]
    pub lane: Lane,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoadoutSpec {
    slot: u32,
    name: String,
    #[serde(default)]
    value: u32,
    sections: Vec<SectionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoadoutCatalog {
    loadouts: Vec<LoadoutSpec>,
}

/// Loader for ship loadouts from RON files.
pub struct LoadoutLoader;

impl LoadoutLoader {
    /// Load loadouts keyed by ship slot.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file
    /// * `default_threshold` - Damaged threshold for sections that omit one
    pub fn load(path: &Path, default_threshold: u32) -> LoadResult<BTreeMap<u32, Loadout>> {
        let content = read_file(path)?;
        Self::parse(&content, default_threshold)
    }

    pub fn parse(content: &str, default_threshold: u32) -> LoadResult<BTreeMap<u32, Loadout>> {
        let catalog: LoadoutCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loadout catalog RON: {}", e))?;

        let mut loadouts = BTreeMap::new();
        for spec in catalog.loadouts {
            let sections = resolve_sections(&spec, default_threshold)?;
            let loadout = Loadout {
                name: spec.name,
                sections,
                value: spec.value,
            };
            if loadouts.insert(spec.slot, loadout).is_some() {
                anyhow::bail!("Duplicate loadout for ship slot {}", spec.slot);
            }
        }

        Ok(loadouts)
    }
}

fn resolve_sections(spec: &LoadoutSpec, default_threshold: u32) -> LoadResult<ShipSections> {
    if spec.sections.is_empty() {
        anyhow::bail!("Loadout '{}' has no sections", spec.name);
    }

    let mut sections = ShipSections::new();
    for section in &spec.sections {
        if section.max_hull == 0 {
            anyhow::bail!(
                "Section '{}' of loadout '{}' has zero max hull",
                section.key,
                spec.name
            );
        }
        let threshold = section.damaged_threshold.unwrap_or(default_threshold);
        let resolved = ShipSection::with_threshold(section.max_hull, threshold, section.lane);
        if sections.insert(section.key.clone(), resolved).is_some() {
            anyhow::bail!(
                "Loadout '{}' declares section '{}' twice",
                spec.name,
                section.key
            );
        }
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::write_fixture;

    const CATALOG: &str = r#"
        (loadouts: [
            (
                slot: 0,
                name: "Starter",
                value: 10,
                sections: [
                    (key: "bridge", max_hull: 10),
                    (key: "engines", max_hull: 10, lane: left),
                ],
            ),
            (
                slot: 1,
                name: "Corsair",
                value: 40,
                sections: [(key: "bridge", max_hull: 14, damaged_threshold: Some(6))],
            ),
        ])
    "#;

    #[test]
    fn resolves_sections_at_full_hull() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "loadouts.ron", CATALOG);

        let loadouts = LoadoutLoader::load(&path, 4).unwrap();
        assert_eq!(loadouts.len(), 2);

        let starter = &loadouts[&0];
        let engines = &starter.sections[&SectionKey::new("engines")];
        assert_eq!(engines.hull(), 10);
        assert_eq!(engines.damaged_threshold(), 4);
        assert_eq!(engines.lane(), Lane::Left);

        let corsair = &loadouts[&1];
        assert_eq!(corsair.value, 40);
        assert_eq!(
            corsair.sections[&SectionKey::new("bridge")].damaged_threshold(),
            6
        );
    }

    #[test]
    fn rejects_duplicate_slots_and_sections() {
        let duplicate_slot = r#"(loadouts: [
            (slot: 0, name: "A", sections: [(key: "bridge", max_hull: 5)]),
            (slot: 0, name: "B", sections: [(key: "bridge", max_hull: 5)]),
        ])"#;
        assert!(LoadoutLoader::parse(duplicate_slot, 4).is_err());

        let duplicate_section = r#"(loadouts: [
            (slot: 0, name: "A", sections: [
                (key: "bridge", max_hull: 5),
                (key: "bridge", max_hull: 6),
            ]),
        ])"#;
        assert!(LoadoutLoader::parse(duplicate_section, 4).is_err());
    }

    #[test]
    fn rejects_empty_or_zero_hull_loadouts() {
        assert!(LoadoutLoader::parse(r#"(loadouts: [(slot: 0, name: "A", sections: [])])"#, 4).is_err());
        assert!(
            LoadoutLoader::parse(
                r#"(loadouts: [(slot: 0, name: "A", sections: [(key: "x", max_hull: 0)])])"#,
                4
            )
            .is_err()
        );
    }
}
