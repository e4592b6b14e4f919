//! Salvage and blueprint drop tables.

use std::collections::BTreeMap;
use std::path::Path;

use extraction_core::{BlueprintId, DeckId, Rarity};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A salvage item that can drop after any won combat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalvageEntry {
    pub id: String,
    pub name: String,
    /// Credits at tier 1, normal difficulty.
    pub base_credits: u64,
}

/// A card a hostile deck can drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEntry {
    pub card_id: String,
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
}

/// A drone blueprint inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintEntry {
    pub id: BlueprintId,
    pub blueprint_type: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub payload: String,
}

/// Drop tables backing the runtime loot oracle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTables {
    pub salvage: Vec<SalvageEntry>,
    /// Card pool per hostile deck.
    #[serde(default)]
    pub decks: BTreeMap<DeckId, Vec<CardEntry>>,
    /// Blueprint pool per category.
    #[serde(default)]
    pub blueprints: BTreeMap<String, Vec<BlueprintEntry>>,
}

impl LootTables {
    pub fn cards(&self, deck: &DeckId) -> &[CardEntry] {
        self.decks.get(deck).map_or(&[], Vec::as_slice)
    }

    pub fn blueprint_category(&self, category: &str) -> &[BlueprintEntry] {
        self.blueprints.get(category).map_or(&[], Vec::as_slice)
    }
}

/// Loader for drop tables from RON files.
pub struct LootLoader;

impl LootLoader {
    pub fn load(path: &Path) -> LoadResult<LootTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<LootTables> {
        let tables: LootTables = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loot tables RON: {}", e))?;

        if tables.salvage.is_empty() {
            anyhow::bail!("Loot tables must define at least one salvage entry");
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::write_fixture;

    #[test]
    fn loads_tables_and_looks_up_pools() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "loot.ron",
            r#"(
                salvage: [(id: "scrap", name: "Scrap Plating", base_credits: 20)],
                decks: {"raider_deck": [(card_id: "flak", name: "Flak Burst", rarity: uncommon)]},
                blueprints: {"drone": [(id: "wasp", blueprint_type: "drone")]},
            )"#,
        );

        let tables = LootLoader::load(&path).unwrap();
        assert_eq!(tables.salvage[0].base_credits, 20);
        assert_eq!(tables.cards(&DeckId::new("raider_deck"))[0].rarity, Rarity::Uncommon);
        assert!(tables.cards(&DeckId::new("unknown")).is_empty());
        assert_eq!(tables.blueprint_category("drone")[0].rarity, Rarity::Common);
        assert!(tables.blueprint_category("turret").is_empty());
    }

    #[test]
    fn requires_salvage_entries() {
        assert!(LootLoader::parse("(salvage: [])").is_err());
    }
}
