//! Loot-content collaborator.
//!
//! Drop tables and rarity rolls live behind this trait; the rules only consume
//! the shape of what it returns.

use std::collections::BTreeSet;

use super::Difficulty;
use crate::state::{BlueprintId, DeckId, LootItem};

/// Result of asking for a blueprint from a category.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlueprintDraw {
    Granted(LootItem),
    /// Every blueprint in the category is already unlocked.
    Exhausted,
}

pub trait LootOracle: Send + Sync {
    /// Salvage revealed after beating a hostile.
    fn generate_salvage(&self, deck: &DeckId, tier: u8, difficulty: Difficulty) -> Vec<LootItem>;

    fn generate_blueprint(
        &self,
        category: &str,
        tier: u8,
        unlocked: &BTreeSet<BlueprintId>,
    ) -> BlueprintDraw;
}
