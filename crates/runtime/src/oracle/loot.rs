//! Drop tables implementing [`extraction_core::LootOracle`].
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use extraction_content::{BlueprintEntry, LootTables};
use extraction_core::{
    BlueprintDraw, BlueprintId, DeckId, Difficulty, LootItem, LootKind, LootOracle, LootSource,
};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// LootOracle implementation rolling against static drop tables.
///
/// Rolls come from a seeded generator so a session replays identically.
pub struct LootOracleImpl {
    tables: LootTables,
    rng: Mutex<ChaCha8Rng>,
}

impl LootOracleImpl {
    pub fn new(tables: LootTables, seed: u64) -> Self {
        Self {
            tables,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn difficulty_multiplier(difficulty: Difficulty) -> u64 {
        match difficulty {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
            Difficulty::Elite => 4,
        }
    }

    fn ai_cores(difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy | Difficulty::Normal => 0,
            Difficulty::Hard => 1,
            Difficulty::Elite => 2,
        }
    }

    /// Normal difficulty at tier 1 pays the table's base credits.
    fn scaled_credits(base: u64, tier: u8, difficulty: Difficulty) -> u64 {
        (base * u64::from(tier.max(1)) * Self::difficulty_multiplier(difficulty) / 2).max(1)
    }

    fn blueprint_item(entry: &BlueprintEntry) -> LootItem {
        LootItem::new(
            LootKind::Blueprint {
                blueprint_id: entry.id.clone(),
                blueprint_type: entry.blueprint_type.clone(),
                rarity: entry.rarity,
                payload: entry.payload.clone(),
            },
            LootSource::BlueprintPoi,
        )
    }
}

impl LootOracle for LootOracleImpl {
    fn generate_salvage(&self, deck: &DeckId, tier: u8, difficulty: Difficulty) -> Vec<LootItem> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut loot = Vec::new();

        if let Some(entry) = self.tables.salvage.choose(&mut *rng) {
            loot.push(LootItem::salvage(
                &entry.id,
                &entry.name,
                Self::scaled_credits(entry.base_credits, tier, difficulty),
                LootSource::CombatSalvage,
            ));
        }
        if let Some(card) = self.tables.cards(deck).choose(&mut *rng) {
            loot.push(LootItem::card(
                &card.card_id,
                &card.name,
                card.rarity,
                LootSource::CombatSalvage,
            ));
        }
        let cores = Self::ai_cores(difficulty);
        if cores > 0 {
            loot.push(LootItem::ai_cores(cores, LootSource::CombatSalvage));
        }

        loot
    }

    /// Rarities up to the map tier are preferred; rarer blueprints are
    /// drawn only once nothing else is left.
    fn generate_blueprint(
        &self,
        category: &str,
        tier: u8,
        unlocked: &BTreeSet<BlueprintId>,
    ) -> BlueprintDraw {
        let candidates: Vec<&BlueprintEntry> = self
            .tables
            .blueprint_category(category)
            .iter()
            .filter(|entry| !unlocked.contains(&entry.id))
            .collect();
        if candidates.is_empty() {
            return BlueprintDraw::Exhausted;
        }

        let within_tier: Vec<&BlueprintEntry> = candidates
            .iter()
            .copied()
            .filter(|entry| entry.rarity as u8 <= tier)
            .collect();
        let pool = if within_tier.is_empty() {
            &candidates
        } else {
            &within_tier
        };

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        match pool.choose(&mut *rng) {
            Some(entry) => BlueprintDraw::Granted(Self::blueprint_item(entry)),
            None => BlueprintDraw::Exhausted,
        }
    }
}
