//! Loot items awarded during a run.
//!
//! Items are produced by the loot-content collaborator (or by merging two
//! batches) and are never mutated afterwards, only appended to a run's
//! collected loot or banked into the profile.

use super::BlueprintId;

/// Rarity tier of a card or blueprint.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Mythic,
}

/// Where a loot item came from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LootSource {
    /// Salvage revealed after a won combat.
    CombatSalvage,
    /// Loot found at a point of interest.
    PoiLoot,
    /// Blueprint accepted from a drone-blueprint PoI.
    BlueprintPoi,
    /// Bonus salvage substituted for an exhausted blueprint category.
    ExhaustedBlueprintBonus,
}

/// Content of a loot item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LootKind {
    Card {
        card_id: String,
        name: String,
        rarity: Rarity,
    },
    Salvage {
        salvage_id: String,
        name: String,
        credit_value: u64,
    },
    AiCores {
        amount: u32,
    },
    Token {
        token_type: String,
        amount: u32,
    },
    Blueprint {
        blueprint_id: BlueprintId,
        blueprint_type: String,
        rarity: Rarity,
        payload: String,
    },
}

/// A loot item with its provenance tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootItem {
    pub kind: LootKind,
    pub source: LootSource,
}

impl LootItem {
    pub fn new(kind: LootKind, source: LootSource) -> Self {
        Self { kind, source }
    }

    pub fn card(card_id: &str, name: &str, rarity: Rarity, source: LootSource) -> Self {
        Self::new(
            LootKind::Card {
                card_id: card_id.to_owned(),
                name: name.to_owned(),
                rarity,
            },
            source,
        )
    }

    pub fn salvage(salvage_id: &str, name: &str, credit_value: u64, source: LootSource) -> Self {
        Self::new(
            LootKind::Salvage {
                salvage_id: salvage_id.to_owned(),
                name: name.to_owned(),
                credit_value,
            },
            source,
        )
    }

    pub fn ai_cores(amount: u32, source: LootSource) -> Self {
        Self::new(LootKind::AiCores { amount }, source)
    }

    /// Credit value if this is a salvage item.
    pub fn salvage_credits(&self) -> Option<u64> {
        match self.kind {
            LootKind::Salvage { credit_value, .. } => Some(credit_value),
            _ => None,
        }
    }

    /// Core amount if this is an AI-core item.
    pub fn ai_core_amount(&self) -> Option<u32> {
        match self.kind {
            LootKind::AiCores { amount } => Some(amount),
            _ => None,
        }
    }

    pub fn blueprint_id(&self) -> Option<&BlueprintId> {
        match &self.kind {
            LootKind::Blueprint { blueprint_id, .. } => Some(blueprint_id),
            _ => None,
        }
    }
}

/// Sum of salvage-item credit values. Other loot kinds contribute nothing.
pub fn salvage_credit_total<'a>(items: impl IntoIterator<Item = &'a LootItem>) -> u64 {
    items.into_iter().filter_map(LootItem::salvage_credits).sum()
}

/// Sum of AI-core amounts.
pub fn ai_core_total<'a>(items: impl IntoIterator<Item = &'a LootItem>) -> u32 {
    items.into_iter().filter_map(LootItem::ai_core_amount).sum()
}

/// Adds `bonus` credits to the first salvage item in `batch`, or appends a
/// bonus salvage item when the batch has none.
pub fn merge_bonus_salvage(batch: &mut Vec<LootItem>, bonus: u64) {
    let existing = batch.iter_mut().find_map(|item| match &mut item.kind {
        LootKind::Salvage { credit_value, .. } => Some(credit_value),
        _ => None,
    });

    match existing {
        Some(credit_value) => *credit_value += bonus,
        None => batch.push(LootItem::salvage(
            "bonus_salvage",
            "Bonus Salvage",
            bonus,
            LootSource::ExhaustedBlueprintBonus,
        )),
    }
}
