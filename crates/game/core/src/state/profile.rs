//! Profile-scoped state that outlives any single run.

use std::collections::{BTreeMap, BTreeSet};

use super::{BlueprintId, BossId, LootItem, LootKind};
use crate::config::RunConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ShipSlotStatus {
    #[default]
    Active,
    /// Lost in a failed run.
    Missing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSlot {
    pub status: ShipSlotStatus,
    /// Set when the ship returned from a run below the drone-damage hull ratio.
    pub drones_damaged: bool,
}

/// Boss encounter history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossProgress {
    pub defeated_boss_ids: BTreeSet<BossId>,
    pub total_victories: u32,
    pub total_attempts: u32,
}

impl BossProgress {
    pub fn is_first_victory(&self, boss_id: &BossId) -> bool {
        !self.defeated_boss_ids.contains(boss_id)
    }

    pub fn record_attempt(&mut self) {
        self.total_attempts += 1;
    }

    /// Records a victory. Returns `true` if this was the first one over `boss_id`.
    pub fn record_victory(&mut self, boss_id: &BossId) -> bool {
        self.total_victories += 1;
        self.defeated_boss_ids.insert(boss_id.clone())
    }
}

/// Persistent player profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub credits: u64,
    pub ai_cores: u32,
    pub reputation: u64,
    /// Single-use items that guarantee a safe extraction.
    pub clearance_items: u32,
    /// Banked cards, tokens and blueprints from extracted runs.
    pub inventory: Vec<LootItem>,
    pub unlocked_blueprints: BTreeSet<BlueprintId>,
    pub ship_slots: BTreeMap<u32, ShipSlot>,
    pub boss_progress: BossProgress,
}

impl PlayerProfile {
    pub fn new() -> Self {
        let mut profile = Self::default();
        profile
            .ship_slots
            .insert(RunConfig::STARTER_SHIP_SLOT, ShipSlot::default());
        profile
    }

    pub fn slot(&self, ship_slot: u32) -> Option<&ShipSlot> {
        self.ship_slots.get(&ship_slot)
    }

    pub fn slot_is_active(&self, ship_slot: u32) -> bool {
        self.slot(ship_slot)
            .is_some_and(|slot| slot.status == ShipSlotStatus::Active)
    }

    /// Consumes one clearance item. Returns `false` when none are left.
    pub fn consume_clearance(&mut self) -> bool {
        if self.clearance_items == 0 {
            return false;
        }
        self.clearance_items -= 1;
        true
    }

    /// Marks a custom loadout missing. The starter slot is never lost.
    pub fn mark_missing(&mut self, ship_slot: u32) -> bool {
        if RunConfig::is_starter_slot(ship_slot) {
            return false;
        }
        match self.ship_slots.get_mut(&ship_slot) {
            Some(slot) => {
                slot.status = ShipSlotStatus::Missing;
                true
            }
            None => false,
        }
    }

    pub fn mark_drones_damaged(&mut self, ship_slot: u32) {
        if let Some(slot) = self.ship_slots.get_mut(&ship_slot) {
            slot.drones_damaged = true;
        }
    }

    /// Banks extracted loot. Salvage and AI cores are converted by the
    /// caller; cards, tokens and blueprints are kept as items.
    pub fn bank_items<'a>(&mut self, items: impl IntoIterator<Item = &'a LootItem>) {
        for item in items {
            match &item.kind {
                LootKind::Salvage { .. } | LootKind::AiCores { .. } => {}
                LootKind::Blueprint { blueprint_id, .. } => {
                    self.unlocked_blueprints.insert(blueprint_id.clone());
                    self.inventory.push(item.clone());
                }
                LootKind::Card { .. } | LootKind::Token { .. } => {
                    self.inventory.push(item.clone());
                }
            }
        }
    }
}
