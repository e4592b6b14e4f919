//! Authoritative session state.
//!
//! [`SessionState`] is the single owner of everything that must survive
//! between two externally driven calls: the profile, the live run, and the
//! in-flight combat context. Collaborators never hold references into it;
//! they receive values and return values.
mod ids;
mod interruption;
mod loot;
mod profile;
mod run;
mod ship;
#[cfg(feature = "serde")]
pub mod snapshot;

pub use ids::{BlueprintId, BossId, DeckId, HexCoord, HostileId, SectionKey};
pub use interruption::{
    Interruption, InterruptionKind, Interruptions, PendingBlueprint, PendingSalvage, PoiCombat,
    PoiRewardType, SalvageProgress,
};
pub use loot::{
    LootItem, LootKind, LootSource, Rarity, ai_core_total, merge_bonus_salvage,
    salvage_credit_total,
};
pub use profile::{BossProgress, PlayerProfile, ShipSlot, ShipSlotStatus};
pub use run::{MAX_DETECTION, RunFlags, RunRecord};
pub use ship::{Lane, ShipSection, ShipSections, aggregate_hull, damaged_section_count};

use crate::combat::{CombatContext, CombatEncounterDescriptor};

/// Everything the lifecycle, resolver, and extraction flow read or mutate.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub profile: PlayerProfile,
    /// The live run, absent while in the hub.
    pub run: Option<RunRecord>,
    /// Durable combat bookkeeping; survives until the outcome is finalized.
    pub combat: Option<CombatContext>,
    /// Ephemeral descriptor of the current battle.
    ///
    /// Presentation code may clear this at any time. Nothing safety-critical
    /// is read from it without a durable fallback.
    pub encounter: Option<CombatEncounterDescriptor>,
    /// Set first thing on abandonment; combat initiation refuses while set.
    pub terminating: bool,
}

impl SessionState {
    pub fn new(profile: PlayerProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn has_active_run(&self) -> bool {
        self.run.is_some()
    }

    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    /// Drops the combat context together with its descriptor.
    pub fn clear_combat(&mut self) {
        self.combat = None;
        self.encounter = None;
    }

    /// Clears the descriptor only, as unrelated presentation code may do.
    pub fn clear_encounter(&mut self) {
        self.encounter = None;
    }
}
