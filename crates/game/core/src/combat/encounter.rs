//! Encounter identity and the durable combat context.

use std::collections::BTreeMap;

use crate::env::{BossReward, Difficulty};
use crate::state::{BossId, HostileId, LootItem, SectionKey};

/// Who the player is fighting. Dispatched once per resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Encounter {
    Regular { ai_id: HostileId },
    Boss { boss_id: BossId },
    /// Interception at the extraction boundary.
    Blockade { ai_id: HostileId },
}

impl Encounter {
    pub fn hostile_id(&self) -> Option<&HostileId> {
        match self {
            Self::Regular { ai_id } | Self::Blockade { ai_id } => Some(ai_id),
            Self::Boss { .. } => None,
        }
    }

    pub fn boss_id(&self) -> Option<&BossId> {
        match self {
            Self::Boss { boss_id } => Some(boss_id),
            _ => None,
        }
    }

    pub const fn is_boss(&self) -> bool {
        matches!(self, Self::Boss { .. })
    }

    pub const fn is_blockade(&self) -> bool {
        matches!(self, Self::Blockade { .. })
    }
}

/// Ephemeral description of one battle, built when combat is initiated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEncounterDescriptor {
    pub encounter: Encounter,
    pub tier: u8,
    pub difficulty: Difficulty,
    pub starting_hull: u32,
}

impl CombatEncounterDescriptor {
    pub fn new(encounter: Encounter, tier: u8, difficulty: Difficulty) -> Self {
        Self {
            encounter,
            tier,
            difficulty,
            starting_hull: 0,
        }
    }

    pub fn is_blockade(&self) -> bool {
        self.encounter.is_blockade()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Winner {
    Player,
    Opponent,
}

/// Signal from the battle engine, delivered once at combat end.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub winner: Winner,
    /// Hull of each section after combat. Sections not listed are unchanged.
    pub section_hull: BTreeMap<SectionKey, u32>,
}

impl BattleResult {
    pub fn victory(section_hull: BTreeMap<SectionKey, u32>) -> Self {
        Self {
            winner: Winner::Player,
            section_hull,
        }
    }

    pub fn defeat() -> Self {
        Self {
            winner: Winner::Opponent,
            section_hull: BTreeMap::new(),
        }
    }
}

/// Resolution progress of the in-flight combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatPhase {
    #[default]
    AwaitingOutcome,
    /// Victory resolved; staged loot waits for acknowledgement.
    VictoryPendingLootReveal,
    /// Staged loot banked; a drone blueprint waits to be accepted.
    VictoryPendingBlueprint,
}

/// Reward staged between `resolve` and `finalize_victory`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StagedReward {
    Salvage {
        loot: Vec<LootItem>,
    },
    Boss {
        boss_id: BossId,
        reward: BossReward,
        first_victory: bool,
    },
}

/// Durable record of the combat in flight.
///
/// Identity fields are copied from the descriptor at combat start so the
/// outcome can be resolved after the descriptor is gone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatContext {
    pub hostile: Option<HostileId>,
    pub boss: Option<BossId>,
    pub ship_slot: u32,
    pub tier: u8,
    pub difficulty: Difficulty,
    pub phase: CombatPhase,
    pub staged: Option<StagedReward>,
}

impl CombatContext {
    pub fn from_descriptor(descriptor: &CombatEncounterDescriptor, ship_slot: u32) -> Self {
        Self {
            hostile: descriptor.encounter.hostile_id().cloned(),
            boss: descriptor.encounter.boss_id().cloned(),
            ship_slot,
            tier: descriptor.tier,
            difficulty: descriptor.difficulty,
            phase: CombatPhase::AwaitingOutcome,
            staged: None,
        }
    }

    /// Rebuilds the encounter variant from durable fields.
    ///
    /// `blockade` is the caller's combined view of the descriptor flag and
    /// the run flag.
    pub fn encounter(&self, blockade: bool) -> Option<Encounter> {
        match (&self.boss, &self.hostile) {
            (Some(boss_id), _) => Some(Encounter::Boss {
                boss_id: boss_id.clone(),
            }),
            (None, Some(ai_id)) if blockade => Some(Encounter::Blockade {
                ai_id: ai_id.clone(),
            }),
            (None, Some(ai_id)) => Some(Encounter::Regular {
                ai_id: ai_id.clone(),
            }),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_identity_without_descriptor() {
        let descriptor = CombatEncounterDescriptor::new(
            Encounter::Blockade {
                ai_id: HostileId::new("interceptor"),
            },
            2,
            Difficulty::Hard,
        );
        let context = CombatContext::from_descriptor(&descriptor, 3);
        assert_eq!(context.phase, CombatPhase::AwaitingOutcome);
        assert_eq!(
            context.encounter(true),
            Some(Encounter::Blockade {
                ai_id: HostileId::new("interceptor")
            })
        );
        assert_eq!(
            context.encounter(false),
            Some(Encounter::Regular {
                ai_id: HostileId::new("interceptor")
            })
        );
    }

    #[test]
    fn boss_identity_wins_over_blockade_flag() {
        let descriptor = CombatEncounterDescriptor::new(
            Encounter::Boss {
                boss_id: BossId::new("dreadnought"),
            },
            1,
            Difficulty::Elite,
        );
        let context = CombatContext::from_descriptor(&descriptor, 1);
        assert!(context.encounter(true).is_some_and(|e| e.is_boss()));
    }
}
