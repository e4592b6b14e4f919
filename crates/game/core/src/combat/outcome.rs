//! Caller-facing outcome values.

use crate::env::BossReward;
use crate::state::LootItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Reason tag surfaced on every failed run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum FailureReason {
    Combat,
    Boss,
    Abandon,
}

/// Where the caller should go next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransitionTarget {
    /// Back to the map, run continues.
    ResumeRun,
    /// Stay post-combat and present the blueprint-accept step.
    AwaitBlueprintAccept,
    /// Back to the map; extraction triggers automatically.
    ReturnToMapAutoExtract,
    /// Back to the hub (boss fights have no surrounding run).
    ReturnToHub,
    MissingInAction { reason: FailureReason },
}

/// Returned by `resolve`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeDescriptor {
    pub outcome: Outcome,
    /// Salvage staged for reveal. Empty for boss rewards and defeats.
    pub loot: Vec<LootItem>,
    /// Staged boss reward, if this was a boss victory.
    pub boss_reward: Option<BossReward>,
    /// Aggregate hull after the battle.
    pub hull: u32,
    /// Ship slot 0 was in use; read before any termination.
    pub is_starter_deck: bool,
    /// Set when resolution already decided the transition (defeat).
    pub transition: Option<TransitionTarget>,
    pub message: String,
}

impl OutcomeDescriptor {
    pub fn is_victory(&self) -> bool {
        self.outcome == Outcome::Victory
    }

    pub fn is_boss_reward(&self) -> bool {
        self.boss_reward.is_some()
    }
}
