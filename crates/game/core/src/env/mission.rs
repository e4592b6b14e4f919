//! Mission / telemetry events.

use crate::combat::FailureReason;
use crate::state::{BossId, HostileId};

/// Fire-and-forget notifications emitted by the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissionEvent {
    RunStarted {
        ship_slot: u32,
        tier: u8,
        map_seed: u64,
    },
    CombatWon {
        hostile: HostileId,
        blockade: bool,
    },
    BossDefeated {
        boss: BossId,
        first_victory: bool,
    },
    ExtractionCompleted {
        ship_slot: u32,
        tier: u8,
        items: u32,
    },
    CreditsEarned {
        amount: u64,
    },
    RunFailed {
        ship_slot: u32,
        reason: FailureReason,
    },
}

impl MissionEvent {
    /// Stable event-type name.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run_started",
            Self::CombatWon { .. } => "combat_won",
            Self::BossDefeated { .. } => "boss_defeated",
            Self::ExtractionCompleted { .. } => "extraction_completed",
            Self::CreditsEarned { .. } => "credits_earned",
            Self::RunFailed { .. } => "run_failed",
        }
    }
}

/// Telemetry sink. Implementations must not block and must not fail the
/// caller; the rules never inspect what happens to an event.
pub trait MissionOracle: Send + Sync {
    fn record(&self, event: MissionEvent);
}
