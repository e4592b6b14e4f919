//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{BossId, HostileId};

/// Errors that occur when reaching a collaborator or its data.
///
/// A missing collaborator is fatal; an unknown id is a validation error the
/// caller can fall back from (default hostile, default loadout).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("LootOracle not available")]
    LootNotAvailable,

    #[error("ThreatOracle not available")]
    ThreatNotAvailable,

    #[error("ReputationOracle not available")]
    ReputationNotAvailable,

    #[error("HostileOracle not available")]
    HostilesNotAvailable,

    #[error("LoadoutOracle not available")]
    LoadoutsNotAvailable,

    #[error("hostile '{0}' not found")]
    UnknownHostile(HostileId),

    #[error("boss '{0}' not found")]
    UnknownBoss(BossId),

    #[error("no loadout for ship slot {0}")]
    UnknownShipSlot(u32),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            LootNotAvailable | ThreatNotAvailable | ReputationNotAvailable
            | HostilesNotAvailable | LoadoutsNotAvailable => ErrorSeverity::Fatal,

            UnknownHostile(_) | UnknownBoss(_) | UnknownShipSlot(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            LootNotAvailable => "ORACLE_LOOT_NOT_AVAILABLE",
            ThreatNotAvailable => "ORACLE_THREAT_NOT_AVAILABLE",
            ReputationNotAvailable => "ORACLE_REPUTATION_NOT_AVAILABLE",
            HostilesNotAvailable => "ORACLE_HOSTILES_NOT_AVAILABLE",
            LoadoutsNotAvailable => "ORACLE_LOADOUTS_NOT_AVAILABLE",
            UnknownHostile(_) => "ORACLE_UNKNOWN_HOSTILE",
            UnknownBoss(_) => "ORACLE_UNKNOWN_BOSS",
            UnknownShipSlot(_) => "ORACLE_UNKNOWN_SHIP_SLOT",
        }
    }
}
