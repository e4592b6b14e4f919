//! Run lifecycle errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("a run is already active")]
    RunAlreadyActive,

    #[error("no active run")]
    NoActiveRun,

    #[error("a combat is already in progress")]
    CombatInProgress,

    #[error("run is terminating; return to the hub first")]
    Terminating,

    #[error("ship slot {0} is missing or unknown")]
    SlotUnavailable(u32),

    #[error("boss encounters start from the hub")]
    BossOutsideHub,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for LifecycleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RunAlreadyActive | Self::CombatInProgress | Self::Terminating => {
                ErrorSeverity::Recoverable
            }
            Self::NoActiveRun | Self::SlotUnavailable(_) | Self::BossOutsideHub => {
                ErrorSeverity::Validation
            }
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RunAlreadyActive => "LIFECYCLE_RUN_ALREADY_ACTIVE",
            Self::NoActiveRun => "LIFECYCLE_NO_ACTIVE_RUN",
            Self::CombatInProgress => "LIFECYCLE_COMBAT_IN_PROGRESS",
            Self::Terminating => "LIFECYCLE_TERMINATING",
            Self::SlotUnavailable(_) => "LIFECYCLE_SLOT_UNAVAILABLE",
            Self::BossOutsideHub => "LIFECYCLE_BOSS_OUTSIDE_HUB",
            Self::Oracle(err) => err.error_code(),
        }
    }
}
