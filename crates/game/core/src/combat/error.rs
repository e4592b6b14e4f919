//! Combat outcome errors.

use super::CombatPhase;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::SectionKey;

/// Failures returned across the resolver boundary.
///
/// The resolver validates before it mutates, so on error the session is
/// unchanged and the caller may retry or fall back.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no combat in progress")]
    NoCombat,

    #[error("no active run")]
    NoActiveRun,

    #[error("combat is {found}, expected {expected}")]
    UnexpectedPhase {
        expected: CombatPhase,
        found: CombatPhase,
    },

    #[error("no reward staged for finalization")]
    NothingStaged,

    #[error("no pending blueprint to accept")]
    NoPendingBlueprint,

    #[error("combat context names neither a hostile nor a boss")]
    MissingIdentity,

    #[error("battle reported unknown section '{0}'")]
    UnknownSection(SectionKey),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoCombat | Self::UnexpectedPhase { .. } | Self::NoPendingBlueprint => {
                ErrorSeverity::Recoverable
            }
            Self::NoActiveRun | Self::UnknownSection(_) => ErrorSeverity::Validation,
            Self::NothingStaged | Self::MissingIdentity => ErrorSeverity::Internal,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoCombat => "RESOLVE_NO_COMBAT",
            Self::NoActiveRun => "RESOLVE_NO_ACTIVE_RUN",
            Self::UnexpectedPhase { .. } => "RESOLVE_UNEXPECTED_PHASE",
            Self::NothingStaged => "RESOLVE_NOTHING_STAGED",
            Self::NoPendingBlueprint => "RESOLVE_NO_PENDING_BLUEPRINT",
            Self::MissingIdentity => "RESOLVE_MISSING_IDENTITY",
            Self::UnknownSection(_) => "RESOLVE_UNKNOWN_SECTION",
            Self::Oracle(err) => err.error_code(),
        }
    }
}
