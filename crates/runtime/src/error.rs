//! Unified error type surfaced by the runtime API.
//!
//! Wraps failures from the rules crate, content loading, and the session
//! repository so callers can bubble them up with consistent context.

use extraction_core::{
    ErrorSeverity, ExtractionError, GameError, LifecycleError, OracleError, ResolveError,
    SnapshotError,
};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to load content: {0}")]
    Content(#[source] anyhow::Error),

    #[error("coordinator requires content or oracles to be configured before building")]
    MissingContent,

    #[error("no combat is in progress")]
    NoCombat,

    #[error("no hostile is engaged in the current combat")]
    NoHostile,

    #[error("blockade hostile {0} could not be engaged")]
    BlockadeNotStarted(extraction_core::HostileId),
}

impl RuntimeError {
    /// Severity of the underlying rules error, if there is one.
    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Lifecycle(err) => Some(err.severity()),
            Self::Resolve(err) => Some(err.severity()),
            Self::Extraction(err) => Some(err.severity()),
            Self::Oracle(err) => Some(err.severity()),
            Self::Snapshot(err) => Some(err.severity()),
            _ => None,
        }
    }

    /// Stable code of the underlying rules error, if there is one.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Lifecycle(err) => Some(err.error_code()),
            Self::Resolve(err) => Some(err.error_code()),
            Self::Extraction(err) => Some(err.error_code()),
            Self::Oracle(err) => Some(err.error_code()),
            Self::Snapshot(err) => Some(err.error_code()),
            _ => None,
        }
    }
}
