//! Extraction boundary errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("no active run")]
    NoActiveRun,

    #[error("cannot extract while a combat is in progress")]
    CombatInProgress,

    #[error("extraction gate has not been passed")]
    NotCleared,

    #[error("{collected} items collected but only {limit} can be extracted; select which to keep")]
    SelectionRequired { limit: u32, collected: usize },

    #[error("selected {selected} items, limit is {limit}")]
    SelectionTooLarge { selected: usize, limit: u32 },

    #[error("selection index {0} out of range")]
    SelectionOutOfRange(usize),

    #[error("selection index {0} listed twice")]
    DuplicateSelection(usize),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ExtractionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CombatInProgress | Self::NotCleared | Self::SelectionRequired { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::NoActiveRun
            | Self::SelectionTooLarge { .. }
            | Self::SelectionOutOfRange(_)
            | Self::DuplicateSelection(_) => ErrorSeverity::Validation,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveRun => "EXTRACTION_NO_ACTIVE_RUN",
            Self::CombatInProgress => "EXTRACTION_COMBAT_IN_PROGRESS",
            Self::NotCleared => "EXTRACTION_NOT_CLEARED",
            Self::SelectionRequired { .. } => "EXTRACTION_SELECTION_REQUIRED",
            Self::SelectionTooLarge { .. } => "EXTRACTION_SELECTION_TOO_LARGE",
            Self::SelectionOutOfRange(_) => "EXTRACTION_SELECTION_OUT_OF_RANGE",
            Self::DuplicateSelection(_) => "EXTRACTION_DUPLICATE_SELECTION",
            Self::Oracle(err) => err.error_code(),
        }
    }
}
