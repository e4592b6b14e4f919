//! Common error infrastructure for extraction-core.
//!
//! Domain-specific errors (`ResolveError`, `ExtractionError`, `LifecycleError`)
//! live next to the operations they guard. This module only provides the
//! shared classification used by all of them.
//!
//! # Design Principles
//!
//! - **Typed failures**: no operation panics across the resolver boundary
//! - **Severity Classification**: callers pick a fallback from the severity
//! - **Stable codes**: `error_code()` strings are safe to match on in telemetry

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can retry later or pick another branch
/// - **Validation**: the request referenced something that does not exist
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: a required collaborator is missing, the engine cannot proceed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same call may succeed once state changes.
    ///
    /// Examples: combat already resolved, termination in progress
    Recoverable,

    /// Validation error - invalid reference, should not retry without changes.
    ///
    /// Examples: unknown boss id, unknown ship slot
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - a required collaborator was not provided.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all extraction-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
