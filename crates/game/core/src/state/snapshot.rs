//! Durable session snapshots.
//!
//! Staged outcomes are split across two calls (resolve, then finalize), so a
//! restart between them must not lose the chosen branch. A snapshot is the
//! bincode encoding of the whole [`SessionState`] plus its SHA-256 digest.

use sha2::{Digest, Sha256};

use super::SessionState;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to encode session: {0}")]
    Encode(String),

    #[error("failed to decode session: {0}")]
    Decode(String),

    #[error("snapshot digest mismatch")]
    DigestMismatch,
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Encode(_) => ErrorSeverity::Internal,
            Self::Decode(_) | Self::DigestMismatch => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "SNAPSHOT_ENCODE",
            Self::Decode(_) => "SNAPSHOT_DECODE",
            Self::DigestMismatch => "SNAPSHOT_DIGEST_MISMATCH",
        }
    }
}

/// Encoded session with an integrity digest.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    pub digest: [u8; 32],
    pub bytes: Vec<u8>,
}

impl SessionSnapshot {
    pub fn capture(state: &SessionState) -> Result<Self, SnapshotError> {
        let bytes =
            bincode::serialize(state).map_err(|err| SnapshotError::Encode(err.to_string()))?;
        let digest = Self::digest_of(&bytes);
        Ok(Self { digest, bytes })
    }

    /// Verifies the digest and decodes the session.
    pub fn restore(&self) -> Result<SessionState, SnapshotError> {
        if Self::digest_of(&self.bytes) != self.digest {
            return Err(SnapshotError::DigestMismatch);
        }
        bincode::deserialize(&self.bytes).map_err(|err| SnapshotError::Decode(err.to_string()))
    }

    fn digest_of(bytes: &[u8]) -> [u8; 32] {
        Sha256::digest(bytes).into()
    }
}
