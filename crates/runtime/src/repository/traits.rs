//! Repository contract for saving and loading session snapshots.

use extraction_core::SessionSnapshot;

use super::Result;

/// Repository for durable session persistence.
///
/// Snapshots are stored as captured; digest verification happens when the
/// caller restores them.
pub trait SessionRepository: Send + Sync {
    /// Save a snapshot under a session id, replacing any previous one
    fn save(&self, session_id: &str, snapshot: &SessionSnapshot) -> Result<()>;

    /// Load the snapshot of a session
    fn load(&self, session_id: &str) -> Result<Option<SessionSnapshot>>;

    /// Check if a session exists
    fn exists(&self, session_id: &str) -> bool;

    /// Delete a session
    fn delete(&self, session_id: &str) -> Result<()>;

    /// List all stored session ids
    fn list_sessions(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
