//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use extraction_core::SessionSnapshot;

use crate::repository::error::validate_session_id;
use crate::repository::{RepositoryError, Result, SessionRepository};

/// File-based implementation of SessionRepository.
///
/// # File Format
///
/// Each session is stored as `session_{id}.bin`, the bincode encoding of its
/// [`SessionSnapshot`] (digest and encoded state). Writes go to a temp file
/// first and are renamed into place.
pub struct FileSessionRepository {
    base_dir: PathBuf,
}

impl FileSessionRepository {
    /// Create a new file-based session repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Get the path to a session file.
    fn session_path(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(format!("session_{}.bin", session_id))
    }
}

impl SessionRepository for FileSessionRepository {
    fn save(&self, session_id: &str, snapshot: &SessionSnapshot) -> Result<()> {
        validate_session_id(session_id)?;
        let path = self.session_path(session_id);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved session[{}] to {}", session_id, path.display());

        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<SessionSnapshot>> {
        validate_session_id(session_id)?;
        let path = self.session_path(session_id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let snapshot: SessionSnapshot = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded session[{}] from {}", session_id, path.display());

        Ok(Some(snapshot))
    }

    fn exists(&self, session_id: &str) -> bool {
        validate_session_id(session_id).is_ok() && self.session_path(session_id).exists()
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        validate_session_id(session_id)?;
        let path = self.session_path(session_id);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted session[{}]", session_id);
        }

        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let mut sessions = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(session_id) = filename
                    .strip_prefix("session_")
                    .and_then(|s| s.strip_suffix(".bin"))
            {
                sessions.push(session_id.to_owned());
            }
        }

        sessions.sort_unstable();
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extraction_core::{PlayerProfile, SessionState};

    fn snapshot(credits: u64) -> SessionSnapshot {
        let mut state = SessionState::new(PlayerProfile::new());
        state.profile.credits = credits;
        SessionSnapshot::capture(&state).unwrap()
    }

    #[test]
    fn save_load_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("sessions")).unwrap();

        repo.save("beta", &snapshot(2)).unwrap();
        repo.save("alpha", &snapshot(1)).unwrap();
        repo.save("alpha", &snapshot(3)).unwrap();

        assert_eq!(repo.list_sessions().unwrap(), vec!["alpha", "beta"]);
        let restored = repo.load("alpha").unwrap().unwrap().restore().unwrap();
        assert_eq!(restored.profile.credits, 3);
        assert!(repo.load("gamma").unwrap().is_none());

        repo.delete("alpha").unwrap();
        assert!(!repo.exists("alpha"));
    }

    #[test]
    fn rejects_path_like_session_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path()).unwrap();
        assert!(matches!(
            repo.save("../escape", &snapshot(0)),
            Err(RepositoryError::InvalidSessionId(_))
        ));
        assert!(!repo.exists(""));
    }

    #[test]
    fn corrupted_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("session_broken.bin"), [1u8, 2, 3]).unwrap();
        assert!(matches!(
            repo.load("broken"),
            Err(RepositoryError::Serialization(_))
        ));
    }
}
