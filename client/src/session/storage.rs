//! Durable storage backends for the session.
//!
//! The `{token, user}` pair is persisted as a JSON file with owner-only
//! permissions, with an in-memory backend for tests and embedders that
//! manage persistence themselves.

use crate::api::auth::models::User;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// The persisted session pair. Token and user are stored and cleared
/// together; a file holding only one of them is treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedSession {
    pub token: String,
    pub user: User,
}

/// A place to durably keep the session between runs.
pub trait SessionStorage: Send + Sync {
    /// Reads the stored session. Unreadable or unparsable contents read as
    /// absent.
    fn load(&self) -> Option<PersistedSession>;

    /// Writes the session, replacing any previous one.
    fn save(&self, session: &PersistedSession) -> io::Result<()>;

    /// Removes the stored session. Removing an absent session is fine.
    fn clear(&self) -> io::Result<()>;
}

/// File-backed storage at a configurable path (default
/// `~/.config/starter/session.json`).
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Option<PersistedSession> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Discarding unparsable session file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&self, session: &PersistedSession) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, contents)?;

        // The file holds a bearer token; keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory storage for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    inner: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Option<PersistedSession> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, session: &PersistedSession) -> io::Result<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::models::{Role, User};

    fn sample_session() -> PersistedSession {
        PersistedSession {
            token: "tok-123".to_string(),
            user: User {
                id: 7,
                email: "alice@example.com".to_string(),
                role: Role::User,
                email_verified: true,
                avatar_url: None,
            },
        }
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nested/session.json"));

        assert!(storage.load().is_none());

        let session = sample_session();
        storage.save(&session).unwrap();
        assert_eq!(storage.load(), Some(session));

        storage.clear().unwrap();
        assert!(storage.load().is_none());
        // Clearing twice is still fine.
        storage.clear().unwrap();
    }

    #[test]
    fn test_file_storage_discards_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json at all").unwrap();

        let storage = FileSessionStorage::new(path);
        assert!(storage.load().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileSessionStorage::new(path.clone());
        storage.save(&sample_session()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemorySessionStorage::new();
        assert!(storage.load().is_none());

        let session = sample_session();
        storage.save(&session).unwrap();
        assert_eq!(storage.load(), Some(session));

        storage.clear().unwrap();
        assert!(storage.load().is_none());
    }
}
