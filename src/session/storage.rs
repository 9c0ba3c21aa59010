//! Persistence collaborator for the session snapshot.
//!
//! The store only ever persists two values: the bearer token and the user
//! snapshot. [`MemoryStorage`] is the in-memory stand-in used by tests and
//! short-lived processes; [`FileStorage`] keeps the pair in a small JSON
//! file so a restart can resume the session.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::auth::AuthToken;
use crate::error::SessionGateError;
use crate::Result;

use super::UserProfile;

/// Key-value persistence for the token and user snapshot.
///
/// Reads happen once at startup; writes happen on successful login/register,
/// on profile updates, and (as a clear) on logout. Implementations must be
/// safe to share behind an `Arc`.
pub trait SessionStorage: Send + Sync {
    /// Read the persisted token, if any.
    fn load_token(&self) -> Result<Option<AuthToken>>;

    /// Persist the token.
    fn store_token(&self, token: &AuthToken) -> Result<()>;

    /// Read the persisted user snapshot, if any.
    fn load_user(&self) -> Result<Option<UserProfile>>;

    /// Persist the user snapshot.
    fn store_user(&self, user: &UserProfile) -> Result<()>;

    /// Drop both persisted values.
    fn clear(&self) -> Result<()>;
}

/// What actually gets serialized to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<AuthToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserProfile>,
}

/// In-memory storage, the database stand-in.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<PersistedSession>,
}

impl MemoryStorage {
    /// Create empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-seeded with a token/user pair, for startup tests.
    pub fn seeded(token: AuthToken, user: UserProfile) -> Self {
        Self {
            inner: RwLock::new(PersistedSession {
                token: Some(token),
                user: Some(user),
            }),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn load_token(&self) -> Result<Option<AuthToken>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SessionGateError::LockPoisoned)?;
        Ok(inner.token.clone())
    }

    fn store_token(&self, token: &AuthToken) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SessionGateError::LockPoisoned)?;
        inner.token = Some(token.clone());
        Ok(())
    }

    fn load_user(&self) -> Result<Option<UserProfile>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SessionGateError::LockPoisoned)?;
        Ok(inner.user.clone())
    }

    fn store_user(&self, user: &UserProfile) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SessionGateError::LockPoisoned)?;
        inner.user = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SessionGateError::LockPoisoned)?;
        *inner = PersistedSession::default();
        Ok(())
    }
}

/// JSON-file-backed storage.
///
/// The whole snapshot is rewritten on every store; at two small values this
/// is not worth anything cleverer. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the given file path.
    ///
    /// The file is created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> Result<PersistedSession> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(PersistedSession::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_snapshot(&self, snapshot: &PersistedSession) -> Result<()> {
        let content = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn load_token(&self) -> Result<Option<AuthToken>> {
        Ok(self.read_snapshot()?.token)
    }

    fn store_token(&self, token: &AuthToken) -> Result<()> {
        let mut snapshot = self.read_snapshot()?;
        snapshot.token = Some(token.clone());
        self.write_snapshot(&snapshot)
    }

    fn load_user(&self) -> Result<Option<UserProfile>> {
        Ok(self.read_snapshot()?.user)
    }

    fn store_user(&self, user: &UserProfile) -> Result<()> {
        let mut snapshot = self.read_snapshot()?;
        snapshot.user = Some(user.clone());
        self.write_snapshot(&snapshot)
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_empty_reads() {
        let storage = MemoryStorage::new();
        assert!(storage.load_token().unwrap().is_none());
        assert!(storage.load_user().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_and_load() {
        let storage = MemoryStorage::new();
        storage.store_token(&AuthToken::new("tok")).unwrap();
        storage.store_user(&UserProfile::new("u-1", "user")).unwrap();

        assert_eq!(storage.load_token().unwrap().unwrap().expose(), "tok");
        assert_eq!(storage.load_user().unwrap().unwrap().id, "u-1");
    }

    #[test]
    fn test_memory_clear() {
        let storage = MemoryStorage::seeded(AuthToken::new("tok"), UserProfile::new("u-1", "user"));
        storage.clear().unwrap();

        assert!(storage.load_token().unwrap().is_none());
        assert!(storage.load_user().unwrap().is_none());
    }

    #[test]
    fn test_file_missing_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));

        assert!(storage.load_token().unwrap().is_none());
        assert!(storage.load_user().unwrap().is_none());
    }

    #[test]
    fn test_file_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileStorage::new(&path);

        storage.store_token(&AuthToken::new("tok")).unwrap();
        storage
            .store_user(&UserProfile::new("u-1", "admin").with_name("Kim"))
            .unwrap();

        // Reopen from the same path to prove it actually hit disk
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.load_token().unwrap().unwrap().expose(), "tok");
        let user = reopened.load_user().unwrap().unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.name, "Kim");
    }

    #[test]
    fn test_file_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileStorage::new(&path);

        storage.store_token(&AuthToken::new("tok")).unwrap();
        assert!(path.exists());

        storage.clear().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine
        storage.clear().unwrap();
    }

    #[test]
    fn test_file_corrupt_content_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(storage.load_token().is_err());
    }
}
