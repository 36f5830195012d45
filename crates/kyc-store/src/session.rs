//! Persisted login session
//!
//! The signed-in user is stored as a single JSON document. Stores are
//! injected into `AuthService` rather than reached through global state.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use shared_types::User;

use crate::error::SessionError;

pub trait SessionStore {
    /// The persisted user, if any
    fn load(&self) -> Result<Option<User>, SessionError>;

    fn save(&self, user: &User) -> Result<(), SessionError>;

    /// Remove any persisted user; clearing an empty store is not an error
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session kept only for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: RwLock<Option<User>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        Ok(self
            .user
            .read()
            .map_err(|_| SessionError::LockPoisoned)?
            .clone())
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        *self.user.write().map_err(|_| SessionError::LockPoisoned)? = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.user.write().map_err(|_| SessionError::LockPoisoned)? = None;
        Ok(())
    }
}

/// Session persisted as a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let user = serde_json::from_str(&raw)?;
        Ok(Some(user))
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
