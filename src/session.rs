//! Authentication state.
//!
//! The session is an explicit object handed to every service. It is backed
//! by a [`SessionStore`]: a JSON file for the CLI, memory for tests. Three
//! keys are stored (access token, refresh token, serialized user); the
//! session counts as authenticated only when all three are present.

use crate::errors::{AppError, AppResult};
use crate::models::user::{LoginData, User};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// JSON-serialized [`User`].
    pub user: Option<String>,
}

impl StoredSession {
    pub fn is_complete(&self) -> bool {
        [&self.access_token, &self.refresh_token, &self.user]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> AppResult<StoredSession>;
    fn save(&self, session: &StoredSession) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

/// Session persisted as a small JSON file.
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
    fn load(&self) -> AppResult<StoredSession> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StoredSession::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, session: &StoredSession) -> AppResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        restrict_permissions(&self.path)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> AppResult<()> {
    Ok(())
}

#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<StoredSession>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> AppResult<StoredSession> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, session: &StoredSession) -> AppResult<()> {
        *self.inner.lock() = session.clone();
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.inner.lock() = StoredSession::default();
        Ok(())
    }
}

/// Session handle shared by the services of one command.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::default()))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileSessionStore::new(path)))
    }

    /// Unreadable sessions count as logged out.
    pub fn is_authenticated(&self) -> bool {
        self.store.load().map(|s| s.is_complete()).unwrap_or(false)
    }

    pub fn access_token(&self) -> AppResult<Option<String>> {
        Ok(self.store.load()?.access_token.filter(|t| !t.is_empty()))
    }

    pub fn require_token(&self) -> AppResult<String> {
        self.access_token()?.ok_or(AppError::NotAuthenticated)
    }

    pub fn current_user(&self) -> AppResult<Option<User>> {
        match self.store.load()?.user {
            Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }

    /// Persists the result of a successful login.
    pub fn establish(&self, login: &LoginData) -> AppResult<()> {
        let session = StoredSession {
            access_token: Some(login.access_token.clone()),
            refresh_token: Some(login.refresh_token.clone()),
            user: Some(serde_json::to_string(&login.user())?),
        };
        self.store.save(&session)
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> LoginData {
        LoginData {
            name: "Ana".into(),
            role: "admin".into(),
            profile_picture: None,
            access_token: "tok".into(),
            refresh_token: "ref".into(),
        }
    }

    #[test]
    fn memory_session_lifecycle() {
        let session = SessionContext::in_memory();
        assert!(!session.is_authenticated());
        assert!(matches!(
            session.require_token(),
            Err(AppError::NotAuthenticated)
        ));

        session.establish(&login()).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.require_token().unwrap(), "tok");
        assert_eq!(session.current_user().unwrap().unwrap().name, "Ana");

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.current_user().unwrap().is_none());
    }

    #[test]
    fn missing_refresh_token_is_not_authenticated() {
        let stored = StoredSession {
            access_token: Some("a".into()),
            refresh_token: None,
            user: Some("{}".into()),
        };
        assert!(!stored.is_complete());
    }

    #[test]
    fn file_session_persists() {
        let path = std::env::temp_dir().join("campusctl_unit_session.json");
        std::fs::remove_file(&path).ok();

        let session = SessionContext::file(&path);
        session.establish(&login()).unwrap();
        assert!(SessionContext::file(&path).is_authenticated());

        session.clear().unwrap();
        assert!(!path.exists());
    }
}
