//! Bearer-token session store.
//!
//! The whole admin surface is gated by one opaque bearer token. The token is
//! never inspected client-side; it is read before every authorized call and
//! invalidated globally on logout or the first 401 response.
//!
//! [`SessionStore`] is the single accessor for that token - nothing else in
//! the crate touches the persisted credential, which keeps divergent copies
//! impossible and lets tests inject [`MemorySessionStore`].

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur while reading or writing the stored session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The token file could not be read or written.
    #[error("session storage error: {0}")]
    Io(#[from] io::Error),
}

/// Accessor for the persisted admin session token.
pub trait SessionStore: Send + Sync {
    /// Read the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<Option<SecretString>, SessionError>;

    /// Persist a new token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&self, token: &SecretString) -> Result<(), SessionError>;

    /// Remove the stored token. Removing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token store backed by a file on disk.
///
/// The native counterpart of the web dashboard's `localStorage` token entry:
/// a single opaque string, no expiry tracked client-side.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store persisting the token at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path the token is persisted at.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SecretString>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecretString::from(token.to_owned())))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &SecretString) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token.expose_secret())?;

        // Token files are credentials: owner-only on unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory token store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<SecretString>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(SecretString::from(token.to_owned()))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SecretString>, SessionError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &SecretString) -> Result<(), SessionError> {
        *self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_token_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("neurolab-session-{}-{name}", std::process::id()))
            .join("token")
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_token_path("round-trip");
        let store = FileSessionStore::new(path.clone());

        assert!(store.load().unwrap().is_none());

        store.save(&SecretString::from("tok-123")).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.expose_secret(), "tok-123");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let path = temp_token_path("clear-idempotent");
        let store = FileSessionStore::new(path);
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_surrounding_whitespace() {
        let path = temp_token_path("whitespace");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "  tok-456\n").unwrap();

        let store = FileSessionStore::new(path.clone());
        assert_eq!(store.load().unwrap().unwrap().expose_secret(), "tok-456");

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&SecretString::from("t")).unwrap();
        assert!(store.load().unwrap().is_some());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
