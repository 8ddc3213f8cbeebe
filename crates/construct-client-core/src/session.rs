//! Durable storage of the bearer token and the in-memory session built on it

use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{Arc, Mutex},
};

use construct_shared::{
    const_config::client::{CLIENT_RESTORED_USERNAME, CLIENT_TOKEN_STORAGE_KEY},
    log_err_as_warn,
    session::Session,
    token::AuthToken,
    uac::Username,
};
use tracing::{info, warn};

/// Minimal string key/value store that survives restarts of the client
pub trait KeyValueStorage: Debug + Send {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

/// Storage that only lives as long as the process
///
/// Clones share the same values which lets tests inspect what was persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn with_value(key: &str, value: &str) -> Self {
        let result = Self::default();
        result
            .values
            .lock()
            .expect("mutex poisoned")
            .insert(key.to_string(), value.to_string());
        result
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.lock().expect("mutex poisoned").get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .lock()
            .expect("mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.values.lock().expect("mutex poisoned").remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file_storage {
    use std::{collections::BTreeMap, path::PathBuf};

    use anyhow::Context as _;

    use super::KeyValueStorage;

    /// Stores all values as one RON map in a single file
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new<P: Into<PathBuf>>(path: P) -> Self {
            Self { path: path.into() }
        }

        fn read_all(&self) -> anyhow::Result<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let contents = std::fs::read_to_string(&self.path)
                .with_context(|| format!("failed to read storage file {:?}", self.path))?;
            if contents.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            ron::from_str(&contents)
                .with_context(|| format!("failed to parse storage file {:?}", self.path))
        }

        fn write_all(&self, values: &BTreeMap<String, String>) -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create folder {parent:?}"))?;
                }
            }
            let contents = ron::ser::to_string_pretty(values, Default::default())
                .context("failed to serialize storage to ron")?;
            std::fs::write(&self.path, contents)
                .with_context(|| format!("failed to write storage file {:?}", self.path))
        }
    }

    impl KeyValueStorage for FileStorage {
        fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            Ok(self.read_all()?.remove(key))
        }

        fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
            let mut values = self.read_all()?;
            values.insert(key.to_string(), value.to_string());
            self.write_all(&values)
        }

        fn remove(&mut self, key: &str) -> anyhow::Result<()> {
            let mut values = self.read_all()?;
            if values.remove(key).is_some() {
                self.write_all(&values)?;
            }
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file_storage::FileStorage;

/// Owns the current [`Session`] and keeps the token in durable storage in step
/// with it
#[derive(Debug)]
pub struct SessionStore {
    storage: Box<dyn KeyValueStorage>,
    session: Session,
}

impl SessionStore {
    /// Builds the session from what was persisted
    ///
    /// Never fails, storage that cannot be read is treated as holding no token.
    #[tracing::instrument]
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        let stored = match storage.get(CLIENT_TOKEN_STORAGE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(?e, "failed to read stored token, starting logged out");
                None
            }
        };
        let session = match stored.filter(|token| !token.is_empty()) {
            Some(token) => {
                info!("restored session from storage");
                let username = Username::try_from(CLIENT_RESTORED_USERNAME)
                    .expect("test ensures placeholder username is valid");
                Session::authenticated(token.into(), username)
            }
            None => Session::unauthenticated(),
        };
        Self { storage, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[tracing::instrument(skip(self))]
    pub fn save(&mut self, token: AuthToken, username: Username) {
        log_err_as_warn!(self.storage.set(CLIENT_TOKEN_STORAGE_KEY, token.as_str()));
        self.session = Session::authenticated(token, username);
    }

    #[tracing::instrument(skip(self))]
    pub fn clear(&mut self) {
        log_err_as_warn!(self.storage.remove(CLIENT_TOKEN_STORAGE_KEY));
        self.session = Session::unauthenticated();
    }

    pub(crate) fn set_loading(&mut self, is_loading: bool) {
        self.session.is_loading = is_loading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get(&self, _: &str) -> anyhow::Result<Option<String>> {
            anyhow::bail!("disk on fire")
        }

        fn set(&mut self, _: &str, _: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }

        fn remove(&mut self, _: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
    }

    #[test]
    fn load_without_token_is_unauthenticated() {
        // Act
        let store = SessionStore::load(Box::new(MemoryStorage::default()));

        // Assert
        assert_eq!(store.session(), &Session::unauthenticated());
    }

    #[test]
    fn load_with_token_restores_placeholder_user() {
        // Arrange
        let storage = MemoryStorage::with_value(CLIENT_TOKEN_STORAGE_KEY, "T");

        // Act
        let store = SessionStore::load(Box::new(storage));

        // Assert
        let session = store.session();
        assert_eq!(session.token, Some("T".into()));
        assert_eq!(session.username().unwrap().as_ref(), CLIENT_RESTORED_USERNAME);
        assert!(!session.is_loading);
    }

    #[test]
    fn load_with_unreadable_storage_is_unauthenticated() {
        let store = SessionStore::load(Box::new(BrokenStorage));
        assert_eq!(store.session(), &Session::unauthenticated());
    }

    #[test]
    fn save_then_clear_round_trip_through_storage() {
        // Arrange
        let storage = MemoryStorage::default();
        let mut store = SessionStore::load(Box::new(storage.clone()));

        // Act - Save
        store.save("T".into(), "bob".try_into().unwrap());

        // Assert - Persisted and authenticated
        assert_eq!(
            storage.get(CLIENT_TOKEN_STORAGE_KEY).unwrap().as_deref(),
            Some("T")
        );
        assert!(store.session().is_authenticated());

        // Act - Clear
        store.clear();

        // Assert - Removed and logged out
        assert!(storage.get(CLIENT_TOKEN_STORAGE_KEY).unwrap().is_none());
        assert_eq!(store.session(), &Session::unauthenticated());
    }

    #[test]
    fn storage_failures_do_not_stop_in_memory_updates() {
        let mut store = SessionStore::load(Box::new(BrokenStorage));

        store.save("T".into(), "bob".try_into().unwrap());
        assert!(store.session().is_authenticated());

        store.clear();
        assert!(!store.session().is_authenticated());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_storage_survives_reload() {
        // Arrange
        let path = std::env::temp_dir().join(format!(
            "construct-storage-{}-{}.ron",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let mut store = SessionStore::load(Box::new(FileStorage::new(&path)));

        // Act
        store.save("persisted".into(), "bob".try_into().unwrap());
        let reloaded = SessionStore::load(Box::new(FileStorage::new(&path)));

        // Assert
        assert_eq!(reloaded.session().token, Some("persisted".into()));

        // Cleanup
        let _ = std::fs::remove_file(path);
    }
}
