use std::sync::{Arc, RwLock, RwLockWriteGuard};

use tracing::{debug, warn};

use super::storage::TokenStorage;

/// Single holder of the session token, mirrored to durable storage.
///
/// Reads never touch storage. Writes replace the in-memory value and then
/// persist it synchronously. Storage failures are logged and otherwise
/// ignored: an unreadable slot is the same as an empty one.
pub struct CredentialStore {
    token: RwLock<Option<String>>,
    storage: Arc<dyn TokenStorage>,
}

impl CredentialStore {
    /// Create an empty store backed by `storage`. Call [`initialize`](Self::initialize)
    /// before handing it to other components.
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            token: RwLock::new(None),
            storage,
        }
    }

    /// Create a store and seed it from storage in one step
    pub fn initialized(storage: Arc<dyn TokenStorage>) -> Self {
        let store = Self::new(storage);
        store.initialize();
        store
    }

    /// Seed the in-memory token from storage. Never fails.
    pub fn initialize(&self) {
        let mut current = self.lock_mut();
        let loaded = match self.storage.load() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Token storage unavailable, starting without a session");
                None
            }
        };
        debug!(has_token = loaded.is_some(), "Credential store initialized");
        *current = loaded;
    }

    /// Current token, if any
    pub fn read(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replace the token and mirror it to storage. An empty string counts as absent.
    ///
    /// The lock is held across persistence so memory and storage always end
    /// up holding the value of the same write.
    pub fn write(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        let mut current = self.lock_mut();
        let persisted = match token.as_deref() {
            Some(t) => self.storage.save(t),
            None => self.storage.remove(),
        };
        if let Err(e) = persisted {
            warn!(error = %e, "Failed to persist session token");
        }
        *current = token;
    }

    /// Check whether a token is currently held
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    fn lock_mut(&self) -> RwLockWriteGuard<'_, Option<String>> {
        match self.token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
