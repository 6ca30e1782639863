//! Durable key-value backends for the session token.
//!
//! Every backend stores the raw token string under a fixed key. A missing
//! key (or an empty value) means "no session".

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use keyring::Entry;

/// Key under which the session token is persisted
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Keychain service name used by [`KeyringStorage`]
const SERVICE_NAME: &str = "budget-client";

/// Owner read/write only
#[cfg(unix)]
const TOKEN_FILE_MODE: u32 = 0o600;

/// Durable storage slot for the session token.
///
/// Implementations may fail; the [`CredentialStore`](super::CredentialStore)
/// treats any failure as "no stored token".
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    fn remove(&self) -> Result<()>;
}

/// In-process storage. Clones share the same slots, so a second store built
/// from a clone behaves like the same browser after a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value currently held for the token key
    pub fn stored(&self) -> Option<String> {
        self.slots
            .lock()
            .ok()
            .and_then(|slots| slots.get(AUTH_TOKEN_KEY).cloned())
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory storage lock poisoned"))?;
        Ok(slots.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty()).cloned())
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory storage lock poisoned"))?;
        slots.insert(AUTH_TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory storage lock poisoned"))?;
        slots.remove(AUTH_TOKEN_KEY);
        Ok(())
    }
}

/// Stores the token as a plain file named after the key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(AUTH_TOKEN_KEY)
    }
}

impl TokenStorage for FileStorage {
    fn load(&self) -> Result<Option<String>> {
        let path = self.token_path();
        if !path.exists() {
            return Ok(None);
        }
        let token = std::fs::read_to_string(&path).context("Failed to read token file")?;
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token))
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create token directory")?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(TOKEN_FILE_MODE);

        let mut file = options
            .open(self.token_path())
            .context("Failed to open token file")?;
        // `mode` only applies on creation
        #[cfg(unix)]
        file.set_permissions(std::fs::Permissions::from_mode(TOKEN_FILE_MODE))
            .context("Failed to restrict token file permissions")?;
        file.write_all(token.as_bytes())
            .context("Failed to write token file")?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove token file")?;
        }
        Ok(())
    }
}

/// Stores the token in the OS keychain.
#[derive(Debug, Clone)]
pub struct KeyringStorage {
    service: String,
}

impl KeyringStorage {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, AUTH_TOKEN_KEY).context("Failed to create keyring entry")
    }
}

impl Default for KeyringStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStorage for KeyringStorage {
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) if token.is_empty() => Ok(None),
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve token from keychain"),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn remove(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}
