//! Client configuration management.
//!
//! Holds the deployment-time API location, the token storage backend and
//! the guarded routes. Configuration is read from
//! `~/.config/budget-client/config.json`, then `PUBLIC_API_BASE_URL` and
//! `PUBLIC_API_PATH_URL` from the environment override the file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::{FileStorage, KeyringStorage, MemoryStorage, TokenStorage};
use crate::navigation::Routes;

/// Application name used for config/data directory paths
const APP_NAME: &str = "budget-client";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "PUBLIC_API_BASE_URL";

/// Environment variable overriding the API path prefix
pub const PATH_PREFIX_ENV: &str = "PUBLIC_API_PATH_URL";

/// Where the session token is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub api_path_prefix: String,
    pub token_backend: TokenBackend,
    pub routes: Routes,
}

impl Config {
    /// Load from the default config file and the environment
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(PATH_PREFIX_ENV).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Replace the API location with deployment-time values when present
    pub fn apply_overrides(&mut self, base_url: Option<String>, path_prefix: Option<String>) {
        if let Some(base_url) = base_url.filter(|v| !v.is_empty()) {
            self.api_base_url = base_url;
        }
        if let Some(path_prefix) = path_prefix {
            self.api_path_prefix = path_prefix;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            anyhow::bail!(
                "API base URL is not configured (set {} or api_base_url in {})",
                BASE_URL_ENV,
                CONFIG_FILE
            );
        }
        if self.routes.login == self.routes.landing {
            anyhow::bail!("Login and landing routes must differ");
        }
        Ok(())
    }

    /// Build the token storage backend this config selects
    pub fn token_storage(&self) -> Result<Arc<dyn TokenStorage>> {
        let storage: Arc<dyn TokenStorage> = match self.token_backend {
            TokenBackend::File => Arc::new(FileStorage::new(Self::data_dir()?)),
            TokenBackend::Keyring => Arc::new(KeyringStorage::new()),
            TokenBackend::Memory => Arc::new(MemoryStorage::new()),
        };
        Ok(storage)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let data_dir =
            dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
