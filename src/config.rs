use serde::{Deserialize, Serialize};
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use crate::error::VaultError;

/// Environment variable overriding [`VaultConfig::root`].
pub const VAULT_PATH_ENV: &str = "OBSIDIAN_VAULT_PATH";
/// Environment variable overriding [`ServerConfig::port`].
pub const VAULT_PORT_ENV: &str = "NOET_VAULT_PORT";

pub const DEFAULT_EXTENSION: &str = "md";
pub const DEFAULT_MAX_HOPS: usize = 2;
pub const DEFAULT_CHAR_LIMIT: usize = 100;
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.6;
pub const DEFAULT_FUZZY_MAX_MATCHES: usize = 3;
pub const DEFAULT_MAX_QUERY_WORDS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub root: PathBuf,
    /// File extension (without the dot) of documents picked up by [`crate::Vault::load_with`].
    pub extension: String,
    pub relevant: RelevantConfig,
    pub fuzzy: FuzzyConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
}

impl Default for VaultConfig {
    fn default() -> Self {
        VaultConfig {
            root: PathBuf::from("tests/fixtures/vault"),
            extension: DEFAULT_EXTENSION.to_string(),
            relevant: RelevantConfig::default(),
            fuzzy: FuzzyConfig::default(),
            search: SearchConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevantConfig {
    pub max_hops: usize,
    pub char_limit: usize,
}

impl Default for RelevantConfig {
    fn default() -> Self {
        RelevantConfig {
            max_hops: DEFAULT_MAX_HOPS,
            char_limit: DEFAULT_CHAR_LIMIT,
        }
    }
}

/// Constants for approximate term matching. See [`crate::fuzzy::close_matches`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Minimum similarity ratio in `[0, 1]` for a term to count as a match.
    pub cutoff: f64,
    /// Maximum number of index terms a fuzzy query expands to.
    pub max_matches: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        FuzzyConfig {
            cutoff: DEFAULT_FUZZY_CUTOFF,
            max_matches: DEFAULT_FUZZY_MAX_MATCHES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_query_words: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_query_words: DEFAULT_MAX_QUERY_WORDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl VaultConfig {
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        VaultConfig {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Read a TOML config file. A missing file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VaultError> {
        let path = path.as_ref();
        tracing::debug!("Attempting to read vault config from: {:?}", path);
        if !path.exists() {
            tracing::debug!("Config file not found, using defaults.");
            return Ok(VaultConfig::default());
        }
        let content = read_to_string(path)?;
        VaultConfig::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, VaultError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, VaultError> {
        Ok(toml::to_string(self)?)
    }

    /// Apply [`VAULT_PATH_ENV`] and [`VAULT_PORT_ENV`] from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, VaultError> {
        self.with_overrides(
            std::env::var(VAULT_PATH_ENV).ok(),
            std::env::var(VAULT_PORT_ENV).ok(),
        )
    }

    fn with_overrides(
        mut self,
        root: Option<String>,
        port: Option<String>,
    ) -> Result<Self, VaultError> {
        if let Some(root) = root.filter(|r| !r.trim().is_empty()) {
            tracing::debug!("{} overrides vault root: {}", VAULT_PATH_ENV, root);
            self.root = PathBuf::from(root);
        }
        if let Some(port) = port {
            self.server.port = port.trim().parse().map_err(|_| {
                VaultError::Command(format!("{VAULT_PORT_ENV} is not a valid port: {port:?}"))
            })?;
        }
        Ok(self)
    }
}
