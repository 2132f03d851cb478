//! Configuration loading for the GenUI cache service.
//!
//! Config lives at `~/.genui/config.json` and every section supports partial
//! deserialization via `#[serde(default)]`, so a config file only needs to
//! name the fields it overrides. The cache scratch directory can also be
//! overridden with the `GENUI_CACHE_DIR` environment variable, which takes
//! precedence over the config file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GenUiError, Result};

/// Environment variable overriding the cache scratch directory.
pub const CACHE_DIR_ENV: &str = "GENUI_CACHE_DIR";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cache scratch directory settings.
    pub cache: CacheConfig,
    /// Retrieval API server settings.
    pub server: ServerConfig,
}

/// Settings for the artifact cache scratch directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Scratch directory holding the two slot artifacts.
    ///
    /// `None` means the default of `~/.genui/cache`.
    pub dir: Option<PathBuf>,
}

/// Settings for the retrieval API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (default: 127.0.0.1).
    pub bind: String,
    /// Listen port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 9090,
        }
    }
}

impl Config {
    /// The GenUI home directory: `~/.genui`.
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".genui")
    }

    /// Path to the config file: `~/.genui/config.json`.
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration from disk, falling back to defaults when the file
    /// does not exist. A present-but-malformed file is an error rather than
    /// a silent fallback.
    pub fn load() -> Result<Self> {
        let path = Self::path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path).map_err(|e| GenUiError::io(&path, e))?;
        serde_json::from_str(&data)
            .map_err(|e| GenUiError::Config(format!("Failed to parse {:?}: {}", path, e)))
    }

    /// Resolve the cache scratch directory.
    ///
    /// Priority: `GENUI_CACHE_DIR` env var, then `cache.dir` from the config
    /// file, then `~/.genui/cache`.
    pub fn cache_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        self.cache
            .dir
            .clone()
            .unwrap_or_else(|| Self::dir().join("cache"))
    }
}
