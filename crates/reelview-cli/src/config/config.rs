//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `catalog.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog client settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Catalog client configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// TMDB API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Image base URL override.
    #[serde(default)]
    pub image_base_url: Option<String>,
    /// Response language (e.g. "en-US").
    #[serde(default)]
    pub language: Option<String>,
    /// Whole-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

impl CatalogConfig {
    /// Returns the API key, preferring a non-blank `env_value`.
    #[must_use]
    pub fn effective_api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .filter(|k| !k.trim().is_empty())
    }
}
