use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::Arc};

use crate::{
    resolver::Resolver,
    source::{WeatherApiSource, weatherapi::DEFAULT_BASE_URL},
};

/// Environment variable that overrides the API key from the config file.
pub const API_KEY_ENV: &str = "WEATHERAPI_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.weatherapi.com/v1"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Overrides the weatherapi.com base URL, e.g. for a proxy.
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherview", "weatherview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Stores the API key; blank input clears it.
    pub fn set_api_key(&mut self, api_key: &str) {
        let api_key = api_key.trim();
        self.api_key = (!api_key.is_empty()).then(|| api_key.to_string());
    }

    /// Stores the base URL; blank input restores the default.
    pub fn set_base_url(&mut self, base_url: &str) {
        let base_url = base_url.trim();
        self.base_url = (!base_url.is_empty()).then(|| base_url.to_string());
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// API key from the environment, falling back to the config file.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env: Option<String>) -> Option<String> {
        env.filter(|k| !k.trim().is_empty()).or_else(|| self.api_key.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// Build the weatherapi.com source from this configuration.
    pub fn source(&self) -> Result<WeatherApiSource> {
        let api_key = self.api_key().ok_or_else(no_api_key)?;
        Ok(WeatherApiSource::with_base_url(api_key, self.base_url().to_string()))
    }

    /// Resolver over the configured source, using the local calendar date.
    pub fn resolver(&self) -> Result<Resolver> {
        Ok(Resolver::new(Arc::new(self.source()?)))
    }
}

fn no_api_key() -> anyhow::Error {
    anyhow!(
        "No weatherapi.com API key configured.\n\
         Hint: run `weatherview configure` or set {API_KEY_ENV}."
    )
}
