use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use crate::provider::{ProviderId, brasilapi, viacep};

pub const DEFAULT_POSTAL_CODE: &str = "01153000";
pub const DEFAULT_TIMEOUT_MS: u64 = 1_000;

/// Endpoint settings for a single provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    pub base_url: String,
}

/// Top-level configuration stored on disk.
///
/// Every field has a production default, so an absent or partial config file
/// behaves like the built-in setup: both public providers, a one second
/// deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Postal code used when the CLI is invoked without one.
    #[serde(default = "default_postal_code")]
    pub default_postal_code: Option<String>,

    /// Overall race deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Example TOML:
    /// [providers.viacep]
    /// base_url = "http://viacep.com.br/ws"
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderEndpoint>,
}

fn default_postal_code() -> Option<String> {
    Some(DEFAULT_POSTAL_CODE.to_string())
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_providers() -> HashMap<String, ProviderEndpoint> {
    HashMap::from([
        (
            ProviderId::BrasilApi.as_str().to_string(),
            ProviderEndpoint { base_url: brasilapi::DEFAULT_BASE_URL.to_string() },
        ),
        (
            ProviderId::ViaCep.as_str().to_string(),
            ProviderEndpoint { base_url: viacep::DEFAULT_BASE_URL.to_string() },
        ),
    ])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_postal_code: default_postal_code(),
            timeout_ms: default_timeout_ms(),
            providers: default_providers(),
        }
    }
}

impl Config {
    /// Race deadline as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn has_provider(&self, id: ProviderId) -> bool {
        self.providers.contains_key(id.as_str())
    }

    /// Returns the configured base URL for a provider, if present.
    pub fn provider_base_url(&self, id: ProviderId) -> Option<&str> {
        self.providers.get(id.as_str()).map(|endpoint| endpoint.base_url.as_str())
    }

    /// Set/replace a provider endpoint.
    pub fn set_provider_base_url(&mut self, id: ProviderId, base_url: String) {
        self.providers.insert(id.as_str().to_string(), ProviderEndpoint { base_url });
    }

    /// Load config from disk, or return the built-in defaults if no file
    /// exists yet.
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
        let dirs = ProjectDirs::from("dev", "cep-task", "cep-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
