use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::proxy::ProxyConfig;

/// Retry parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts per request (0 = never send).
    pub count: u32,
    /// Flat wait between a failed attempt and the next one, in milliseconds.
    #[serde(default)]
    pub wait_ms: u64,
}

impl RetryConfig {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            count: 1,
            wait_ms: 0,
        }
    }
}

/// Client defaults loaded from `~/.config/reqchain/config.toml`.
///
/// Plain values come before tables so the struct serializes to valid TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Per-attempt timeout in seconds (None = no timeout).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Overrides the `User-Agent` header.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Log every failed attempt.
    #[serde(default)]
    pub debug: bool,
    /// Retry policy; if missing, requests are never retried and a builder
    /// keeps its own retry count.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Extra headers added to the built-in defaults.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Optional proxy for every request.
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(30),
            user_agent: None,
            debug: false,
            retry: Some(RetryConfig::default()),
            headers: HashMap::new(),
            proxy: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("reqchain")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClientConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClientConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<ClientConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ClientConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
