use crate::headers::HeaderSet;
use crate::key::{Endpoint, DEFAULT_ENDPOINT};
use crate::monitor::MonitorSettings;
use crate::retry::RetryPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per key (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds; the wait after failed attempt n is base * 2^n.
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
    /// Upper bound of the uniform random addend in seconds.
    pub jitter_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 1.0,
            max_delay_secs: 60,
            jitter_secs: 1.0,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> Result<RetryPolicy> {
        anyhow::ensure!(self.max_attempts >= 1, "retry.max_attempts must be at least 1");
        Ok(RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: secs("retry.base_delay_secs", self.base_delay_secs)?,
            max_delay: Duration::from_secs(self.max_delay_secs),
            jitter: secs("retry.jitter_secs", self.jitter_secs)?,
        })
    }
}

/// Global configuration loaded from `~/.config/lcmon/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LcmonConfig {
    /// WebSocket URI with a `{key}` placeholder.
    pub endpoint_template: String,
    /// Bound on connect, handshake and the wait for the message, in seconds.
    pub connect_timeout_secs: f64,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
    /// Optional header table. Replaces the browser-like defaults when present.
    pub headers: Option<BTreeMap<String, String>>,
}

impl Default for LcmonConfig {
    fn default() -> Self {
        Self {
            endpoint_template: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 15.0,
            retry: None,
            headers: None,
        }
    }
}

impl LcmonConfig {
    /// Resolve into the settings a monitor runs with.
    pub fn to_settings(&self) -> Result<MonitorSettings> {
        let retry = self.retry.clone().unwrap_or_default().to_policy()?;
        let headers = match &self.headers {
            Some(map) => HeaderSet::from(map.clone()),
            None => HeaderSet::browser(),
        };
        Ok(MonitorSettings {
            endpoint: Endpoint::new(self.endpoint_template.clone()),
            headers,
            connect_timeout: secs("connect_timeout_secs", self.connect_timeout_secs)?,
            retry,
        })
    }
}

fn secs(field: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).with_context(|| format!("{field} must be a non-negative number"))
}

/// Location of an existing config file, if any. Never creates directories.
pub fn config_path() -> Option<PathBuf> {
    match xdg::BaseDirectories::with_prefix("lcmon") {
        Ok(xdg_dirs) => xdg_dirs.find_config_file("config.toml"),
        Err(e) => {
            tracing::debug!("no XDG base directories: {}", e);
            None
        }
    }
}

/// Load the config file if one exists, else built-in defaults.
pub fn load() -> Result<LcmonConfig> {
    match config_path() {
        Some(path) => load_from_path(&path),
        None => Ok(LcmonConfig::default()),
    }
}

pub fn load_from_path(path: &Path) -> Result<LcmonConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: LcmonConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
