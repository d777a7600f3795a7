use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry policy parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per operation (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Connection settings, loaded from `~/.config/rftp/config.toml` or built
/// from CLI flags. Immutable once a client is constructed from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtpConfig {
    /// Server hostname or address.
    pub host: String,
    /// Control port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Login user; anonymous when absent.
    #[serde(default)]
    pub user: Option<String>,
    /// Login credential; anonymous placeholder when absent.
    #[serde(default)]
    pub password: Option<String>,
    /// Socket read timeout in seconds (None = transport default).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Optional retry policy; built-in defaults are used when missing.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_port() -> u16 {
    21
}

impl Default for FtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 21,
            user: None,
            password: None,
            timeout_secs: None,
            retry: None,
        }
    }
}

impl FtpConfig {
    /// Login pair, falling back to anonymous.
    pub fn credentials(&self) -> (&str, &str) {
        (
            self.user.as_deref().unwrap_or("anonymous"),
            self.password.as_deref().unwrap_or("anonymous@"),
        )
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Concrete retry policy from the optional `[retry]` section.
    pub fn retry_policy(&self) -> RetryPolicy {
        match &self.retry {
            Some(retry) => RetryPolicy {
                max_attempts: retry.max_attempts,
                base_delay: Duration::from_secs_f64(retry.base_delay_secs.max(0.0)),
                max_delay: Duration::from_secs(retry.max_delay_secs),
            },
            None => RetryPolicy::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rftp")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FtpConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FtpConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FtpConfig = toml::from_str(&data)?;
    Ok(cfg)
}
