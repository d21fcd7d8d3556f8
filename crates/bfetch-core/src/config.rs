use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Transport settings (`[transport]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Seconds allowed for establishing a connection.
    pub connect_timeout_secs: u64,
    /// Upper bound in seconds for one whole transfer.
    pub timeout_secs: u64,
    /// Maximum number of redirects followed per fetch.
    pub max_redirections: u32,
    /// Abort when the transfer stays below this many bytes/sec ...
    pub low_speed_limit: u32,
    /// ... for this many seconds.
    pub low_speed_time_secs: u64,
    /// Optional `User-Agent` header; libcurl sends none when unset.
    pub user_agent: Option<String>,
    /// Optional cap on body size in bytes (None = unlimited).
    pub max_body_bytes: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 300,
            max_redirections: 10,
            low_speed_limit: 1024,
            low_speed_time_secs: 60,
            user_agent: None,
            max_body_bytes: None,
        }
    }
}

impl TransportConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn low_speed_time(&self) -> Duration {
        Duration::from_secs(self.low_speed_time_secs)
    }
}

/// Global configuration loaded from `~/.config/bfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BfetchConfig {
    /// Default size of the fetch window (operations in flight at once).
    pub max_concurrency: usize,
    /// Transport settings; built-in defaults are used when the section is missing.
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Default for BfetchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            transport: TransportConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BfetchConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<BfetchConfig> {
    if !path.exists() {
        let default_cfg = BfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = BfetchConfig::default();
        assert_eq!(cfg.max_concurrency, 8);
        assert_eq!(cfg.transport.connect_timeout_secs, 30);
        assert_eq!(cfg.transport.max_redirections, 10);
        assert!(cfg.transport.user_agent.is_none());
        assert!(cfg.transport.max_body_bytes.is_none());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            max_concurrency = 3

            [transport]
            timeout_secs = 20
            user_agent = "bfetch/0.1"
            max_body_bytes = 1_000_000
        "#;
        let cfg: BfetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_concurrency, 3);
        assert_eq!(cfg.transport.timeout(), Duration::from_secs(20));
        assert_eq!(cfg.transport.user_agent.as_deref(), Some("bfetch/0.1"));
        assert_eq!(cfg.transport.max_body_bytes, Some(1_000_000));
        // Unset fields keep their defaults.
        assert_eq!(cfg.transport.connect_timeout_secs, 30);
    }

    #[test]
    fn config_toml_without_transport_section() {
        let cfg: BfetchConfig = toml::from_str("max_concurrency = 2").unwrap();
        assert_eq!(cfg.transport, TransportConfig::default());
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, BfetchConfig::default());
        assert!(path.exists());
        let again = load_or_init_at(&path).unwrap();
        assert_eq!(again, cfg);
    }
}
