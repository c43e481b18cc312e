//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/hivesync/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/hivesync/` (~/.config/hivesync/)
//! - State/Logs: `$XDG_STATE_HOME/hivesync/` (~/.local/state/hivesync/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Remote records API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Sync behavior configuration
    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Transport variant for write calls.
///
/// The deployed endpoint variants disagree on whether a POST response is
/// readable. `Transparent` parses the server's envelope and can surface
/// server-side failures. `Opaque` mirrors the no-cors deployments: a
/// delivered request is always reported as success because the body cannot
/// be read — a server-side failure is invisible in this mode. This is an
/// accepted limitation of those deployments, not something the client can
/// detect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    #[default]
    Transparent,
    Opaque,
}

/// Remote records API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Endpoint URL of the spreadsheet-backed API
    /// (e.g., `https://script.google.com/macros/s/…/exec`)
    pub base_url: Option<String>,

    /// Read/write request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Double the timeout for slow links (the web client's mobile allowance)
    #[serde(default)]
    pub extended_timeouts: bool,

    /// Write transport variant, see [`WriteMode`]
    #[serde(default)]
    pub write_mode: WriteMode,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            extended_timeouts: false,
            write_mode: WriteMode::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

impl ApiConfig {
    /// Effective request deadline after the extended-timeout allowance.
    pub fn effective_timeout_secs(&self) -> u64 {
        if self.extended_timeouts {
            self.timeout_secs * 2
        } else {
            self.timeout_secs
        }
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.base_url.as_deref().map_or(true, |u| u.trim().is_empty()) {
            return Err(Error::Config("api.base_url is required".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sync behavior configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SyncConfig {
    /// Create a default apiary during bootstrap when none exist yet
    #[serde(default)]
    pub bootstrap_default_apiary: bool,

    /// Name used for the bootstrapped apiary
    #[serde(default = "default_apiary_name")]
    pub default_apiary_name: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            bootstrap_default_apiary: false,
            default_apiary_name: default_apiary_name(),
        }
    }
}

fn default_apiary_name() -> String {
    "Main Apiary".to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of rotated log files to keep; older files are pruned
    /// at startup
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/hivesync/config.toml` (~/.config/hivesync/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("hivesync").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/hivesync/` (~/.local/state/hivesync/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("hivesync")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/hivesync/hivesync.log` (~/.local/state/hivesync/hivesync.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("hivesync.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path behavior
    /// before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api.base_url.is_none());
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.write_mode, WriteMode::Transparent);
        assert!(!config.sync.bootstrap_default_apiary);
        assert_eq!(config.sync.default_apiary_name, "Main Apiary");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[api]
base_url = "https://script.example.com/macros/s/abc/exec"
timeout_secs = 15
write_mode = "opaque"

[sync]
bootstrap_default_apiary = true

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://script.example.com/macros/s/abc/exec")
        );
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.api.write_mode, WriteMode::Opaque);
        assert!(config.sync.bootstrap_default_apiary);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_api_config_validation() {
        // Missing base_url should fail
        let config = ApiConfig::default();
        assert!(config.validate().is_err());

        let config = ApiConfig {
            base_url: Some("https://script.example.com/exec".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = ApiConfig {
            base_url: Some("https://script.example.com/exec".to_string()),
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extended_timeouts_double_the_deadline() {
        let config = ApiConfig {
            base_url: Some("https://script.example.com/exec".to_string()),
            extended_timeouts: true,
            ..Default::default()
        };
        assert_eq!(config.effective_timeout_secs(), 20);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://script.example.com/exec\""
        )
        .unwrap();

        let config = Config::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://script.example.com/exec")
        );
        assert_eq!(config.api.timeout_secs, 10);
    }
}
