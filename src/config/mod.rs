//! Runtime configuration.
//!
//! Two layers feed the watcher:
//! - [`Config`]: poll interval and email switch, taken from the command line
//! - [`Settings`]: endpoint, retry and SMTP details, read from an optional
//!   `~/.config/fixture-watch/config.toml`; every key falls back to a default

pub mod email;

pub use email::{EmailCredentials, EmailSettings};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::fetcher::DEFAULT_ENDPOINT;

/// Longest polling interval, in minutes, that still fits in seconds.
pub const MAX_POLLING_INTERVAL: u64 = u64::MAX / 60;

/// Command-line derived settings, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub poll_interval_secs: u64,
    pub email_enabled: bool,
}

impl Config {
    pub fn from_minutes(minutes: u64, email_enabled: bool) -> Self {
        Self {
            poll_interval_secs: minutes.saturating_mul(60),
            email_enabled,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Format interval for display
    pub fn format_interval(secs: u64) -> String {
        if secs >= 86400 && secs.is_multiple_of(86400) {
            format!("{}d", secs / 86400)
        } else if secs >= 3600 && secs.is_multiple_of(3600) {
            format!("{}h", secs / 3600)
        } else if secs >= 60 && secs.is_multiple_of(60) {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }
}

/// File-backed settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Content API URL polled each cycle
    pub endpoint: String,
    /// Per-request timeout in seconds (default: 30)
    pub request_timeout_secs: u64,
    pub retry: RetrySettings,
    pub email: EmailSettings,
    pub desktop: DesktopSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 30,
            retry: RetrySettings::default(),
            email: EmailSettings::default(),
            desktop: DesktopSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Consecutive failures answered with a short delay (default: 10)
    pub max_retries: u32,
    /// Short delay between retries in seconds (default: 5)
    pub retry_delay_secs: u64,
    /// Return to short retries after a successful fetch (default: true)
    pub reset_on_success: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 10,
            retry_delay_secs: 5,
            reset_on_success: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DesktopSettings {
    /// Title shown on desktop notifications
    pub app_name: String,
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self {
            app_name: "Premier League Notifier".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// An explicitly given file must exist. A missing default file yields
    /// the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_config_path()?, false),
        };

        if !path.exists() {
            if required {
                return Err(ConfigError::Io {
                    path,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
                });
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
            other => other,
        })
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Get the default config file path: `~/.config/fixture-watch/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("fixture-watch").join("config.toml"))
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.endpoint).map_err(|e| ConfigError::Invalid {
            key: "endpoint",
            reason: e.to_string(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.endpoint_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: "endpoint",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.email.smtp_host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "email.smtp_host",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}
