//! TOML-based application configuration.
//!
//! Runtime knobs for front ends, separate from the user's session
//! [`Settings`](crate::settings::Settings):
//! - display refresh (tick) interval
//! - how many history entries a front end lists by default
//! - default log filter
//!
//! Configuration is stored at `<data_dir>/config.toml`. A missing file
//! yields the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Milliseconds between display refreshes.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_history_display_limit")]
    pub history_display_limit: usize,
    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_tick_interval_ms() -> u64 {
    250
}
fn default_history_display_limit() -> usize {
    20
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            history_display_limit: default_history_display_limit(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        data_dir().ok().map(|dir| dir.join("config.toml"))
    }

    /// Load from `<data_dir>/config.toml`. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if config.tick_interval_ms == 0 {
            config.tick_interval_ms = default_tick_interval_ms();
        }
        Ok(config)
    }

    /// # Errors
    /// Returns an error if the file cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_err = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_err(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_err(e.to_string()))
    }
}
