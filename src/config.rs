//! Persistent configuration handling for clipclean.
//!
//! Persists configuration in a JSON file:
//! `~/.config/clipclean/config.json` (platform config dir via `dirs`).
//! Every field is optional; missing fields fall back to built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::actions::UiToggles;
use crate::cleaner::CleaningOptions;

const APP_CONFIG_DIR_NAME: &str = "clipclean";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No config directory available on this platform")]
    NoConfigDir,
    #[error("Unknown config key: {0}")]
    UnknownKey(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ERROR" => Some(Self::Error),
            "WARN" | "WARNING" => Some(Self::Warn),
            "INFO" => Some(Self::Info),
            "DEBUG" => Some(Self::Debug),
            "TRACE" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FullConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_whitespace: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_line_breaks: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_zero_width: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_invisible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_control_chars: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_non_printable: Option<bool>,
}

impl FullConfig {
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(LogLevel::from_str)
            .unwrap_or_default()
    }

    pub fn ui_toggles(&self) -> UiToggles {
        let defaults = UiToggles::default();
        UiToggles {
            preserve_whitespace: self
                .preserve_whitespace
                .unwrap_or(defaults.preserve_whitespace),
            remove_line_breaks: self
                .remove_line_breaks
                .unwrap_or(defaults.remove_line_breaks),
        }
    }

    /// Options the configured toggles and removal flags resolve to.
    pub fn cleaning_options(&self) -> CleaningOptions {
        let base = self.ui_toggles().to_options();
        CleaningOptions {
            remove_zero_width: self.remove_zero_width.unwrap_or(base.remove_zero_width),
            remove_invisible: self.remove_invisible.unwrap_or(base.remove_invisible),
            remove_control_chars: self
                .remove_control_chars
                .unwrap_or(base.remove_control_chars),
            remove_non_printable: self
                .remove_non_printable
                .unwrap_or(base.remove_non_printable),
            preserve_whitespace: base.preserve_whitespace,
        }
    }

    /// Sets one field from its string form. An empty value clears the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        if key == "log_level" {
            if value.is_empty() {
                self.log_level = None;
                return Ok(());
            }
            let level = LogLevel::from_str(value).ok_or_else(invalid)?;
            self.log_level = Some(level.as_filter().to_string());
            return Ok(());
        }

        let parsed = match value.trim().to_ascii_lowercase().as_str() {
            "" => None,
            "true" | "on" | "yes" | "1" => Some(true),
            "false" | "off" | "no" | "0" => Some(false),
            _ => return Err(invalid()),
        };
        let slot = match key {
            "preserve_whitespace" => &mut self.preserve_whitespace,
            "remove_line_breaks" => &mut self.remove_line_breaks,
            "remove_zero_width" => &mut self.remove_zero_width,
            "remove_invisible" => &mut self.remove_invisible,
            "remove_control_chars" => &mut self.remove_control_chars,
            "remove_non_printable" => &mut self.remove_non_printable,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        *slot = parsed;
        Ok(())
    }
}

pub fn config_path() -> Option<PathBuf> {
    let path = config_dir()?
        .join(APP_CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);
    Some(path)
}

fn ensure_config_dir_exists(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<FullConfig, ConfigError> {
    if !path.exists() {
        debug!(?path, "Config file does not exist, using defaults");
        return Ok(FullConfig::default());
    }

    let data = fs::read_to_string(path)?;
    let cfg = serde_json::from_str(&data)?;
    debug!(?path, "Config loaded");
    Ok(cfg)
}

pub fn save_config_to(path: &Path, cfg: &FullConfig) -> Result<(), ConfigError> {
    ensure_config_dir_exists(path)?;
    let data = serde_json::to_string_pretty(cfg)?;
    fs::write(path, data)?;
    debug!(?path, "Config saved");
    Ok(())
}

/// Loads the user config, falling back to defaults when it is missing or unreadable.
/// Runs before logging is set up, so failures go straight to stderr.
pub fn load_full_config() -> FullConfig {
    let Some(path) = config_path() else {
        return FullConfig::default();
    };

    match load_config_from(&path) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!(
                "Config: failed to load {}, using defaults: {err}",
                path.display()
            );
            FullConfig::default()
        }
    }
}
