//! Configuration management for Whiteout.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section is optional in the file; command-line flags take
//! precedence over anything set here.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Whiteout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion defaults (threshold, suffix, extensions, ...)
    pub convert: ConvertConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Report output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.whiteout.whiteout/config.toml
    /// - Linux: ~/.config/whiteout/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\whiteout\config\config.toml
    ///
    /// Falls back to ~/.whiteout/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "whiteout", "whiteout")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".whiteout").join("config.toml")
            })
    }

    /// Get the configured default output directory (with ~ expansion).
    ///
    /// `None` means "write next to the inputs".
    pub fn output_dir(&self) -> Option<PathBuf> {
        let raw = self.convert.output_dir.trim();
        if raw.is_empty() {
            return None;
        }
        let expanded = shellexpand::tilde(raw);
        Some(PathBuf::from(expanded.into_owned()))
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Lower-case extensions and strip any leading dots.
    fn normalize(&mut self) {
        self.convert.extensions = self
            .convert
            .extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect();
    }
}

/// Normalize a user-supplied extension: trimmed, lower-case, no leading dot.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
