//! Configuration management for scopelog

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::LogError;
use crate::logging::{
    BufferSettings, Component, Level, DEFAULT_CAPACITY_THRESHOLD, DEFAULT_LOG_PATH,
    DEFAULT_ROTATION_SIZE_BYTES,
};

/// Filter settings for one component
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentSettings {
    /// Minimum level: "trace", "info", "warn" or "error"
    #[serde(default = "default_level")]
    pub level: String,

    /// Allowed trace tags; empty means no tag filter
    #[serde(default)]
    pub tags: Vec<String>,
}

/// File sink settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSettings {
    /// Enable the file sink at startup
    #[serde(default)]
    pub enabled: bool,

    /// Destination path, relative to the storage root
    #[serde(default = "default_path")]
    pub path: String,

    /// Pending entries that trigger an automatic flush (default: 100)
    #[serde(default = "default_capacity_threshold")]
    pub capacity_threshold: usize,

    /// File size in bytes above which the next flush rotates (default: 5 MiB)
    #[serde(default = "default_rotation_size_bytes")]
    pub rotation_size_bytes: u64,
}

impl FileSettings {
    pub fn buffer_settings(&self) -> BufferSettings {
        BufferSettings {
            capacity_threshold: self.capacity_threshold,
            rotation_size_bytes: self.rotation_size_bytes,
        }
    }
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_path(),
            capacity_threshold: default_capacity_threshold(),
            rotation_size_bytes: default_rotation_size_bytes(),
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Master switch for all output
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Per-component settings keyed by component name
    #[serde(default)]
    pub components: BTreeMap<String, ComponentSettings>,

    #[serde(default)]
    pub file: FileSettings,
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_path() -> String {
    DEFAULT_LOG_PATH.to_string()
}

fn default_capacity_threshold() -> usize {
    DEFAULT_CAPACITY_THRESHOLD
}

fn default_rotation_size_bytes() -> u64 {
    DEFAULT_ROTATION_SIZE_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            components: BTreeMap::new(),
            file: FileSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
            config
                .resolve_components()
                .context("Invalid logging configuration")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Parse component names and levels, failing on the first unknown name
    pub fn resolve_components(&self) -> Result<Vec<(Component, Level, Vec<String>)>, LogError> {
        self.components
            .iter()
            .map(|(name, settings)| {
                let component = name.parse::<Component>()?;
                let level = settings.level.parse::<Level>()?;
                Ok((component, level, settings.tags.clone()))
            })
            .collect()
    }
}

/// Get the base configuration directory (~/.scopelog)
/// Falls back to ./.scopelog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".scopelog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".scopelog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}
