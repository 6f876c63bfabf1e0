//! Persistent default settings
//!
//! Front-ends read their starting values from a TOML file under the user's
//! config directory; command-line flags override them.

use crate::{
    MonkeyError, Result, APP_NAME, CONFIG_FILE, DEFAULT_FILE_PATH, DEFAULT_READ_BLOCK_BYTES,
    DEFAULT_TOTAL_MB, DEFAULT_WRITE_BLOCK_KB,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Unvalidated run parameters as a user supplied them.
///
/// Numbers are signed so that out-of-range input survives until a
/// front-end sanitizes it and can warn about the substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scratch file path
    pub file: String,
    /// Total megabytes to write
    pub size_mb: i64,
    /// Write block size in kilobytes
    pub write_block_kb: i64,
    /// Read block size in bytes
    pub read_block_bytes: i64,
    /// Whether front-ends show per-block progress
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: DEFAULT_FILE_PATH.to_string(),
            size_mb: DEFAULT_TOTAL_MB as i64,
            write_block_kb: DEFAULT_WRITE_BLOCK_KB as i64,
            read_block_bytes: DEFAULT_READ_BLOCK_BYTES as i64,
            show_progress: true,
        }
    }
}

impl Settings {
    /// Load settings from the standard config file location.
    /// Returns defaults if the file or the config directory doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_in(dirs::config_dir())
    }

    fn load_in(config_dir: Option<PathBuf>) -> Result<Self> {
        match config_dir {
            Some(dir) => Self::load_from(&dir.join(APP_NAME).join(CONFIG_FILE)),
            None => {
                debug!("No config directory on this platform, using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from an explicit path, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            MonkeyError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Self = toml::from_str(&content)?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save settings to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MonkeyError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|e| {
            MonkeyError::Config(format!(
                "Failed to write settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Standard settings file path: `$CONFIG_HOME/monkeytest/monkeytest.toml`
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            MonkeyError::Config("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
