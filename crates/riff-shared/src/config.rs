//! Configuration for riffctl and embedders.
//!
//! Lives in `~/.config/moodriff/config.toml` (override with `$RIFF_CONFIG`).
//! Every field has a default, so a missing file is a valid configuration.
//!
//! ```toml
//! [storage]
//! data_dir = "/home/me/.local/share/moodriff"
//!
//! [log]
//! level = "info"
//! ```

use crate::error::{Result, RiffError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "RIFF_CONFIG";
const APP_DIR: &str = "moodriff";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for progress, challenge and riff records
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiffConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl RiffConfig {
    /// `$RIFF_CONFIG`, else the user config directory
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`. A missing file gives defaults; unreadable or invalid
    /// TOML is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(RiffError::Config(format!("read {}: {}", path.display(), e))),
        };
        toml::from_str(&content)
            .map_err(|e| RiffError::Config(format!("parse {}: {}", path.display(), e)))
    }

    /// Configured data directory, else the user data directory
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = RiffConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, RiffConfig::default());
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();
        let config = RiffConfig::load_from(&path).unwrap();
        assert_eq!(config.log.level, "debug");
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_data_dir_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storage]\ndata_dir = \"/tmp/riffs\"\n").unwrap();
        let config = RiffConfig::load_from(&path).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/riffs"));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[log\nlevel = ").unwrap();
        assert!(matches!(RiffConfig::load_from(&path), Err(RiffError::Config(_))));
    }
}
