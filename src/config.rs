//! Configuration
//!
//! Loaded from `<config_dir>/subplay/config.toml`. Every field has a default,
//! so a missing file or a partial file is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub player: PlayerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the processing service
    pub url: String,
    /// Request timeout for a submission (processing can be slow)
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            timeout_secs: 300,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Arrow-key seek step in seconds
    pub seek_step_secs: f64,
    /// Clock tick and redraw interval in milliseconds
    pub tick_ms: u64,
    /// Start playing as soon as a session loads
    pub auto_play: bool,
    /// Play audio through the output device (builds with the `audio` feature)
    pub audio: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: 5.0,
            tick_ms: 50,
            auto_play: false,
            audio: true,
        }
    }
}

impl PlayerConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.clamp(10, 1000))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive; RUST_LOG takes precedence
    pub level: String,
    /// Log file; empty means `<data_dir>/subplay/subplay.log`
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: String::new(),
        }
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("subplay").join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml_pretty()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml_pretty(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Effective log level (empty config value means `info`).
    pub fn log_level(&self) -> &str {
        if self.logging.level.trim().is_empty() {
            "info"
        } else {
            self.logging.level.as_str()
        }
    }

    /// Effective log file path.
    pub fn log_file(&self) -> Result<PathBuf> {
        if !self.logging.file.trim().is_empty() {
            return Ok(PathBuf::from(&self.logging.file));
        }
        let dir = dirs::data_local_dir().context("Could not determine data directory")?;
        Ok(dir.join("subplay").join("subplay.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://localhost:5000");
        assert_eq!(config.player.seek_step_secs, 5.0);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[player]\nauto_play = true\n").unwrap();
        assert!(config.player.auto_play);
        assert!(config.player.audio);
        assert_eq!(config.player.tick_ms, 50);
        assert_eq!(config.backend.timeout_secs, 300);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.backend.url = "http://media.local:8080".to_string();
        config.logging.level = "debug".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[player\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn tick_is_clamped() {
        let player = PlayerConfig {
            tick_ms: 1,
            ..Default::default()
        };
        assert_eq!(player.tick(), Duration::from_millis(10));
    }

    #[test]
    fn explicit_log_file_wins() {
        let mut config = Config::default();
        config.logging.file = "/tmp/x.log".to_string();
        assert_eq!(config.log_file().unwrap(), PathBuf::from("/tmp/x.log"));
    }
}
