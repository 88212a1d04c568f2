//! Configuration persistence for the flashcards app.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration that persists between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The currently selected theme name.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Content file studied when no `--deck` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "sakura".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Result of [`Config::load_for_session`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// Where changes may be written back.
    pub save_path: Option<PathBuf>,
    /// Why the file on disk was ignored.
    pub error: Option<anyhow::Error>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            content: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bucket-flash")
            .join("config.toml")
    }

    /// Load config from disk, returning default if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Load config from `path` for an interactive run.
    ///
    /// A file that exists but cannot be read or parsed yields the defaults and
    /// no save path, so later changes never overwrite it.
    pub fn load_for_session(path: PathBuf) -> LoadedConfig {
        match Self::load_from(&path) {
            Ok(config) => LoadedConfig {
                config,
                save_path: Some(path),
                error: None,
            },
            Err(err) => LoadedConfig {
                config: Self::default(),
                save_path: None,
                error: Some(err),
            },
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }
}
