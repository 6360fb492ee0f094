use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;
use crate::models::PLACEHOLDER_OWNER;

/// User configuration read from `config.toml`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Owner id stamped on created tasks.
    pub owner: String,
    /// Built-in theme name.
    pub theme: String,
    /// tracing filter directive, e.g. `debug` or `taskboard=trace`.
    pub log_level: Option<String>,
    /// Where the dashboard writes its logs.
    pub log_file: Option<PathBuf>,
    /// `#RRGGBB` overrides keyed by theme slot.
    pub colors: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            owner: PLACEHOLDER_OWNER.to_string(),
            theme: "classic".to_string(),
            log_level: None,
            log_file: None,
            colors: HashMap::new(),
        }
    }
}

/// Returns the path to the config file.
///
/// The path is determined in the following order:
/// 1. explicit `--config` override.
/// 2. `TASKBOARD_CONFIG` environment variable.
/// 3. `<config dir>/taskboard/config.toml`.
/// 4. `./config.toml` (fallback).
pub fn config_path(override_path: Option<&Path>) -> PathBuf {
    if let Some(p) = override_path {
        return p.to_path_buf();
    }
    std::env::var("TASKBOARD_CONFIG").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("taskboard");
        p.push("config.toml");
        p
    })
}

impl Config {
    /// Loads the config, falling back to defaults when the file does not exist.
    pub fn load(override_path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = config_path(override_path);
        if !path.exists() {
            return Ok(Config::default());
        }
        Config::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(config = %path.display(), "loaded config");
        Ok(cfg)
    }
}
