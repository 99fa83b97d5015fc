use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

const APP_DIR: &str = "scan-assist";
const CONFIG_FILE: &str = "config.toml";

/// Client settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Prefix for every API path, e.g. `http://localhost:10000`.
    pub api_base: String,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve settings, highest priority first:
    /// 1. `--api-base` on the command line
    /// 2. an explicit `--config` file
    /// 3. the per-user config file, when it exists
    /// 4. built-in defaults
    pub fn resolve(cli_api_base: Option<&str>, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => {
                    log::debug!("loading config from {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        if let Some(base) = cli_api_base {
            config.api_base = base.to_string();
        }
        Ok(config)
    }
}

/// `<config dir>/scan-assist/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}
