use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "ADVGPT_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings read from an `advgpt.toml` file. Command line flags win over
/// anything set here.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Author written into games created with `advgpt new`.
    pub author: Option<String>,
    /// Check item references when validating.
    pub check_items: bool,
    /// Report engine capacity overruns when validating.
    pub engine_limits: bool,
}

impl Config {
    /// Parse config text; `path` is only used in errors.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load the config from `explicit`, else from `$ADVGPT_CONFIG`, else use
/// defaults. A named file that cannot be read is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => return Ok(Config::default()),
        },
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = Config::from_toml(&path, &content)?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}
