//! Configuration file loading for the command-line tool.
//!
//! Settings come from an optional `union-chess.toml`, looked up in the
//! current directory and then in its parents. Every field has a default,
//! so an empty or missing file is fine.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use union_core::PositionString;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "union-chess.toml";

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Game-state line used when `--position` is not given.
    pub start_position: String,
    /// Log level used when no `-v` flag is given.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_position: PositionString::STARTPOS.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads the nearest `union-chess.toml`, or the defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find(&std::env::current_dir()?) {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Finds the configuration file in `start` or the closest parent holding one.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|path| path.is_file())
    }
}
