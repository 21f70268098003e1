//! TOML configuration loading.
//!
//! Every field has a default, so a missing or empty file yields a client that
//! finds the socket the same way `swaymsg` does.

mod structs;

pub use structs::{ConnectionConfig, GeneralConfig, SocketConfig, Teardown};

use crate::internal;
use crate::level::Level;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Diagnostics.
    pub general: GeneralConfig,
    /// Socket path resolution overrides.
    pub socket: SocketConfig,
    /// Settings applied to both connections.
    pub connection: ConnectionConfig,
}

impl Config {
    /// Loads the user's config file from the default location.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, or the file can't
    /// be read or parsed.
    pub fn load() -> Result<Self, crate::Error> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Parses config from TOML text.
    ///
    /// # Errors
    /// Returns [`crate::Error::ConfigParse`] on invalid TOML or field types.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// `<config_dir>/sway/swaysock.conf`, next to sway's own config.
    ///
    /// # Errors
    /// Fails when the platform has no config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("sway").join("swaysock.conf"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Typed diagnostic level; unknown strings fall back to `Info`.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.general.level.parse().unwrap_or(Level::Info)
    }
}
