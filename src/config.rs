use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub list: ListConfig,
    pub page: PageConfig,
    pub font: FontConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListConfig {
    pub bullet: String,
    pub ordered_separator: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            bullet: "• ".to_string(),
            ordered_separator: ". ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub family: Option<String>,
    /// Typst length, e.g. `"11pt"`
    pub size: Option<String>,
}

impl Config {
    /// The config embedded at build time from `default_config.toml`.
    pub fn compiled_default() -> Self {
        // build.rs rejects a malformed file, so this only falls back if the
        // file parses as TOML but not as a config.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "loading config");
                Self::parse(&content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::compiled_default())
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
