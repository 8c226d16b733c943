//! Optional JSON configuration read from the platform config directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{DEFAULT_FIRST_NAME_MIN, RuleSet};

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for [`Config`].
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `first_name_min_len` must be at least 1.
    #[error("first_name_min_len must be at least 1, got {0}")]
    InvalidMinLength(usize),
}

/// User settings. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Minimum number of characters in the first name.
    pub first_name_min_len: usize,
    /// Default tracing filter, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_name_min_len: DEFAULT_FIRST_NAME_MIN,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default location: `<config dir>/contact-form/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("contact-form").join("config.json"))
    }

    /// Loads the config from [`Config::default_path`], falling back to
    /// defaults when there is no config directory or no file.
    #[mutants::skip]
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the config at `path`. A missing file yields defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Self = serde_json::from_str(&text)?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.first_name_min_len == 0 {
            return Err(ConfigError::InvalidMinLength(0));
        }
        Ok(self)
    }

    /// The rule set handed to the form controller.
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::with_first_name_min(self.first_name_min_len)
    }
}
