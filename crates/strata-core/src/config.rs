use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use strata_util::errors::StrataError;

/// Global user configuration loaded from `~/.strata/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub modules: ModulesConfig,

    #[serde(default)]
    pub check: CheckConfig,
}

/// Module discovery settings from `[modules]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesConfig {
    #[serde(default = "default_file_name", rename = "file-name")]
    pub file_name: String,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
        }
    }
}

fn default_file_name() -> String {
    crate::DEFAULT_MODULE_FILE.to_string()
}

/// Conflict check settings from `[check]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default = "default_fail_on_conflict", rename = "fail-on-conflict")]
    pub fail_on_conflict: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            fail_on_conflict: true,
        }
    }
}

fn default_fail_on_conflict() -> bool {
    true
}

impl GlobalConfig {
    /// Load the global configuration from `~/.strata/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load the configuration from an explicit path, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| StrataError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let config = toml::from_str(&content).map_err(|e| StrataError::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?;
        tracing::debug!("loaded global config from {}", path.display());
        Ok(config)
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the Strata data directory (`~/.strata/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".strata")
}
