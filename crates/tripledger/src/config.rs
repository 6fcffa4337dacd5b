//! Configuration management for tripledger.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::access::{AccessGate, DEFAULT_ACCESS_NAME};
use crate::error::{Error, Result};
use crate::sheet::{DEFAULT_EXPORT_FILE, DEFAULT_FIRST_ROW, DEFAULT_SHEET_NAME};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "tripledger";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "ledger.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "TRIPREG_";

/// Longest worksheet name Excel accepts.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TRIPREG_`, sections split on `__`)
/// 2. TOML config file at `~/.config/tripledger/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Access gate configuration.
    pub access: AccessConfig,
    /// Spreadsheet import configuration.
    pub import: ImportConfig,
    /// Spreadsheet export configuration.
    pub export: ExportConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/tripledger/ledger.db`
    pub database_path: Option<PathBuf>,
}

/// Access gate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// The name admitted by the gate, compared ignoring case.
    pub name: String,
}

/// Spreadsheet import configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// 1-based row where trip data starts.
    pub first_row: u32,
}

/// Spreadsheet export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name used when no output path is given.
    pub file_name: String,
    /// Name of the exported worksheet.
    pub sheet_name: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_ACCESS_NAME.to_string(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            first_row: DEFAULT_FIRST_ROW,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the TOML file at `config_path` (or
    /// the default location) and `TRIPREG_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["USER"]).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.access.name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "access name must not be empty".to_string(),
            });
        }

        if self.import.first_row == 0 {
            return Err(Error::ConfigValidation {
                message: "first_row is 1-based and must be at least 1".to_string(),
            });
        }

        if self.export.file_name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "export file_name must not be empty".to_string(),
            });
        }

        let sheet = &self.export.sheet_name;
        if sheet.is_empty() || sheet.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::ConfigValidation {
                message: format!(
                    "sheet_name must be 1 to {MAX_SHEET_NAME_LEN} characters, got {sheet:?}"
                ),
            });
        }
        if sheet.contains(['[', ']', ':', '*', '?', '/', '\\']) {
            return Err(Error::ConfigValidation {
                message: format!("sheet_name contains a character Excel rejects: {sheet:?}"),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the export path, resolving the configured file name against the
    /// working directory when no explicit path is given.
    #[must_use]
    pub fn export_path(&self, output: Option<PathBuf>) -> PathBuf {
        output.unwrap_or_else(|| PathBuf::from(&self.export.file_name))
    }

    /// Build the access gate for the configured name.
    #[must_use]
    pub fn access_gate(&self) -> AccessGate {
        AccessGate::new(self.access.name.clone())
    }
}
