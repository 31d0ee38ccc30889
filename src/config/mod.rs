use std::{
    env, fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::currency::{CurrencyCode, MoneyFormat};
use crate::grid::{ViewMode, HISTORY_LIMIT};
use crate::utils::persistence::write_json_atomic;

const DEFAULT_DIR_NAME: &str = ".budget_grid";
const HOME_ENV: &str = "BUDGET_GRID_HOME";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Serde(String),
}

/// Returns the application data directory, defaulting to `~/.budget_grid`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default = "Config::default_grouping_separator")]
    pub grouping_separator: char,
    #[serde(default)]
    pub default_view: ViewMode,
    /// Month the grid starts at; the current month when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
    #[serde(default = "Config::default_history_limit")]
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            grouping_separator: Self::default_grouping_separator(),
            default_view: ViewMode::default(),
            reference_date: None,
            history_limit: Self::default_history_limit(),
        }
    }
}

impl Config {
    fn default_grouping_separator() -> char {
        ','
    }

    fn default_history_limit() -> usize {
        HISTORY_LIMIT
    }

    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat {
            currency: self.currency.clone(),
            grouping_separator: self.grouping_separator,
        }
    }

    pub fn reference_date_or_today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Loads and stores [`Config`] under the application directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        Ok(Self {
            path: config_dir.join(CONFIG_FILE),
        })
    }

    /// Missing files yield [`Config::default`].
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        write_json_atomic(&self.path, config).map_err(|err| match err {
            crate::errors::GridError::Io(io) => ConfigError::Io(io),
            other => ConfigError::Serde(other.to_string()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
