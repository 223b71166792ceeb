//! User configuration.
//!
//! Loaded from `$XDG_CONFIG_HOME/tempo/config.json` unless a path is given.
//! Every field is optional; a missing file means all defaults.
//!
//! ```json
//! {
//!   "preferences": { "focusMode": "deepWork", "maxSessionsPerDay": 4 },
//!   "backend": { "command": ["llm", "-m", "local"], "timeout_secs": 90 },
//!   "cache_validity_secs": 300
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::PlannerPreferences,
    store::JsonGoalStore,
};

const CONFIG_FILE: &str = "config.json";

/// Generation backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Program and arguments; empty means no backend
    pub command: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            timeout_secs: 60,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preferences: PlannerPreferences,
    pub backend: BackendConfig,
    /// How long a generated plan is reused, in seconds
    pub cache_validity_secs: u64,
    /// Goals file; defaults to `$XDG_DATA_HOME/tempo/goals.json`
    pub goals_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferences: PlannerPreferences::default(),
            backend: BackendConfig::default(),
            cache_validity_secs: 300,
            goals_file: None,
        }
    }
}

impl Config {
    /// Loads `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults; an explicitly given path must
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem`, `PlannerError::Serialization` or
    /// `PlannerError::InvalidInput` for unreadable, malformed or invalid
    /// configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::find_default() {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses one config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| PlannerError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("loaded config from {}", path.display());
        Ok(serde_json::from_str(&raw)?)
    }

    fn find_default() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("tempo").find_config_file(CONFIG_FILE)
    }

    /// Checks values the planner cannot honour.
    pub fn validate(&self) -> Result<()> {
        self.preferences.validate()?;
        if self.backend.timeout_secs == 0 {
            return Err(PlannerError::invalid_input("backend.timeout_secs")
                .with_reason("must be at least one second"));
        }
        if i64::try_from(self.cache_validity_secs).is_err() {
            return Err(PlannerError::invalid_input("cache_validity_secs")
                .with_reason("value is too large"));
        }
        Ok(())
    }

    /// The goals file to read, configured or default.
    pub fn goals_path(&self) -> Result<PathBuf> {
        match &self.goals_file {
            Some(path) => Ok(path.clone()),
            None => JsonGoalStore::default_path(),
        }
    }
}
