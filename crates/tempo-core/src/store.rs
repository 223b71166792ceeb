//! Goal and session persistence.
//!
//! The planner never writes goals or sessions; it reads them through
//! [`GoalStore`]. [`JsonGoalStore`] keeps everything in one JSON day file:
//!
//! ```json
//! {
//!   "goals": [{ "id": "g1", "title": "Spanish", "weekly_target_secs": 25200 }],
//!   "sessions": [{ "goal_id": "g1", "date": "2026-10-19", "daily_target_secs": 3600 }]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use jiff::civil;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{Goal, GoalSession},
};

/// Read access to goals and their per-day sessions.
pub trait GoalStore {
    /// All known goals, including archived ones.
    fn goals(&self) -> Result<Vec<Goal>>;

    /// Sessions recorded for `date`.
    fn sessions_on(&self, date: civil::Date) -> Result<Vec<GoalSession>>;
}

/// On-disk layout of the goals file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayFile {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub sessions: Vec<GoalSession>,
}

/// Goal store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonGoalStore {
    path: PathBuf,
}

impl JsonGoalStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Default goals file, `$XDG_DATA_HOME/tempo/goals.json`.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tempo")
            .place_data_file("goals.json")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole file.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the file cannot be read and
    /// `PlannerError::Serialization` if it is not a valid day file.
    pub fn load(&self) -> Result<DayFile> {
        let raw = fs::read_to_string(&self.path).map_err(|e| PlannerError::FileSystem {
            path: self.path.clone(),
            source: e,
        })?;
        let day: DayFile = serde_json::from_str(&raw)?;
        debug!(
            "loaded {} goal(s) and {} session(s) from {}",
            day.goals.len(),
            day.sessions.len(),
            self.path.display()
        );
        Ok(day)
    }
}

impl GoalStore for JsonGoalStore {
    fn goals(&self) -> Result<Vec<Goal>> {
        Ok(self.load()?.goals)
    }

    fn sessions_on(&self, date: civil::Date) -> Result<Vec<GoalSession>> {
        Ok(self
            .load()?
            .sessions
            .into_iter()
            .filter(|s| s.date == date)
            .collect())
    }
}
