//! Parameter structures shared by the CLI and MCP interfaces.
//!
//! [`PlanInput`] is the planner's own input. The request structs carry what
//! an interface lets a user override; with the `schema` feature they also
//! derive `JsonSchema` so the MCP layer can wrap them directly:
//!
//! ```ignore
//! #[derive(Deserialize, JsonSchema)]
//! #[serde(transparent)]
//! struct PlanRequestWrapper(tempo_core::params::PlanRequest);
//! ```

use jiff::{civil, Zoned};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{FocusMode, Goal, GoalSession, PlannerPreferences},
    store::GoalStore,
};

/// Everything one planning call looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInput {
    pub goals: Vec<Goal>,
    /// Sessions for the day being planned
    pub sessions: Vec<GoalSession>,
    pub now: civil::DateTime,
    pub preferences: PlannerPreferences,
}

impl PlanInput {
    /// Input with default preferences.
    pub fn new(goals: Vec<Goal>, sessions: Vec<GoalSession>, now: civil::DateTime) -> Self {
        Self {
            goals,
            sessions,
            now,
            preferences: PlannerPreferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: PlannerPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Loads goals and the sessions for `now`'s date from `store`.
    pub fn from_store(
        store: &dyn GoalStore,
        now: civil::DateTime,
        preferences: PlannerPreferences,
    ) -> Result<Self> {
        Ok(Self {
            goals: store.goals()?,
            sessions: store.sessions_on(now.date())?,
            now,
            preferences,
        })
    }
}

/// Parameters for generating a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct PlanRequest {
    /// Local date and time to plan for, e.g. "2026-10-19T09:30"; defaults to
    /// the current time
    #[serde(default)]
    pub now: Option<String>,
    /// Override for the maximum number of sessions
    #[serde(default)]
    pub max_sessions: Option<usize>,
    /// Override for the focus mode: deepWork, balanced or flexible
    #[serde(default)]
    pub focus_mode: Option<String>,
}

impl PlanRequest {
    /// Applies the overrides on top of `preferences`.
    pub fn apply(&self, mut preferences: PlannerPreferences) -> Result<PlannerPreferences> {
        if let Some(max) = self.max_sessions {
            preferences.max_sessions_per_day = max;
        }
        if let Some(mode) = &self.focus_mode {
            preferences.focus_mode = mode
                .parse::<FocusMode>()
                .map_err(|reason| PlannerError::invalid_input("focus_mode").with_reason(reason))?;
        }
        preferences.validate()?;
        Ok(preferences)
    }
}

/// Parameters naming one goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct GoalQuery {
    /// Goal identity
    pub goal_id: String,
    /// Local date and time to score at; defaults to the current time
    #[serde(default)]
    pub now: Option<String>,
}

/// Parameters that only pick a moment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct AtTime {
    /// Local date and time; defaults to the current time
    #[serde(default)]
    pub now: Option<String>,
}

/// Parses a local date-time such as `2026-10-19T09:30`, or returns the current
/// local time when `value` is `None`.
///
/// # Errors
///
/// Returns `PlannerError::InvalidInput` for unparsable values.
pub fn parse_now(value: Option<&str>) -> Result<civil::DateTime> {
    match value {
        None => Ok(Zoned::now().datetime()),
        Some(raw) => raw.trim().parse::<civil::DateTime>().map_err(|e| {
            PlannerError::invalid_input("now")
                .with_reason(format!("expected YYYY-MM-DDTHH:MM, got '{raw}': {e}"))
        }),
    }
}
