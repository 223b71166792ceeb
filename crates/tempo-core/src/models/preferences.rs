//! Planner preferences.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// How far ahead a plan should look.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum PlanningHorizon {
    #[default]
    RemainingDay,
    FullDay,
    NextDay,
}

impl PlanningHorizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningHorizon::RemainingDay => "remainingDay",
            PlanningHorizon::FullDay => "fullDay",
            PlanningHorizon::NextDay => "nextDay",
        }
    }

    /// Phrase used when describing the horizon in prompts.
    pub fn describe(&self) -> &'static str {
        match self {
            PlanningHorizon::RemainingDay => "the rest of today",
            PlanningHorizon::FullDay => "the whole of today",
            PlanningHorizon::NextDay => "tomorrow",
        }
    }
}

impl FromStr for PlanningHorizon {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "remainingday" => Ok(PlanningHorizon::RemainingDay),
            "fullday" => Ok(PlanningHorizon::FullDay),
            "nextday" => Ok(PlanningHorizon::NextDay),
            _ => Err(format!("Invalid planning horizon: {s}")),
        }
    }
}

/// How sessions should be shaped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FocusMode {
    /// Fewer, longer sessions
    DeepWork,
    #[default]
    Balanced,
    /// Many short sessions
    Flexible,
}

impl FocusMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FocusMode::DeepWork => "deepWork",
            FocusMode::Balanced => "balanced",
            FocusMode::Flexible => "flexible",
        }
    }

    /// Phrase used when describing the mode in prompts.
    pub fn describe(&self) -> &'static str {
        match self {
            FocusMode::DeepWork => "deep work: prefer fewer, longer sessions",
            FocusMode::Balanced => "balanced: mix longer and shorter sessions",
            FocusMode::Flexible => "flexible: prefer short sessions that fit between other things",
        }
    }
}

impl FromStr for FocusMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "deepwork" | "deep" => Ok(FocusMode::DeepWork),
            "balanced" => Ok(FocusMode::Balanced),
            "flexible" => Ok(FocusMode::Flexible),
            _ => Err(format!("Invalid focus mode: {s}")),
        }
    }
}

/// User preferences that shape generated plans.
///
/// `prefer_morning_sessions` and `avoid_evening_sessions` are advisory: they
/// are forwarded to the generation backend as soft preferences and are not
/// enforced by the scorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerPreferences {
    pub planning_horizon: PlanningHorizon,
    pub focus_mode: FocusMode,
    pub max_sessions_per_day: usize,
    pub minimum_break_minutes: u32,
    pub prefer_morning_sessions: bool,
    pub avoid_evening_sessions: bool,
}

impl Default for PlannerPreferences {
    fn default() -> Self {
        Self {
            planning_horizon: PlanningHorizon::RemainingDay,
            focus_mode: FocusMode::Balanced,
            max_sessions_per_day: 5,
            minimum_break_minutes: 15,
            prefer_morning_sessions: false,
            avoid_evening_sessions: false,
        }
    }
}

impl PlannerPreferences {
    /// Checks the preferences for values the planner cannot honour.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `max_sessions_per_day` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_sessions_per_day == 0 {
            return Err(PlannerError::invalid_input("maxSessionsPerDay")
                .with_reason("must be a positive integer"));
        }
        Ok(())
    }
}
