//! Per-day goal session records.

use jiff::civil;
use serde::{Deserialize, Serialize};

/// Tracking record for one goal on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalSession {
    /// Identity of the goal this session tracks
    pub goal_id: String,

    /// Day the session belongs to
    pub date: civil::Date,

    /// Time already spent on the goal today, in seconds
    #[serde(default)]
    pub elapsed_secs: u64,

    /// Target for the day, in seconds
    pub daily_target_secs: u64,

    /// Start time recorded by an earlier plan, if any
    #[serde(default)]
    pub planned_start_time: Option<civil::Time>,
}

impl GoalSession {
    /// Seconds still needed to reach the daily target (zero when met).
    pub fn remaining_secs(&self) -> u64 {
        self.daily_target_secs.saturating_sub(self.elapsed_secs)
    }

    /// Returns true when today's target has been reached.
    pub fn is_target_met(&self) -> bool {
        self.daily_target_secs > 0 && self.elapsed_secs >= self.daily_target_secs
    }

    /// Fraction of the daily target already completed, in percent (0-100).
    pub fn percent_complete(&self) -> f64 {
        if self.daily_target_secs == 0 {
            return 0.0;
        }
        (self.elapsed_secs as f64 / self.daily_target_secs as f64 * 100.0).min(100.0)
    }
}
