//! Goal model definition and related functionality.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{TimeOfDay, Weekday};

/// Seconds in one hour, used to express weekly targets in hours.
const SECS_PER_HOUR: f64 = 3600.0;

/// A personal goal with a weekly time target.
///
/// Goals are owned by the goal store and are never modified by the planner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Opaque identity, echoed verbatim by generation backends
    pub id: String,

    /// Human readable title
    pub title: String,

    /// Weekly target duration in seconds
    pub weekly_target_secs: u64,

    /// Whether the user wants reminders for this goal
    #[serde(default)]
    pub notifications_enabled: bool,

    /// Parts of the day the user prefers to work on this goal
    #[serde(default)]
    pub preferred_times: Vec<TimeOfDay>,

    /// Optional weekday/time-of-day schedule; empty means "any time"
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,

    /// Lifecycle status
    #[serde(default)]
    pub status: GoalStatus,

    /// Progress toward the weekly target in percent (0-100), supplied by the
    /// store
    #[serde(default)]
    pub weekly_progress_percent: f64,
}

impl Goal {
    /// Weekly target expressed in hours.
    pub fn weekly_hours(&self) -> f64 {
        self.weekly_target_secs as f64 / SECS_PER_HOUR
    }

    /// Daily share of the weekly target, in whole seconds.
    pub fn daily_target_secs(&self) -> u64 {
        self.weekly_target_secs / 7
    }

    /// Returns true if the goal declares an explicit schedule.
    pub fn has_schedule(&self) -> bool {
        !self.schedule.is_empty()
    }

    /// Returns true if the schedule allows working on the goal in the given
    /// weekday and bucket. Unscheduled goals are always allowed.
    pub fn is_scheduled_for(&self, weekday: Weekday, time_of_day: TimeOfDay) -> bool {
        !self.has_schedule()
            || self
                .schedule
                .iter()
                .any(|slot| slot.weekday == weekday && slot.time_of_day == time_of_day)
    }

    /// Preferred buckets for a particular weekday.
    ///
    /// When a schedule exists, the buckets of that weekday's slots win over
    /// the free-form `preferred_times`.
    pub fn preferred_times_on(&self, weekday: Weekday) -> Vec<TimeOfDay> {
        if self.has_schedule() {
            self.schedule
                .iter()
                .filter(|slot| slot.weekday == weekday)
                .map(|slot| slot.time_of_day)
                .collect()
        } else {
            self.preferred_times.clone()
        }
    }
}

/// One weekday/time-of-day slot of a goal schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ScheduleSlot {
    pub weekday: Weekday,
    pub time_of_day: TimeOfDay,
}

/// Type-safe enumeration of goal statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// Goal is being pursued
    #[default]
    Active,

    /// Goal is hidden and never planned
    Archived,

    /// Goal reached its overall objective
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Archived => "archived",
            GoalStatus::Completed => "completed",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "archived" => Ok(GoalStatus::Archived),
            "completed" => Ok(GoalStatus::Completed),
            _ => Err(format!("Invalid goal status: {s}")),
        }
    }
}
