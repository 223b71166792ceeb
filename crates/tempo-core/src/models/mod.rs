//! Data models for goals, sessions, preferences and plans.
//!
//! Goals and sessions are input records owned by the goal store; the planner
//! only reads them. Plans are produced by the planner and are immutable once
//! returned. Display implementations for these models live in
//! [`crate::display::models`].
//!
//! # Wire format
//!
//! - Goals and sessions use snake_case field names, matching the goal store
//!   day file.
//! - Preferences and plans use camelCase, matching the schema handed to the
//!   generation backend.
//! - Wall-clock values are `jiff::civil` types; plan start times are
//!   zero-padded `HH:mm` strings (see [`parse_clock`]).

pub mod goal;
pub mod plan;
pub mod preferences;
pub mod session;
pub mod time_of_day;


pub use goal::{Goal, GoalStatus, ScheduleSlot};
pub use plan::{
    format_clock, parse_clock, DailyPlan, PartialDailyPlan, PartialPlannedSession, PlannedSession,
};
pub use preferences::{FocusMode, PlannerPreferences, PlanningHorizon};
pub use session::GoalSession;
pub use time_of_day::{TimeOfDay, Weekday};
