//! Core library for the Tempo goal session planner.
//!
//! Given a set of goals with weekly time targets, today's per-goal sessions,
//! the current time and a few preferences, the planner decides which goals
//! deserve attention, orders them, and produces a [`DailyPlan`] of sessions
//! with start times, durations, priorities and a "right now" shortlist.
//!
//! Small eligible sets are planned deterministically. Larger ones are handed
//! to a pluggable generation [`backend`], whose output is validated against
//! the goals it was shown before anyone sees it.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use jiff::civil;
//! use tempo_core::{
//!     backend::ScriptedBackend,
//!     models::{Goal, GoalSession, GoalStatus},
//!     DailyPlan, PlanInput, PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_backend(Arc::new(ScriptedBackend::with_plan(DailyPlan::default())))
//!     .build()?;
//!
//! let goal = Goal {
//!     id: "spanish".to_string(),
//!     title: "Spanish".to_string(),
//!     weekly_target_secs: 7 * 3600,
//!     notifications_enabled: false,
//!     preferred_times: vec![],
//!     schedule: vec![],
//!     status: GoalStatus::Active,
//!     weekly_progress_percent: 20.0,
//! };
//! let session = GoalSession {
//!     goal_id: "spanish".to_string(),
//!     date: civil::date(2026, 10, 19),
//!     elapsed_secs: 600,
//!     daily_target_secs: 3600,
//!     planned_start_time: None,
//! };
//!
//! let input = PlanInput::new(vec![goal], vec![session], civil::date(2026, 10, 19).at(9, 0, 0, 0));
//! let plan = planner.generate_daily_plan(&input).await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;
pub mod store;

// Re-export commonly used types
pub use backend::{Availability, BackendError, CommandBackend, PlanBackend, ScriptedBackend};
pub use config::{BackendConfig, Config};
pub use display::EligibleGoals;
pub use error::{PlannerError, Result};
pub use models::{
    DailyPlan, FocusMode, Goal, GoalSession, GoalStatus, PartialDailyPlan, PlannedSession,
    PlannerPreferences, PlanningHorizon, TimeOfDay, Weekday,
};
pub use params::{parse_now, AtTime, GoalQuery, PlanInput, PlanRequest};
pub use planner::{
    EligibleGoal, GenerationPhase, Planner, PlannerBuilder, PlannerState, Recommendation,
    ScoreBreakdown,
};
pub use store::{DayFile, GoalStore, JsonGoalStore};
