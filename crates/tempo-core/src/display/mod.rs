//! Markdown formatting for planner output.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! groups of values that have no model of their own get newtype wrappers
//! (see [`collections`]). All output is markdown, rendered by the CLI's
//! terminal renderer or passed through verbatim to MCP clients.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Formatted     │
//! │ (DailyPlan, ..) │───▶│ (EligibleGoals) │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types ([`EligibleGoals`])
//! - [`models`]: Display implementations for plans, goals and enums
//! - [`scores`]: Score breakdowns and recommendations
//!
//! ## Usage Examples
//!
//! ```rust
//! use tempo_core::models::{DailyPlan, PlannedSession};
//!
//! let plan = DailyPlan {
//!     sessions: vec![PlannedSession {
//!         id: "g1".to_string(),
//!         goal_title: "Spanish".to_string(),
//!         recommended_start_time: "09:30".to_string(),
//!         suggested_duration: 25,
//!         priority: 1,
//!         reasoning: "Furthest behind this week.".to_string(),
//!     }],
//!     top_three_recommendations: Some(vec!["g1".to_string()]),
//!     ..Default::default()
//! };
//! let output = plan.to_string();
//! assert!(output.contains("09:30 Spanish"));
//! assert!(output.contains("## Right now"));
//! ```

pub mod collections;
pub mod models;
pub mod scores;

pub use collections::EligibleGoals;
