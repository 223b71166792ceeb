//! Folds streamed partial plans into publishable plans.
//!
//! Backends emit cumulative snapshots, so merging is last-write-wins: each
//! publishable plan is derived from the latest snapshot alone. Optional
//! fields absent from that snapshot are absent from the result, even if an
//! earlier snapshot carried them.

use log::debug;

use super::eligibility::EligibleGoal;
use super::validate::sanitize_plan;
use crate::models::{DailyPlan, PartialDailyPlan, PlannerPreferences};

/// Derives a plan from the latest snapshot.
///
/// Sessions missing any required field are discarded, the rest are validated
/// like a synchronous response. Returns `None` unless at least one complete,
/// valid session remains.
pub fn merge_snapshot(
    snapshot: &PartialDailyPlan,
    eligible: &[EligibleGoal],
    preferences: &PlannerPreferences,
) -> Option<DailyPlan> {
    let partial_sessions = snapshot.sessions.as_deref().unwrap_or_default();
    let sessions: Vec<_> = partial_sessions.iter().filter_map(|s| s.complete()).collect();
    let incomplete = partial_sessions.len() - sessions.len();
    if incomplete > 0 {
        debug!("ignoring {incomplete} incomplete streamed session(s)");
    }

    let candidate = DailyPlan {
        sessions,
        overall_strategy: snapshot.overall_strategy.clone(),
        top_three_recommendations: snapshot.top_three_recommendations.clone(),
        recommendation_reasoning: snapshot.recommendation_reasoning.clone(),
    };
    let sanitized = sanitize_plan(candidate, eligible, preferences);
    (!sanitized.plan.sessions.is_empty()).then_some(sanitized.plan)
}
