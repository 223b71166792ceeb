//! Validation of backend output against the eligible set.
//!
//! Backends are untrusted: a session survives only if it names an eligible
//! goal, carries a strict `HH:mm` start, a positive duration and a priority
//! in `1..=5`. Survivors get the goal's authoritative title, are ordered by
//! start time and capped at the session limit.

use std::collections::HashSet;

use log::debug;

use super::eligibility::EligibleGoal;
use crate::models::{parse_clock, DailyPlan, PlannedSession, PlannerPreferences};

const MAX_RECOMMENDATIONS: usize = 3;

/// A validated plan plus counts describing what was discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized {
    pub plan: DailyPlan,
    /// Sessions the backend sent
    pub received: usize,
    /// Sessions rejected or cut by the session cap
    pub dropped: usize,
}

/// Validates `plan` against the goals that were offered to the backend.
pub fn sanitize_plan(
    plan: DailyPlan,
    eligible: &[EligibleGoal],
    preferences: &PlannerPreferences,
) -> Sanitized {
    let received = plan.sessions.len();
    let mut seen = HashSet::new();

    let mut sessions: Vec<PlannedSession> = plan
        .sessions
        .into_iter()
        .filter_map(|session| {
            let Some(candidate) = eligible.iter().find(|e| e.goal.id == session.id) else {
                debug!("dropping session for unknown goal '{}'", session.id);
                return None;
            };
            if parse_clock(&session.recommended_start_time).is_none() {
                debug!(
                    "dropping session for '{}': bad start time '{}'",
                    session.id, session.recommended_start_time
                );
                return None;
            }
            if session.suggested_duration == 0 || !(1..=5).contains(&session.priority) {
                debug!("dropping session for '{}': out of range values", session.id);
                return None;
            }
            if !seen.insert(session.id.clone()) {
                debug!("dropping duplicate session for '{}'", session.id);
                return None;
            }
            Some(PlannedSession {
                goal_title: candidate.goal.title.clone(),
                ..session
            })
        })
        .collect();

    // HH:mm strings order chronologically; the sort is stable for equal times.
    sessions.sort_by(|a, b| a.recommended_start_time.cmp(&b.recommended_start_time));
    sessions.truncate(preferences.max_sessions_per_day);

    let top_three_recommendations = plan.top_three_recommendations.map(|ids| {
        let mut kept: Vec<String> = Vec::new();
        for id in ids {
            if sessions.iter().any(|s| s.id == id) && !kept.contains(&id) {
                kept.push(id);
            }
        }
        kept.truncate(MAX_RECOMMENDATIONS);
        kept
    });

    let dropped = received - sessions.len();
    Sanitized {
        plan: DailyPlan {
            sessions,
            overall_strategy: plan.overall_strategy,
            top_three_recommendations,
            recommendation_reasoning: plan.recommendation_reasoning,
        },
        received,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil;

    use super::*;
    use crate::models::{Goal, GoalSession, GoalStatus};

    fn candidate(id: &str) -> EligibleGoal {
        EligibleGoal {
            goal: Goal {
                id: id.to_string(),
                title: format!("Title {id}"),
                weekly_target_secs: 7 * 3600,
                notifications_enabled: false,
                preferred_times: vec![],
                schedule: vec![],
                status: GoalStatus::Active,
                weekly_progress_percent: 0.0,
            },
            session: GoalSession {
                goal_id: id.to_string(),
                date: civil::date(2026, 10, 19),
                elapsed_secs: 0,
                daily_target_secs: 3600,
                planned_start_time: None,
            },
            remaining_secs: 3600,
            urgency: 100.0,
        }
    }

    fn session(id: &str, start: &str) -> PlannedSession {
        PlannedSession {
            id: id.to_string(),
            goal_title: "whatever the model said".to_string(),
            recommended_start_time: start.to_string(),
            suggested_duration: 30,
            priority: 2,
            reasoning: "because".to_string(),
        }
    }

    fn eligible() -> Vec<EligibleGoal> {
        vec![candidate("a"), candidate("b"), candidate("c")]
    }

    #[test]
    fn drops_unknown_ids_and_bad_fields() {
        let plan = DailyPlan {
            sessions: vec![
                session("a", "10:00"),
                session("ghost", "10:30"),
                session("b", "9:15"),
                PlannedSession {
                    priority: 7,
                    ..session("c", "11:00")
                },
            ],
            ..Default::default()
        };

        let result = sanitize_plan(plan, &eligible(), &PlannerPreferences::default());
        assert_eq!(result.received, 4);
        assert_eq!(result.dropped, 3);
        assert_eq!(result.plan.sessions.len(), 1);
        assert_eq!(result.plan.sessions[0].id, "a");
        assert_eq!(result.plan.sessions[0].goal_title, "Title a");
    }

    #[test]
    fn sorts_chronologically_dedupes_and_caps() {
        let plan = DailyPlan {
            sessions: vec![
                session("c", "15:00"),
                session("a", "09:00"),
                session("a", "08:00"),
                session("b", "12:30"),
            ],
            ..Default::default()
        };
        let prefs = PlannerPreferences {
            max_sessions_per_day: 2,
            ..Default::default()
        };

        let result = sanitize_plan(plan, &eligible(), &prefs);
        let starts: Vec<&str> = result
            .plan
            .sessions
            .iter()
            .map(|s| s.recommended_start_time.as_str())
            .collect();
        assert_eq!(starts, vec!["09:00", "12:30"]);
        assert_eq!(result.dropped, 2);
    }

    #[test]
    fn top_three_only_references_planned_goals() {
        let plan = DailyPlan {
            sessions: vec![session("a", "09:00"), session("b", "10:00")],
            top_three_recommendations: Some(vec![
                "b".to_string(),
                "ghost".to_string(),
                "b".to_string(),
                "c".to_string(),
                "a".to_string(),
            ]),
            ..Default::default()
        };

        let result = sanitize_plan(plan, &eligible(), &PlannerPreferences::default());
        assert_eq!(
            result.plan.top_three_recommendations,
            Some(vec!["b".to_string(), "a".to_string()])
        );
    }
}
