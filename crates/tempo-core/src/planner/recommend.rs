//! Resolving recommendations back to goals and sessions.

use jiff::civil;
use serde::Serialize;

use super::eligibility::eligible_goals;
use super::scoring::{score_breakdown, ScoreBreakdown};
use crate::models::{DailyPlan, Goal, GoalSession, PlannerPreferences};

/// The goal best suited to work on right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub goal: Goal,
    pub session: GoalSession,
    pub breakdown: ScoreBreakdown,
}

impl Recommendation {
    pub fn score(&self) -> f64 {
        self.breakdown.total()
    }
}

/// Maps the plan's top-three ids, in order, to their sessions.
///
/// Returns `None` when the plan has no shortlist or none of its ids has a
/// session.
pub fn recommended_sessions(plan: &DailyPlan, sessions: &[GoalSession]) -> Option<Vec<GoalSession>> {
    let ids = plan.top_three_recommendations.as_ref()?;
    let resolved: Vec<GoalSession> = ids
        .iter()
        .filter_map(|id| sessions.iter().find(|s| &s.goal_id == id))
        .cloned()
        .collect();
    (!resolved.is_empty()).then_some(resolved)
}

/// Picks the eligible goal with the highest recommendation score.
///
/// Ties go to the more urgent goal.
pub fn next_goal(
    goals: &[Goal],
    sessions: &[GoalSession],
    now: civil::DateTime,
    preferences: &PlannerPreferences,
) -> Option<Recommendation> {
    let mut best: Option<Recommendation> = None;
    for candidate in eligible_goals(goals, sessions, now) {
        let breakdown = score_breakdown(&candidate.goal, Some(&candidate.session), now, preferences);
        let better = match &best {
            Some(current) => breakdown.total() > current.score(),
            None => true,
        };
        if better {
            best = Some(Recommendation {
                goal: candidate.goal,
                session: candidate.session,
                breakdown,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalStatus, TimeOfDay};

    fn goal(id: &str, preferred: Vec<TimeOfDay>) -> Goal {
        Goal {
            id: id.to_string(),
            title: id.to_uppercase(),
            weekly_target_secs: 7 * 3600,
            notifications_enabled: false,
            preferred_times: preferred,
            schedule: vec![],
            status: GoalStatus::Active,
            weekly_progress_percent: 0.0,
        }
    }

    fn session(id: &str) -> GoalSession {
        GoalSession {
            goal_id: id.to_string(),
            date: civil::date(2026, 10, 19),
            elapsed_secs: 0,
            daily_target_secs: 3600,
            planned_start_time: None,
        }
    }

    #[test]
    fn resolves_shortlist_in_order() {
        let plan = DailyPlan {
            top_three_recommendations: Some(vec![
                "c".to_string(),
                "missing".to_string(),
                "a".to_string(),
            ]),
            ..Default::default()
        };
        let sessions = vec![session("a"), session("b"), session("c")];
        let resolved = recommended_sessions(&plan, &sessions).expect("resolved");
        let ids: Vec<&str> = resolved.iter().map(|s| s.goal_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn shortlist_absent_or_unresolvable_is_none() {
        let sessions = vec![session("a")];
        assert!(recommended_sessions(&DailyPlan::default(), &sessions).is_none());

        let plan = DailyPlan {
            top_three_recommendations: Some(vec!["zzz".to_string()]),
            ..Default::default()
        };
        assert!(recommended_sessions(&plan, &sessions).is_none());
    }

    #[test]
    fn next_goal_prefers_time_of_day_match() {
        let goals = vec![
            goal("evening", vec![TimeOfDay::Evening]),
            goal("morning", vec![TimeOfDay::Morning]),
        ];
        let sessions = vec![session("evening"), session("morning")];
        let now = civil::date(2026, 10, 19).at(8, 0, 0, 0);

        let next = next_goal(&goals, &sessions, now, &PlannerPreferences::default())
            .expect("a recommendation");
        assert_eq!(next.goal.id, "morning");
        assert_eq!(next.breakdown.time_of_day, 30.0);
    }

    #[test]
    fn next_goal_is_none_without_eligible_goals() {
        let now = civil::date(2026, 10, 19).at(8, 0, 0, 0);
        assert!(next_goal(&[], &[], now, &PlannerPreferences::default()).is_none());
    }
}
