//! Deterministic plans for trivially small eligible sets.
//!
//! With two or fewer eligible goals a generation backend adds latency without
//! adding value, so the plan is computed directly.

use jiff::{civil, SignedDuration};

use super::eligibility::EligibleGoal;
use crate::models::{format_clock, DailyPlan, PlannedSession, PlannerPreferences};

/// Eligible-set size at or below which the fallback builder is used.
pub const FALLBACK_THRESHOLD: usize = 2;

/// Gap between now and the first session, and between consecutive sessions.
const SESSION_SPACING_MINUTES: i64 = 30;
const MIN_DURATION_MINUTES: u64 = 5;
const MAX_RECOMMENDATIONS: usize = 3;

/// Builds a plan without consulting any backend.
///
/// Sessions follow eligibility order: the first starts 30 minutes from `now`
/// and each later one 30 minutes after its predecessor. Durations cover the
/// remaining daily target (at least 5 minutes) and every session gets
/// priority 1. A session that would start after 23:59 is left out, so the
/// plan never spills into the next day.
pub fn fallback_plan(
    eligible: &[EligibleGoal],
    now: civil::DateTime,
    preferences: &PlannerPreferences,
) -> DailyPlan {
    if eligible.is_empty() {
        return DailyPlan {
            sessions: Vec::new(),
            overall_strategy: Some(
                "Nothing needs attention right now: every goal is on track, already done for \
                 today, or outside its scheduled time."
                    .to_string(),
            ),
            top_three_recommendations: Some(Vec::new()),
            recommendation_reasoning: None,
        };
    }

    let planned: Vec<&EligibleGoal> = eligible
        .iter()
        .take(preferences.max_sessions_per_day)
        .collect();

    let sessions: Vec<PlannedSession> = planned
        .iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            let offset = SESSION_SPACING_MINUTES * (index as i64 + 1);
            let start = now
                .checked_add(SignedDuration::from_mins(offset))
                .ok()
                .filter(|start| start.date() == now.date())?;
            let remaining = candidate.remaining_minutes();
            Some(PlannedSession {
                id: candidate.goal.id.clone(),
                goal_title: candidate.goal.title.clone(),
                recommended_start_time: format_clock(start.time()),
                suggested_duration: remaining.max(MIN_DURATION_MINUTES) as u32,
                priority: 1,
                reasoning: session_reasoning(candidate),
            })
        })
        .collect();

    let strategy = if sessions.is_empty() {
        "Too little of the day is left to fit another session.".to_string()
    } else if sessions.len() == 1 {
        "Only one goal needs time today; a single focused session closes the gap.".to_string()
    } else {
        format!(
            "{} goals need time today; work through them back to back, most urgent first.",
            sessions.len()
        )
    };

    DailyPlan {
        top_three_recommendations: Some(
            sessions
                .iter()
                .take(MAX_RECOMMENDATIONS)
                .map(|s| s.id.clone())
                .collect(),
        ),
        recommendation_reasoning: sessions.first().map(|first| {
            format!(
                "Start with {} to make steady progress on today's target.",
                first.goal_title
            )
        }),
        overall_strategy: Some(strategy),
        sessions,
    }
}

fn session_reasoning(candidate: &EligibleGoal) -> String {
    if candidate.session.is_target_met() {
        format!("Maintain momentum on {}.", candidate.goal.title)
    } else {
        format!(
            "{} minutes left to reach today's target for {}.",
            candidate.remaining_minutes(),
            candidate.goal.title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, GoalSession, GoalStatus};

    fn candidate(id: &str, title: &str, remaining_secs: u64) -> EligibleGoal {
        EligibleGoal {
            goal: Goal {
                id: id.to_string(),
                title: title.to_string(),
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
                elapsed_secs: 3600 - remaining_secs,
                daily_target_secs: 3600,
                planned_start_time: None,
            },
            remaining_secs,
            urgency: 100.0,
        }
    }

    fn nine_am() -> civil::DateTime {
        civil::date(2026, 10, 19).at(9, 0, 0, 0)
    }

    #[test]
    fn empty_set_yields_explained_empty_plan() {
        let plan = fallback_plan(&[], nine_am(), &PlannerPreferences::default());
        assert!(plan.sessions.is_empty());
        assert!(plan.overall_strategy.is_some());
        assert_eq!(plan.top_three_recommendations, Some(vec![]));
        assert!(plan.recommendation_reasoning.is_none());
    }

    #[test]
    fn spaces_sessions_thirty_minutes_apart() {
        let eligible = vec![candidate("a", "Spanish", 1200), candidate("b", "Piano", 120)];
        let plan = fallback_plan(&eligible, nine_am(), &PlannerPreferences::default());

        assert_eq!(plan.sessions.len(), 2);
        assert_eq!(plan.sessions[0].recommended_start_time, "09:30");
        assert_eq!(plan.sessions[1].recommended_start_time, "10:00");
        assert_eq!(plan.sessions[0].suggested_duration, 20);
        // two minutes remaining is raised to the five minute floor
        assert_eq!(plan.sessions[1].suggested_duration, 5);
        assert!(plan.sessions.iter().all(|s| s.priority == 1));
        assert!(plan.sessions[0].reasoning.contains("20 minutes left"));
        assert_eq!(
            plan.top_three_recommendations,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(plan
            .recommendation_reasoning
            .as_deref()
            .is_some_and(|r| r.contains("Spanish")));
    }

    #[test]
    fn respects_session_cap() {
        let eligible = vec![candidate("a", "Spanish", 1200), candidate("b", "Piano", 600)];
        let prefs = PlannerPreferences {
            max_sessions_per_day: 1,
            ..Default::default()
        };
        let plan = fallback_plan(&eligible, nine_am(), &prefs);
        assert_eq!(plan.sessions.len(), 1);
        assert_eq!(plan.top_three_recommendations, Some(vec!["a".to_string()]));
    }

    #[test]
    fn is_deterministic() {
        let eligible = vec![candidate("a", "Spanish", 1200)];
        let prefs = PlannerPreferences::default();
        assert_eq!(
            fallback_plan(&eligible, nine_am(), &prefs),
            fallback_plan(&eligible, nine_am(), &prefs)
        );
    }

    #[test]
    fn sessions_past_midnight_are_left_out() {
        let eligible = vec![candidate("a", "Journal", 600), candidate("b", "Stretch", 600)];
        let late = civil::date(2026, 10, 19).at(23, 15, 0, 0);
        let plan = fallback_plan(&eligible, late, &PlannerPreferences::default());
        assert_eq!(plan.sessions.len(), 1);
        assert_eq!(plan.sessions[0].recommended_start_time, "23:45");
        assert_eq!(plan.top_three_recommendations, Some(vec!["a".to_string()]));

        let later = civil::date(2026, 10, 19).at(23, 45, 0, 0);
        let plan = fallback_plan(&eligible, later, &PlannerPreferences::default());
        assert!(plan.sessions.is_empty());
        assert!(plan.recommendation_reasoning.is_none());
        assert!(plan.overall_strategy.is_some());
    }
}
