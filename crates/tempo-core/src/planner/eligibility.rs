//! Eligibility filtering and urgency ranking.
//!
//! Reduces the full goal set to the goals worth planning right now, most
//! urgent first. Only these goals are ever shown to a generation backend.

use std::cmp::Ordering;

use jiff::civil;
use log::trace;

use crate::models::{Goal, GoalSession, GoalStatus, TimeOfDay, Weekday};

/// Maximum number of goals that survive filtering.
pub const MAX_ELIGIBLE_GOALS: usize = 10;

pub(crate) const MINUTES_PER_DAY: u64 = 24 * 60;

const DEFICIT_WEIGHT: f64 = 100.0;
const WEEKLY_HOURS_WEIGHT: f64 = 5.0;
const WEEKLY_TARGET_CAP: f64 = 50.0;
const DAY_PROGRESS_WEIGHT: f64 = 30.0;
const SCHEDULE_BONUS: f64 = 20.0;

/// A goal that qualifies for today's plan, with the data used to rank it.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleGoal {
    pub goal: Goal,
    pub session: GoalSession,
    /// Seconds still needed to reach the daily target
    pub remaining_secs: u64,
    /// Ranking value; higher is more urgent
    pub urgency: f64,
}

impl EligibleGoal {
    /// Remaining time in whole minutes, rounded down.
    pub fn remaining_minutes(&self) -> u64 {
        self.remaining_secs / 60
    }
}

/// Minutes elapsed since midnight.
pub(crate) fn minutes_since_midnight(now: civil::DateTime) -> u64 {
    (i64::from(now.hour()) * 60 + i64::from(now.minute())) as u64
}

/// Filters `goals` down to the ones worth planning at `now`, most urgent
/// first, capped at [`MAX_ELIGIBLE_GOALS`].
///
/// `sessions` are the tracking records for the target day; a goal without a
/// session (or with a zero daily target) is never eligible. Ties in urgency
/// keep the input order.
pub fn eligible_goals(
    goals: &[Goal],
    sessions: &[GoalSession],
    now: civil::DateTime,
) -> Vec<EligibleGoal> {
    let weekday = Weekday::from(now.weekday());
    let bucket = TimeOfDay::of(now.time());
    let elapsed_minutes = minutes_since_midnight(now);
    let minutes_left_today = MINUTES_PER_DAY.saturating_sub(elapsed_minutes);

    let mut eligible: Vec<EligibleGoal> = goals
        .iter()
        .filter_map(|goal| {
            if goal.status == GoalStatus::Archived {
                trace!("{}: archived", goal.id);
                return None;
            }

            let Some(session) = sessions.iter().find(|s| s.goal_id == goal.id) else {
                trace!("{}: no session for today", goal.id);
                return None;
            };
            if session.daily_target_secs == 0 {
                trace!("{}: no daily target", goal.id);
                return None;
            }
            if session.is_target_met() {
                trace!("{}: target already met", goal.id);
                return None;
            }

            let remaining_secs = session.remaining_secs();
            if remaining_secs / 60 < 1 {
                trace!("{}: less than a minute remaining", goal.id);
                return None;
            }
            if remaining_secs as f64 / 60.0 > 2.0 * minutes_left_today as f64 {
                trace!("{}: cannot fit in what is left of the day", goal.id);
                return None;
            }
            if !goal.is_scheduled_for(weekday, bucket) {
                trace!("{}: not scheduled for {} {}", goal.id, weekday.as_str(), bucket.as_str());
                return None;
            }

            let urgency = urgency_score(goal, session, elapsed_minutes);
            Some(EligibleGoal {
                goal: goal.clone(),
                session: session.clone(),
                remaining_secs,
                urgency,
            })
        })
        .collect();

    // sort_by is stable, so equal scores keep input order
    eligible.sort_by(|a, b| b.urgency.partial_cmp(&a.urgency).unwrap_or(Ordering::Equal));
    eligible.truncate(MAX_ELIGIBLE_GOALS);
    eligible
}

/// Urgency of a goal given its session and how far through the day we are.
///
/// Sum of: deficit against the daily target (0-100), weekly target size
/// (0-50), day progress (0-30) and a schedule bonus (20).
pub fn urgency_score(goal: &Goal, session: &GoalSession, minutes_since_midnight: u64) -> f64 {
    let deficit = if session.daily_target_secs > 0 {
        let behind = session.remaining_secs() as f64 / session.daily_target_secs as f64;
        DEFICIT_WEIGHT * behind.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let weekly = (goal.weekly_hours() * WEEKLY_HOURS_WEIGHT).min(WEEKLY_TARGET_CAP);
    let day_progress = DAY_PROGRESS_WEIGHT
        * (minutes_since_midnight.min(MINUTES_PER_DAY) as f64 / MINUTES_PER_DAY as f64);
    let schedule = if goal.has_schedule() { SCHEDULE_BONUS } else { 0.0 };

    deficit + weekly + day_progress + schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleSlot;

    fn now_at(hour: i8, minute: i8) -> civil::DateTime {
        // 2026-10-19 is a Monday
        civil::date(2026, 10, 19).at(hour, minute, 0, 0)
    }

    fn goal(id: &str, weekly_hours: u64) -> Goal {
        Goal {
            id: id.to_string(),
            title: format!("Goal {id}"),
            weekly_target_secs: weekly_hours * 3600,
            notifications_enabled: false,
            preferred_times: vec![],
            schedule: vec![],
            status: GoalStatus::Active,
            weekly_progress_percent: 0.0,
        }
    }

    fn session(goal_id: &str, elapsed: u64, target: u64) -> GoalSession {
        GoalSession {
            goal_id: goal_id.to_string(),
            date: civil::date(2026, 10, 19),
            elapsed_secs: elapsed,
            daily_target_secs: target,
            planned_start_time: None,
        }
    }

    #[test]
    fn meditation_scenario_is_eligible_with_full_deficit() {
        let mut meditation = goal("meditation", 0);
        meditation.title = "Meditation".to_string();
        meditation.weekly_target_secs = 3600;
        meditation.preferred_times = vec![TimeOfDay::Morning];
        let sessions = vec![session("meditation", 0, meditation.daily_target_secs())];

        let eligible = eligible_goals(&[meditation], &sessions, now_at(7, 0));

        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].remaining_secs, 514);
        assert_eq!(eligible[0].remaining_minutes(), 8);
        // full deficit (100) + 1h weekly (5) + 7:00 day progress (8.75)
        assert!((eligible[0].urgency - 113.75).abs() < 1e-9);
    }

    #[test]
    fn met_targets_are_never_eligible() {
        let goals: Vec<Goal> = (0..5).map(|i| goal(&i.to_string(), 2)).collect();
        let sessions: Vec<GoalSession> = (0..5)
            .map(|i| session(&i.to_string(), 1200 + i, 1200))
            .collect();

        assert!(eligible_goals(&goals, &sessions, now_at(12, 0)).is_empty());
    }

    #[test]
    fn requires_positive_target_and_session() {
        let goals = vec![goal("a", 1), goal("b", 1)];
        let sessions = vec![session("a", 0, 0)];
        assert!(eligible_goals(&goals, &sessions, now_at(9, 0)).is_empty());
    }

    #[test]
    fn requires_a_full_minute_remaining() {
        let goals = vec![goal("a", 1), goal("b", 1)];
        let sessions = vec![session("a", 550, 600), session("b", 540, 600)];
        let eligible = eligible_goals(&goals, &sessions, now_at(9, 0));
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].goal.id, "b");
    }

    #[test]
    fn rejects_work_that_cannot_fit_in_the_day() {
        let goals = vec![goal("a", 1)];
        // 23:00 leaves 60 minutes; 121 minutes remaining exceeds 2x that
        let too_long = vec![session("a", 0, 121 * 60)];
        assert!(eligible_goals(&goals, &too_long, now_at(23, 0)).is_empty());

        let fits = vec![session("a", 0, 120 * 60)];
        assert_eq!(eligible_goals(&goals, &fits, now_at(23, 0)).len(), 1);
    }

    #[test]
    fn archived_goals_are_skipped_but_completed_are_not() {
        let mut archived = goal("a", 1);
        archived.status = GoalStatus::Archived;
        let mut completed = goal("c", 1);
        completed.status = GoalStatus::Completed;
        let sessions = vec![session("a", 0, 600), session("c", 0, 600)];

        let eligible = eligible_goals(&[archived, completed], &sessions, now_at(9, 0));
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].goal.id, "c");
    }

    #[test]
    fn schedule_must_match_weekday_and_bucket() {
        let mut scheduled = goal("a", 1);
        scheduled.schedule = vec![ScheduleSlot {
            weekday: Weekday::Monday,
            time_of_day: TimeOfDay::Evening,
        }];
        let sessions = vec![session("a", 0, 600)];

        assert!(eligible_goals(&[scheduled.clone()], &sessions, now_at(9, 0)).is_empty());
        let eligible = eligible_goals(&[scheduled], &sessions, now_at(18, 0));
        assert_eq!(eligible.len(), 1);
        assert!(eligible[0].urgency >= SCHEDULE_BONUS);
    }

    #[test]
    fn night_bucket_is_reachable_for_schedules() {
        let mut late = goal("a", 1);
        late.schedule = vec![ScheduleSlot {
            weekday: Weekday::Monday,
            time_of_day: TimeOfDay::Night,
        }];
        let sessions = vec![session("a", 0, 600)];
        assert_eq!(eligible_goals(&[late], &sessions, now_at(22, 0)).len(), 1);
    }

    #[test]
    fn sorts_by_urgency_and_keeps_input_order_on_ties() {
        let goals = vec![goal("low", 1), goal("tie-1", 2), goal("high", 1), goal("tie-2", 2)];
        let sessions = vec![
            session("low", 500, 600),
            session("tie-1", 300, 600),
            session("high", 0, 600),
            session("tie-2", 300, 600),
        ];

        let ids: Vec<String> = eligible_goals(&goals, &sessions, now_at(10, 0))
            .into_iter()
            .map(|e| e.goal.id)
            .collect();
        assert_eq!(ids, vec!["high", "tie-1", "tie-2", "low"]);
    }

    #[test]
    fn truncates_to_the_ten_most_urgent() {
        let goals: Vec<Goal> = (0..14).map(|i| goal(&format!("g{i}"), 1)).collect();
        // later goals are further behind, so more urgent
        let sessions: Vec<GoalSession> = (0..14)
            .map(|i| session(&format!("g{i}"), 1400 - i * 100, 1400))
            .collect();

        let eligible = eligible_goals(&goals, &sessions, now_at(10, 0));
        assert_eq!(eligible.len(), MAX_ELIGIBLE_GOALS);
        assert_eq!(eligible[0].goal.id, "g13");
        assert!(eligible.iter().all(|e| e.goal.id != "g0"));
        assert!(eligible.windows(2).all(|w| w[0].urgency >= w[1].urgency));
    }

    #[test]
    fn weekly_weight_is_capped() {
        let big = goal("big", 40);
        let session = session("big", 0, 600);
        let score = urgency_score(&big, &session, 0);
        assert!((score - (DEFICIT_WEIGHT + WEEKLY_TARGET_CAP)).abs() < 1e-9);
    }
}
