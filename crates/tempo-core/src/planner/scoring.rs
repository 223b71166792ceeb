//! Recommendation scoring: "how suited is this goal to work on right now".
//!
//! Independent of the urgency ranking used by eligibility filtering. The
//! scorer never rejects a goal; it only ranks. It is pure: the same goal,
//! session, time and preferences always yield the same score.

use jiff::civil;
use serde::Serialize;

use crate::models::{FocusMode, Goal, GoalSession, PlannerPreferences, TimeOfDay, Weekday};

/// Highest possible total score.
pub const MAX_SCORE: f64 =
    PROGRESS_BUDGET + TIME_MATCH_BUDGET + FOCUS_BUDGET + PROXIMITY_BUDGET + NOTIFICATION_BONUS;

const PROGRESS_BUDGET: f64 = 40.0;
const TIME_MATCH_BUDGET: f64 = 30.0;
const TIME_NEUTRAL: f64 = 15.0;
const FOCUS_BUDGET: f64 = 20.0;
const FOCUS_BALANCED: f64 = 10.0;
const PROXIMITY_BUDGET: f64 = 25.0;
const NOTIFICATION_BONUS: f64 = 10.0;

/// Weekly hours at which the focus-mode adjustment saturates.
const FOCUS_SATURATION_HOURS: f64 = 10.0;

/// Proximity awards as (max minutes from planned start, points).
const PROXIMITY_STEPS: [(i64, f64); 4] = [(15, 25.0), (30, 20.0), (60, 10.0), (120, 5.0)];

/// The five independent components of a recommendation score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// 0-40, how far behind the weekly target the goal is
    pub progress_deficit: f64,
    /// 0-30, whether now falls in a preferred part of the day
    pub time_of_day: f64,
    /// 0-20, fit with the configured focus mode
    pub focus_mode: f64,
    /// 0-25, closeness to a previously planned start time
    pub planned_time: f64,
    /// 0 or 10, notifications enabled
    pub notifications: f64,
}

impl ScoreBreakdown {
    /// Sum of all components, always within `[0, MAX_SCORE]`.
    pub fn total(&self) -> f64 {
        self.progress_deficit
            + self.time_of_day
            + self.focus_mode
            + self.planned_time
            + self.notifications
    }
}

/// Scores how recommended `goal` is at `now`.
pub fn score_session(
    goal: &Goal,
    session: Option<&GoalSession>,
    now: civil::DateTime,
    preferences: &PlannerPreferences,
) -> f64 {
    score_breakdown(goal, session, now, preferences).total()
}

/// Like [`score_session`], but returns each component separately.
pub fn score_breakdown(
    goal: &Goal,
    session: Option<&GoalSession>,
    now: civil::DateTime,
    preferences: &PlannerPreferences,
) -> ScoreBreakdown {
    ScoreBreakdown {
        progress_deficit: progress_deficit(goal),
        time_of_day: time_of_day_match(goal, now),
        focus_mode: focus_adjustment(goal, preferences.focus_mode),
        planned_time: planned_time_proximity(session, now),
        notifications: if goal.notifications_enabled {
            NOTIFICATION_BONUS
        } else {
            0.0
        },
    }
}

fn progress_deficit(goal: &Goal) -> f64 {
    let percent = if goal.weekly_progress_percent.is_finite() {
        goal.weekly_progress_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    (PROGRESS_BUDGET * (1.0 - percent / 100.0)).max(0.0)
}

fn time_of_day_match(goal: &Goal, now: civil::DateTime) -> f64 {
    let preferred = goal.preferred_times_on(Weekday::from(now.weekday()));
    if preferred.is_empty() {
        TIME_NEUTRAL
    } else if preferred.contains(&TimeOfDay::of(now.time())) {
        TIME_MATCH_BUDGET
    } else {
        0.0
    }
}

fn focus_adjustment(goal: &Goal, mode: FocusMode) -> f64 {
    let ratio = (goal.weekly_hours() / FOCUS_SATURATION_HOURS).clamp(0.0, 1.0);
    match mode {
        FocusMode::DeepWork => FOCUS_BUDGET * ratio,
        FocusMode::Flexible => FOCUS_BUDGET * (1.0 - ratio),
        FocusMode::Balanced => FOCUS_BALANCED,
    }
}

fn planned_time_proximity(session: Option<&GoalSession>, now: civil::DateTime) -> f64 {
    let Some(planned) = session.and_then(|s| s.planned_start_time) else {
        return 0.0;
    };
    let now_minutes = i64::from(now.hour()) * 60 + i64::from(now.minute());
    let planned_minutes = i64::from(planned.hour()) * 60 + i64::from(planned.minute());
    let distance = (now_minutes - planned_minutes).abs();

    PROXIMITY_STEPS
        .iter()
        .find(|(within, _)| distance <= *within)
        .map_or(0.0, |(_, points)| *points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalStatus, ScheduleSlot};

    fn now_at(hour: i8, minute: i8) -> civil::DateTime {
        civil::date(2026, 10, 19).at(hour, minute, 0, 0)
    }

    fn goal() -> Goal {
        Goal {
            id: "g".to_string(),
            title: "Guitar".to_string(),
            weekly_target_secs: 5 * 3600,
            notifications_enabled: false,
            preferred_times: vec![],
            schedule: vec![],
            status: GoalStatus::Active,
            weekly_progress_percent: 0.0,
        }
    }

    fn session_planned_at(hour: i8, minute: i8) -> GoalSession {
        GoalSession {
            goal_id: "g".to_string(),
            date: civil::date(2026, 10, 19),
            elapsed_secs: 0,
            daily_target_secs: 600,
            planned_start_time: Some(civil::time(hour, minute, 0, 0)),
        }
    }

    #[test]
    fn neutral_goal_scores_components() {
        let prefs = PlannerPreferences::default();
        let breakdown = score_breakdown(&goal(), None, now_at(9, 0), &prefs);
        assert_eq!(breakdown.progress_deficit, 40.0);
        assert_eq!(breakdown.time_of_day, TIME_NEUTRAL);
        assert_eq!(breakdown.focus_mode, FOCUS_BALANCED);
        assert_eq!(breakdown.planned_time, 0.0);
        assert_eq!(breakdown.notifications, 0.0);
        assert_eq!(breakdown.total(), 65.0);
    }

    #[test]
    fn progress_reduces_deficit() {
        let mut g = goal();
        g.weekly_progress_percent = 75.0;
        let prefs = PlannerPreferences::default();
        assert_eq!(score_breakdown(&g, None, now_at(9, 0), &prefs).progress_deficit, 10.0);

        g.weekly_progress_percent = 250.0;
        assert_eq!(score_breakdown(&g, None, now_at(9, 0), &prefs).progress_deficit, 0.0);

        g.weekly_progress_percent = f64::NAN;
        assert_eq!(score_breakdown(&g, None, now_at(9, 0), &prefs).progress_deficit, 40.0);
    }

    #[test]
    fn preferred_time_match_and_miss() {
        let mut g = goal();
        g.preferred_times = vec![TimeOfDay::Evening, TimeOfDay::Night];
        let prefs = PlannerPreferences::default();

        assert_eq!(score_breakdown(&g, None, now_at(18, 0), &prefs).time_of_day, 30.0);
        assert_eq!(score_breakdown(&g, None, now_at(22, 30), &prefs).time_of_day, 30.0);
        assert_eq!(score_breakdown(&g, None, now_at(8, 0), &prefs).time_of_day, 0.0);
    }

    #[test]
    fn schedule_defines_preferences_for_its_weekday_only() {
        let mut g = goal();
        g.preferred_times = vec![TimeOfDay::Evening];
        g.schedule = vec![ScheduleSlot {
            weekday: Weekday::Monday,
            time_of_day: TimeOfDay::Morning,
        }];
        let prefs = PlannerPreferences::default();

        // Monday: schedule says morning
        assert_eq!(score_breakdown(&g, None, now_at(7, 0), &prefs).time_of_day, 30.0);
        // Tuesday has no slots, so no preference applies
        let tuesday = civil::date(2026, 10, 20).at(7, 0, 0, 0);
        assert_eq!(score_breakdown(&g, None, tuesday, &prefs).time_of_day, TIME_NEUTRAL);
    }

    #[test]
    fn focus_mode_rewards_by_target_size() {
        let g = goal();
        let deep = PlannerPreferences {
            focus_mode: FocusMode::DeepWork,
            ..Default::default()
        };
        let flexible = PlannerPreferences {
            focus_mode: FocusMode::Flexible,
            ..Default::default()
        };
        assert_eq!(score_breakdown(&g, None, now_at(9, 0), &deep).focus_mode, 10.0);
        assert_eq!(score_breakdown(&g, None, now_at(9, 0), &flexible).focus_mode, 10.0);

        let mut big = goal();
        big.weekly_target_secs = 20 * 3600;
        assert_eq!(score_breakdown(&big, None, now_at(9, 0), &deep).focus_mode, 20.0);
        assert_eq!(score_breakdown(&big, None, now_at(9, 0), &flexible).focus_mode, 0.0);
    }

    #[test]
    fn proximity_steps() {
        let prefs = PlannerPreferences::default();
        let g = goal();
        let cases = [
            (9, 10, 25.0),
            (9, 15, 25.0),
            (9, 30, 20.0),
            (10, 0, 10.0),
            (11, 0, 5.0),
            (11, 1, 0.0),
            (8, 50, 25.0),
        ];
        for (hour, minute, expected) in cases {
            let session = session_planned_at(9, 0);
            let breakdown = score_breakdown(&g, Some(&session), now_at(hour, minute), &prefs);
            assert_eq!(breakdown.planned_time, expected, "at {hour}:{minute}");
        }
    }

    #[test]
    fn maximum_score_is_bounded() {
        let mut g = goal();
        g.notifications_enabled = true;
        g.preferred_times = vec![TimeOfDay::Morning];
        g.weekly_target_secs = 40 * 3600;
        let prefs = PlannerPreferences {
            focus_mode: FocusMode::DeepWork,
            ..Default::default()
        };
        let session = session_planned_at(8, 0);

        let score = score_session(&g, Some(&session), now_at(8, 0), &prefs);
        assert_eq!(score, MAX_SCORE);
        assert_eq!(MAX_SCORE, 125.0);
    }

    #[test]
    fn scores_stay_in_range_and_are_deterministic() {
        let modes = [FocusMode::DeepWork, FocusMode::Balanced, FocusMode::Flexible];
        for hour in 0..24 {
            for mode in modes {
                for progress in [-10.0, 0.0, 33.3, 100.0, 140.0] {
                    let mut g = goal();
                    g.weekly_progress_percent = progress;
                    g.preferred_times = vec![TimeOfDay::from_hour(hour)];
                    let prefs = PlannerPreferences {
                        focus_mode: mode,
                        ..Default::default()
                    };
                    let session = session_planned_at(12, 0);
                    let now = now_at(hour, 30);

                    let first = score_session(&g, Some(&session), now, &prefs);
                    let second = score_session(&g, Some(&session), now, &prefs);
                    assert_eq!(first, second);
                    assert!((0.0..=MAX_SCORE).contains(&first), "{first}");
                }
            }
        }
    }
}
