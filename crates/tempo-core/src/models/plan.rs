//! Daily plan models, including the partial shapes emitted while streaming.

use jiff::civil;
use serde::{Deserialize, Serialize};

/// One recommended session in a daily plan.
///
/// The `id` is the identity of the goal the session is for; a plan holds at
/// most one session per goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedSession {
    /// Identity of the source goal
    pub id: String,

    /// Title of the source goal
    pub goal_title: String,

    /// Recommended start, zero-padded 24-hour `HH:mm`
    pub recommended_start_time: String,

    /// Suggested duration in minutes (at least 1)
    pub suggested_duration: u32,

    /// 1 (most urgent) through 5
    pub priority: u8,

    /// Free-text rationale
    pub reasoning: String,
}

impl PlannedSession {
    /// Parsed start time, or `None` if the stored string is not `HH:mm`.
    pub fn start_time(&self) -> Option<civil::Time> {
        parse_clock(&self.recommended_start_time)
    }
}

/// An ordered plan for the day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    /// Sessions in chronological order of recommended start time
    #[serde(default)]
    pub sessions: Vec<PlannedSession>,

    /// Overall strategy for the day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_strategy: Option<String>,

    /// Up to three goal identities to work on right now
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_three_recommendations: Option<Vec<String>>,

    /// Why the shortlist was chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_reasoning: Option<String>,
}

impl DailyPlan {
    /// Returns true if the plan contains no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Looks up the planned session for a goal.
    pub fn session_for(&self, goal_id: &str) -> Option<&PlannedSession> {
        self.sessions.iter().find(|s| s.id == goal_id)
    }
}

/// A session as emitted mid-stream; any field may still be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialPlannedSession {
    pub id: Option<String>,
    pub goal_title: Option<String>,
    pub recommended_start_time: Option<String>,
    pub suggested_duration: Option<u32>,
    pub priority: Option<u8>,
    pub reasoning: Option<String>,
}

impl PartialPlannedSession {
    /// Converts into a complete session if every required field is present.
    pub fn complete(&self) -> Option<PlannedSession> {
        Some(PlannedSession {
            id: self.id.clone()?,
            goal_title: self.goal_title.clone()?,
            recommended_start_time: self.recommended_start_time.clone()?,
            suggested_duration: self.suggested_duration?,
            priority: self.priority?,
            reasoning: self.reasoning.clone()?,
        })
    }
}

impl From<PlannedSession> for PartialPlannedSession {
    fn from(session: PlannedSession) -> Self {
        Self {
            id: Some(session.id),
            goal_title: Some(session.goal_title),
            recommended_start_time: Some(session.recommended_start_time),
            suggested_duration: Some(session.suggested_duration),
            priority: Some(session.priority),
            reasoning: Some(session.reasoning),
        }
    }
}

/// A cumulative snapshot of a plan that is still being generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialDailyPlan {
    pub sessions: Option<Vec<PartialPlannedSession>>,
    pub overall_strategy: Option<String>,
    pub top_three_recommendations: Option<Vec<String>>,
    pub recommendation_reasoning: Option<String>,
}

impl From<DailyPlan> for PartialDailyPlan {
    fn from(plan: DailyPlan) -> Self {
        Self {
            sessions: Some(plan.sessions.into_iter().map(Into::into).collect()),
            overall_strategy: plan.overall_strategy,
            top_three_recommendations: plan.top_three_recommendations,
            recommendation_reasoning: plan.recommendation_reasoning,
        }
    }
}

/// Formats a wall-clock time as zero-padded 24-hour `HH:mm`.
pub fn format_clock(time: civil::Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Parses a strict zero-padded 24-hour `HH:mm` string.
///
/// Anything else (`7:30`, `07:30:00`, `24:00`, `7.30pm`) yields `None`.
pub fn parse_clock(value: &str) -> Option<civil::Time> {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hour = (digits[0] - b'0') * 10 + (digits[1] - b'0');
    let minute = (digits[2] - b'0') * 10 + (digits[3] - b'0');
    civil::Time::new(hour as i8, minute as i8, 0, 0).ok()
}
