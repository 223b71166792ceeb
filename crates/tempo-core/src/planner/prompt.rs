//! Renders eligible goals and preferences into a planning request.
//!
//! The prompt only ever mentions eligible goals, which keeps the backend's
//! output space (and its context and latency) bounded.

use std::fmt::Write;

use jiff::civil;

use super::eligibility::EligibleGoal;
use crate::models::{format_clock, PlannerPreferences, TimeOfDay, Weekday};

/// Titles longer than this are shortened in the prompt.
const MAX_TITLE_CHARS: usize = 80;

/// Builds the natural-language request for a generation backend.
pub fn build_prompt(
    eligible: &[EligibleGoal],
    now: civil::DateTime,
    preferences: &PlannerPreferences,
) -> String {
    let mut prompt = String::new();
    let weekday = Weekday::from(now.weekday());

    // Writing to a String cannot fail.
    let _ = writeln!(
        prompt,
        "Plan focused work sessions for {}.",
        preferences.planning_horizon.describe()
    );
    let _ = writeln!(
        prompt,
        "It is {} on {} ({}).",
        format_clock(now.time()),
        weekday.as_str(),
        now.date()
    );
    let _ = writeln!(prompt, "Focus mode: {}.", preferences.focus_mode.describe());
    let _ = writeln!(
        prompt,
        "Schedule at most {} sessions and leave at least {} minutes between sessions.",
        preferences.max_sessions_per_day, preferences.minimum_break_minutes
    );
    if preferences.prefer_morning_sessions {
        let _ = writeln!(prompt, "The user prefers morning sessions where possible.");
    }
    if preferences.avoid_evening_sessions {
        let _ = writeln!(prompt, "The user would rather not work in the evening.");
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Goals, most urgent first:");
    for candidate in eligible {
        let _ = writeln!(prompt, "- id: \"{}\"", candidate.goal.id);
        let _ = writeln!(prompt, "  title: {}", shorten(&candidate.goal.title));
        let _ = writeln!(
            prompt,
            "  remaining today: {} minutes",
            candidate.remaining_minutes()
        );
        let _ = writeln!(
            prompt,
            "  completed today: {:.0}%",
            candidate.session.percent_complete()
        );
        let preferred = candidate.goal.preferred_times_on(weekday);
        if !preferred.is_empty() {
            let _ = writeln!(prompt, "  preferred times: {}", join_times(&preferred));
        }
        if let Some(planned) = candidate.session.planned_start_time {
            let _ = writeln!(prompt, "  previously planned at: {}", format_clock(planned));
        }
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Rules:");
    let _ = writeln!(
        prompt,
        "- Copy each goal id exactly as written. Only plan the goals listed above."
    );
    let _ = writeln!(prompt, "- At most one session per goal.");
    let _ = writeln!(
        prompt,
        "- recommendedStartTime is 24-hour HH:mm, zero-padded, no earlier than {}.",
        format_clock(now.time())
    );
    let _ = writeln!(
        prompt,
        "- suggestedDuration is in minutes; do not exceed the time remaining for the goal."
    );
    let _ = writeln!(prompt, "- priority is 1 (most urgent) to 5.");
    let _ = writeln!(
        prompt,
        "- topThreeRecommendations lists up to 3 goal ids to start right now."
    );

    prompt
}

fn shorten(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        title.to_string()
    } else {
        let mut short: String = title.chars().take(MAX_TITLE_CHARS - 1).collect();
        short.push('…');
        short
    }
}

fn join_times(times: &[TimeOfDay]) -> String {
    times
        .iter()
        .map(TimeOfDay::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
