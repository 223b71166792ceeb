//! Display for recommendation scores.

use std::fmt;

use crate::planner::{Recommendation, ScoreBreakdown, MAX_SCORE};

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Progress deficit: {:.1} / 40", self.progress_deficit)?;
        writeln!(f, "- Time of day: {:.1} / 30", self.time_of_day)?;
        writeln!(f, "- Focus mode: {:.1} / 20", self.focus_mode)?;
        writeln!(f, "- Planned time: {:.1} / 25", self.planned_time)?;
        writeln!(f, "- Notifications: {:.1} / 10", self.notifications)?;
        writeln!(f, "- **Total: {:.1} / {MAX_SCORE:.0}**", self.total())
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Next: {}", self.goal.title)?;
        writeln!(f)?;
        writeln!(
            f,
            "{} min left today, {:.0}% done.",
            self.session.remaining_secs() / 60,
            self.session.percent_complete()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_display_includes_total() {
        let breakdown = ScoreBreakdown {
            progress_deficit: 40.0,
            time_of_day: 15.0,
            focus_mode: 10.0,
            planned_time: 0.0,
            notifications: 10.0,
        };
        let output = breakdown.to_string();
        assert!(output.contains("Time of day: 15.0 / 30"));
        assert!(output.contains("**Total: 75.0 / 125**"));
    }
}
