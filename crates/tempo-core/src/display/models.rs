//! Display implementations for domain models.

use std::fmt;

use crate::models::{
    DailyPlan, FocusMode, Goal, GoalStatus, PlannedSession, PlanningHorizon, TimeOfDay, Weekday,
};
use crate::planner::GenerationPhase;

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(
    TimeOfDay,
    Weekday,
    GoalStatus,
    FocusMode,
    PlanningHorizon,
    GenerationPhase,
);

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "- ID: `{}`", self.id)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Weekly target: {:.1} h", self.weekly_hours())?;
        writeln!(f, "- Weekly progress: {:.0}%", self.weekly_progress_percent)?;
        if !self.preferred_times.is_empty() {
            let times: Vec<&str> = self.preferred_times.iter().map(TimeOfDay::as_str).collect();
            writeln!(f, "- Preferred times: {}", times.join(", "))?;
        }
        if self.has_schedule() {
            let slots: Vec<String> = self
                .schedule
                .iter()
                .map(|slot| format!("{} {}", slot.weekday, slot.time_of_day))
                .collect();
            writeln!(f, "- Schedule: {}", slots.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for PlannedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} {} ({} min, priority {})",
            self.recommended_start_time, self.goal_title, self.suggested_duration, self.priority
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.reasoning)?;
        writeln!(f)
    }
}

impl fmt::Display for DailyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan")?;
        writeln!(f)?;

        if self.sessions.is_empty() {
            writeln!(f, "No sessions planned.")?;
            writeln!(f)?;
        } else {
            writeln!(f, "## Sessions")?;
            writeln!(f)?;
            for session in &self.sessions {
                write!(f, "{session}")?;
            }
        }

        if let Some(strategy) = &self.overall_strategy {
            writeln!(f, "## Strategy")?;
            writeln!(f)?;
            writeln!(f, "{strategy}")?;
            writeln!(f)?;
        }

        if let Some(ids) = self.top_three_recommendations.as_ref().filter(|ids| !ids.is_empty()) {
            writeln!(f, "## Right now")?;
            writeln!(f)?;
            for (rank, id) in ids.iter().enumerate() {
                match self.session_for(id) {
                    Some(session) => writeln!(
                        f,
                        "{}. {} at {}",
                        rank + 1,
                        session.goal_title,
                        session.recommended_start_time
                    )?,
                    None => writeln!(f, "{}. `{id}`", rank + 1)?,
                }
            }
            if let Some(reasoning) = &self.recommendation_reasoning {
                writeln!(f)?;
                writeln!(f, "{reasoning}")?;
            }
        }

        Ok(())
    }
}
