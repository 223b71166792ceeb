//! Collection wrapper types for displaying groups of planner values.

use std::fmt;

use crate::planner::EligibleGoal;

/// Newtype wrapper for displaying a ranked eligible set.
pub struct EligibleGoals(pub Vec<EligibleGoal>);

impl EligibleGoals {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EligibleGoal> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a EligibleGoals {
    type Item = &'a EligibleGoal;
    type IntoIter = std::slice::Iter<'a, EligibleGoal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for EligibleGoals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No goals need time right now.");
        }
        for (rank, candidate) in self.0.iter().enumerate() {
            writeln!(
                f,
                "## {}. {} (`{}`)",
                rank + 1,
                candidate.goal.title,
                candidate.goal.id
            )?;
            writeln!(f)?;
            writeln!(f, "- Remaining today: {} min", candidate.remaining_minutes())?;
            writeln!(
                f,
                "- Completed today: {:.0}%",
                candidate.session.percent_complete()
            )?;
            writeln!(f, "- Urgency: {:.1}", candidate.urgency)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
