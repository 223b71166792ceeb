//! Read-only planning queries for the Planner.

use super::{
    build_prompt, eligible_goals, next_goal, recommended_sessions, score_breakdown, EligibleGoal,
    Planner, Recommendation, ScoreBreakdown,
};
use crate::{
    error::{PlannerError, Result},
    models::{DailyPlan, GoalSession},
    params::PlanInput,
};

impl Planner {
    /// Goals worth planning at `input.now`, most urgent first.
    pub fn eligible_goals(&self, input: &PlanInput) -> Vec<EligibleGoal> {
        eligible_goals(&input.goals, &input.sessions, input.now)
    }

    /// The backend request a generation for `input` would send.
    pub fn build_prompt(&self, input: &PlanInput) -> String {
        let eligible = self.eligible_goals(input);
        build_prompt(&eligible, input.now, &input.preferences)
    }

    /// Recommendation score for one goal, looked up by id.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if no goal has that id.
    pub fn score_session(&self, input: &PlanInput, goal_id: &str) -> Result<f64> {
        self.score_breakdown(input, goal_id).map(|b| b.total())
    }

    /// Like [`Planner::score_session`], per component.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if no goal has that id.
    pub fn score_breakdown(&self, input: &PlanInput, goal_id: &str) -> Result<ScoreBreakdown> {
        let goal = input
            .goals
            .iter()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| {
                PlannerError::invalid_input("goal_id")
                    .with_reason(format!("no goal with id '{goal_id}'"))
            })?;
        let session = input.sessions.iter().find(|s| s.goal_id == goal_id);
        Ok(score_breakdown(goal, session, input.now, &input.preferences))
    }

    /// The eligible goal best suited to work on right now.
    pub fn next_goal(&self, input: &PlanInput) -> Option<Recommendation> {
        next_goal(&input.goals, &input.sessions, input.now, &input.preferences)
    }

    /// Sessions for the plan's top-three recommendations, in order.
    pub fn recommended_sessions(
        &self,
        plan: &DailyPlan,
        sessions: &[GoalSession],
    ) -> Option<Vec<GoalSession>> {
        recommended_sessions(plan, sessions)
    }
}
