//! Command execution for the terminal interface.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tempo_core::{DailyPlan, EligibleGoals, PlanInput, Planner};
use tokio_util::sync::CancellationToken;

use crate::renderer::TerminalRenderer;

/// Runs one command against a planner and renders the outcome.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// Generate and show a plan.
    pub async fn plan(&self, input: &PlanInput, stream: bool) -> Result<()> {
        let plan = if stream {
            self.stream_plan(input).await?
        } else {
            self.planner
                .generate_daily_plan(input)
                .await
                .context("Failed to generate plan")?
        };
        self.renderer.render(&plan.to_string())
    }

    async fn stream_plan(&self, input: &PlanInput) -> Result<Arc<DailyPlan>> {
        let cancel = CancellationToken::new();
        let mut updates = self.planner.subscribe();
        let generation = self.planner.stream_daily_plan(input, cancel.clone());
        tokio::pin!(generation);

        let mut shown = 0;
        loop {
            tokio::select! {
                result = &mut generation => {
                    return result.context("Failed to generate plan");
                }
                changed = updates.changed() => {
                    if changed.is_err() {
                        return (&mut generation).await.context("Failed to generate plan");
                    }
                    let count = updates
                        .borrow_and_update()
                        .current_plan
                        .as_ref()
                        .map_or(0, |plan| plan.sessions.len());
                    if count > shown {
                        shown = count;
                        self.renderer
                            .progress(&format!("{count} session(s) planned so far..."));
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, cancelling generation");
                    cancel.cancel();
                }
            }
        }
    }

    /// List the goals that need time now.
    pub fn eligible(&self, input: &PlanInput) -> Result<()> {
        let eligible = EligibleGoals(self.planner.eligible_goals(input));
        self.renderer
            .render(&format!("# Eligible goals\n\n{eligible}"))
    }

    /// Show the score breakdown for one goal.
    pub fn score(&self, input: &PlanInput, goal_id: &str) -> Result<()> {
        let breakdown = self
            .planner
            .score_breakdown(input, goal_id)
            .context("Failed to score goal")?;
        let title = input
            .goals
            .iter()
            .find(|g| g.id == goal_id)
            .map_or(goal_id, |g| g.title.as_str());
        self.renderer
            .render(&format!("# Score: {title}\n\n{breakdown}"))
    }

    /// Show the best goal to work on now.
    pub fn next(&self, input: &PlanInput) -> Result<()> {
        match self.planner.next_goal(input) {
            Some(recommendation) => self.renderer.render(&recommendation.to_string()),
            None => self
                .renderer
                .render("# Next\n\nNothing needs attention right now.\n"),
        }
    }

    /// Print the backend request verbatim.
    pub fn prompt(&self, input: &PlanInput) -> Result<()> {
        self.renderer.raw(&self.planner.build_prompt(input))
    }
}
