//! Streaming plan generation for the Planner.

use std::sync::Arc;

use futures::StreamExt;
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use super::{
    build_prompt, eligible_goals, fallback_plan, merge_snapshot, Generation, GenerationPhase,
    Planner, FALLBACK_THRESHOLD,
};
use crate::{
    backend::Availability,
    error::{PlannerError, Result},
    models::DailyPlan,
    params::PlanInput,
};

impl Planner {
    /// Generates a plan incrementally, publishing each usable snapshot.
    ///
    /// Every merged snapshot with at least one complete session replaces
    /// `current_plan` in the published state; follow it with
    /// [`Planner::subscribe`]. The plan cache is neither read nor written.
    /// Returns the last published plan once the backend finishes.
    ///
    /// Cancelling `cancel`, or starting another generation, stops consumption
    /// and returns `PlannerError::Cancelled`. Whatever was already published
    /// stays published.
    ///
    /// # Errors
    ///
    /// As [`Planner::generate_daily_plan`]. A stream that ends before any
    /// session completes is a `GenerationFailed`.
    pub async fn stream_daily_plan(
        &self,
        input: &PlanInput,
        cancel: CancellationToken,
    ) -> Result<Arc<DailyPlan>> {
        input.preferences.validate()?;

        let generation = self.begin();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PlannerError::Cancelled),
            _ = generation.token().cancelled() => Err(PlannerError::Cancelled),
            result = self.consume_stream(input, &generation) => result,
        };

        match result {
            Ok(plan) => {
                self.publish_if_current(&generation, |state| {
                    state.phase = GenerationPhase::Succeeded;
                    state.last_error = None;
                });
                Ok(plan)
            }
            Err(PlannerError::Cancelled) => {
                info!("streaming generation cancelled");
                // no-op when a newer generation took over
                self.publish_if_current(&generation, |state| {
                    state.phase = GenerationPhase::Idle;
                });
                Err(PlannerError::Cancelled)
            }
            Err(e) => {
                let message = e.to_string();
                self.publish_if_current(&generation, move |state| {
                    state.phase = GenerationPhase::Failed;
                    state.last_error = Some(message);
                });
                Err(e)
            }
        }
    }

    async fn consume_stream(
        &self,
        input: &PlanInput,
        generation: &Generation,
    ) -> Result<Arc<DailyPlan>> {
        let eligible = eligible_goals(&input.goals, &input.sessions, input.now);
        info!("{} eligible goal(s)", eligible.len());

        if eligible.len() <= FALLBACK_THRESHOLD {
            info!("planning without backend");
            let plan = Arc::new(fallback_plan(&eligible, input.now, &input.preferences));
            self.publish_plan(generation, &plan)?;
            return Ok(plan);
        }

        if let Availability::Unavailable(reason) = self.backend.availability() {
            return Err(PlannerError::BackendUnavailable { reason });
        }

        let prompt = build_prompt(&eligible, input.now, &input.preferences);
        info!("streaming plan from backend '{}'", self.backend.name());
        let mut snapshots = self.backend.generate_stream(&prompt, &self.schema).await?;

        let mut latest = None;
        let mut received = 0usize;
        while let Some(snapshot) = snapshots.next().await {
            let snapshot = snapshot?;
            received += 1;
            match merge_snapshot(&snapshot, &eligible, &input.preferences) {
                Some(plan) => {
                    let plan = Arc::new(plan);
                    self.publish_plan(generation, &plan)?;
                    latest = Some(plan);
                }
                None => debug!("snapshot {received} has no publishable session yet"),
            }
        }

        latest.ok_or_else(|| {
            PlannerError::generation_failed(format!(
                "stream ended after {received} snapshot(s) without a usable session"
            ))
        })
    }

    fn publish_plan(&self, generation: &Generation, plan: &Arc<DailyPlan>) -> Result<()> {
        let published = Arc::clone(plan);
        if self.publish_if_current(generation, move |state| {
            state.current_plan = Some(published);
        }) {
            Ok(())
        } else {
            Err(PlannerError::Cancelled)
        }
    }
}
