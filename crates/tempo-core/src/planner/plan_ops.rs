//! Synchronous plan generation for the Planner.

use std::sync::Arc;

use log::{debug, info, warn};

use super::{
    build_prompt, eligible_goals, fallback_plan, sanitize_plan, GenerationPhase, Planner,
    Sanitized, FALLBACK_THRESHOLD,
};
use crate::{
    backend::Availability,
    error::{PlannerError, Result},
    models::DailyPlan,
    params::PlanInput,
};

impl Planner {
    /// Returns today's plan, generating one if the cache has nothing fresh.
    ///
    /// A fresh cached plan is returned as is and leaves the phase alone. On a
    /// miss the eligible set decides the path: two or fewer goals plan
    /// through the deterministic fallback, more go to the backend. A
    /// successful result is published and cached under `input.now` and the
    /// preferences it was made for.
    ///
    /// # Errors
    ///
    /// - `PlannerError::InvalidInput` for unusable preferences
    /// - `PlannerError::BackendUnavailable` when the backend cannot run
    /// - `PlannerError::GenerationFailed` when it fails or returns nothing
    ///   usable
    /// - `PlannerError::Cancelled` when a newer generation superseded this one
    ///
    /// A failure leaves the cached plan untouched.
    pub async fn generate_daily_plan(&self, input: &PlanInput) -> Result<Arc<DailyPlan>> {
        input.preferences.validate()?;

        let mut cache = self.cache.lock().await;
        if let Some(plan) = cache.get(input.now, &input.preferences) {
            debug!("plan cache hit");
            return Ok(plan);
        }
        debug!("plan cache miss");

        let generation = self.begin();
        let result = tokio::select! {
            biased;
            _ = generation.token().cancelled() => Err(PlannerError::Cancelled),
            result = self.produce_plan(input) => result,
        };

        match result {
            Ok(plan) => {
                let plan = Arc::new(plan);
                let published = Arc::clone(&plan);
                let current = self.publish_if_current(&generation, move |state| {
                    state.phase = GenerationPhase::Succeeded;
                    state.current_plan = Some(published);
                    state.last_error = None;
                });
                if !current {
                    info!("discarding plan from a superseded generation");
                    return Err(PlannerError::Cancelled);
                }
                cache.store(Arc::clone(&plan), input.now, input.preferences.clone());
                Ok(plan)
            }
            Err(PlannerError::Cancelled) => {
                info!("plan generation superseded");
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

    /// Drops the cached plan so the next call regenerates.
    pub async fn invalidate_cache(&self) {
        self.cache.lock().await.invalidate();
    }

    async fn produce_plan(&self, input: &PlanInput) -> Result<DailyPlan> {
        let eligible = eligible_goals(&input.goals, &input.sessions, input.now);
        info!("{} eligible goal(s)", eligible.len());

        if eligible.len() <= FALLBACK_THRESHOLD {
            info!("planning without backend");
            return Ok(fallback_plan(&eligible, input.now, &input.preferences));
        }

        if let Availability::Unavailable(reason) = self.backend.availability() {
            return Err(PlannerError::BackendUnavailable { reason });
        }

        let prompt = build_prompt(&eligible, input.now, &input.preferences);
        info!("requesting plan from backend '{}'", self.backend.name());
        let response = self.backend.generate(&prompt, &self.schema).await?;

        let Sanitized {
            plan,
            received,
            dropped,
        } = sanitize_plan(response, &eligible, &input.preferences);
        if dropped > 0 {
            warn!("dropped {dropped} of {received} planned session(s)");
        }
        if received > 0 && plan.sessions.is_empty() {
            return Err(PlannerError::generation_failed(
                "no planned session referenced an eligible goal",
            ));
        }
        Ok(plan)
    }
}
