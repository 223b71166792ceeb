//! Builder for creating and configuring Planner instances.

use std::sync::Arc;
use std::time::Duration;

use jiff::SignedDuration;

use super::{PlanCache, Planner, DEFAULT_CACHE_VALIDITY};
use crate::{
    backend::{plan_schema, CommandBackend, PlanBackend},
    config::Config,
    error::{PlannerError, Result},
};

/// Builder for creating and configuring Planner instances.
#[derive(Clone, Default)]
pub struct PlannerBuilder {
    backend: Option<Arc<dyn PlanBackend>>,
    cache_validity: Option<SignedDuration>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generation backend.
    ///
    /// If not specified, an unconfigured [`CommandBackend`] is used, which
    /// reports itself unavailable. Small eligible sets still plan through the
    /// fallback path.
    pub fn with_backend(mut self, backend: Arc<dyn PlanBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets how long a generated plan is served from the cache.
    pub fn with_cache_validity(mut self, validity: SignedDuration) -> Self {
        self.cache_validity = Some(validity);
        self
    }

    /// Applies backend command, timeout and cache validity from `config`.
    pub fn with_config(self, config: &Config) -> Self {
        let backend = CommandBackend::new(config.backend.command.clone())
            .with_timeout(Duration::from_secs(config.backend.timeout_secs));
        let validity = SignedDuration::from_secs(config.cache_validity_secs as i64);
        self.with_backend(Arc::new(backend))
            .with_cache_validity(validity)
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the cache validity is negative.
    pub fn build(self) -> Result<Planner> {
        let validity = self.cache_validity.unwrap_or(DEFAULT_CACHE_VALIDITY);
        if validity.is_negative() {
            return Err(PlannerError::invalid_input("cache_validity")
                .with_reason("must not be negative"));
        }

        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(CommandBackend::new(Vec::new())));
        Ok(Planner::new(backend, plan_schema(), PlanCache::new(validity)))
    }
}
