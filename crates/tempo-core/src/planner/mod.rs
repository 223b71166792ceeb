//! Plan orchestration.
//!
//! This module provides the main [`Planner`] interface. The planner ties the
//! pure planning steps together and owns all mutable planning state: the
//! plan cache, the published [`PlannerState`] and the in-flight generation.
//!
//! # Architecture Overview
//!
//! ```text
//! goals + sessions + now + preferences
//!            │
//!            ▼
//!   ┌─────────────────┐  ≤2 eligible   ┌─────────────────┐
//!   │   eligibility   │───────────────▶│    fallback     │──┐
//!   └─────────────────┘                └─────────────────┘  │
//!            │ >2 eligible                                   │
//!            ▼                                               ▼
//!   ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//!   │     prompt      │──▶│     backend     │──▶│ validate/merge  │──▶ cache, state
//!   └─────────────────┘   └─────────────────┘   └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances
//! - [`eligibility`]: Filtering and urgency ranking
//! - [`scoring`]: Recommendation scoring for "what next"
//! - [`fallback`]: Deterministic plans for tiny eligible sets
//! - [`prompt`]: Backend request rendering
//! - [`cache`]: Time-bounded single-entry plan cache
//! - [`validate`]: Checks backend output against the eligible set
//! - [`merge`]: Folds streamed snapshots into publishable plans
//! - [`recommend`]: Shortlist resolution and "next goal" selection
//! - `plan_ops`, `stream_ops`, `query_ops`: the [`Planner`] operations
//!
//! ## Concurrency
//!
//! - Synchronous generation holds the cache lock for the whole
//!   check, generate, store sequence, so concurrent callers share one backend
//!   call.
//! - Every generation, synchronous or streaming, supersedes the previous
//!   one. Superseded generations publish nothing.
//! - Observers follow progress through [`Planner::subscribe`].
//!
//! # Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use jiff::civil;
//! use tempo_core::{backend::ScriptedBackend, DailyPlan, PlanInput, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_backend(Arc::new(ScriptedBackend::with_plan(DailyPlan::default())))
//!     .build()?;
//!
//! let input = PlanInput::new(vec![], vec![], civil::date(2026, 10, 19).at(9, 0, 0, 0));
//! let plan = planner.generate_daily_plan(&input).await?;
//! assert!(plan.is_empty());
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::backend::PlanBackend;
use crate::models::DailyPlan;

pub mod builder;
pub mod cache;
pub mod eligibility;
pub mod fallback;
pub mod merge;
pub mod prompt;
pub mod recommend;
pub mod scoring;
pub mod validate;

mod plan_ops;
mod query_ops;
mod stream_ops;


pub use builder::PlannerBuilder;
pub use cache::{PlanCache, PlanCacheEntry, DEFAULT_CACHE_VALIDITY};
pub use eligibility::{eligible_goals, urgency_score, EligibleGoal, MAX_ELIGIBLE_GOALS};
pub use fallback::{fallback_plan, FALLBACK_THRESHOLD};
pub use merge::merge_snapshot;
pub use prompt::build_prompt;
pub use recommend::{next_goal, recommended_sessions, Recommendation};
pub use scoring::{score_breakdown, score_session, ScoreBreakdown, MAX_SCORE};
pub use validate::{sanitize_plan, Sanitized};

/// Lifecycle of the most recent generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Generating,
    Succeeded,
    Failed,
}

impl GenerationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationPhase::Idle => "idle",
            GenerationPhase::Generating => "generating",
            GenerationPhase::Succeeded => "succeeded",
            GenerationPhase::Failed => "failed",
        }
    }
}

/// Observable planner state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerState {
    pub phase: GenerationPhase,
    /// Last plan published by any generation
    pub current_plan: Option<Arc<DailyPlan>>,
    /// Message of the last failed generation, cleared on success
    pub last_error: Option<String>,
}

impl PlannerState {
    pub fn is_generating(&self) -> bool {
        self.phase == GenerationPhase::Generating
    }
}

/// Identifies one generation. Only the most recently started generation may
/// publish.
pub(crate) struct Generation {
    epoch: u64,
    token: CancellationToken,
}

struct InFlight {
    epoch: u64,
    token: CancellationToken,
}

/// Main planner interface.
pub struct Planner {
    pub(crate) backend: Arc<dyn PlanBackend>,
    pub(crate) schema: Value,
    pub(crate) cache: tokio::sync::Mutex<PlanCache>,
    state: watch::Sender<PlannerState>,
    in_flight: Mutex<InFlight>,
}

impl Planner {
    pub(crate) fn new(backend: Arc<dyn PlanBackend>, schema: Value, cache: PlanCache) -> Self {
        let (state, _) = watch::channel(PlannerState::default());
        Self {
            backend,
            schema,
            cache: tokio::sync::Mutex::new(cache),
            state,
            in_flight: Mutex::new(InFlight {
                epoch: 0,
                token: CancellationToken::new(),
            }),
        }
    }

    /// Name of the configured generation backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Subscribes to state changes, including every streamed plan.
    pub fn subscribe(&self) -> watch::Receiver<PlannerState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PlannerState {
        self.state.borrow().clone()
    }

    pub fn is_generating(&self) -> bool {
        self.state.borrow().is_generating()
    }

    /// The last published plan, if any.
    pub fn current_plan(&self) -> Option<Arc<DailyPlan>> {
        self.state.borrow().current_plan.clone()
    }

    /// Starts a generation, cancelling whichever one was in flight.
    pub(crate) fn begin(&self) -> Generation {
        let mut in_flight = self.lock_in_flight();
        in_flight.token.cancel();
        in_flight.epoch += 1;
        in_flight.token = CancellationToken::new();

        self.state.send_modify(|state| state.phase = GenerationPhase::Generating);
        Generation {
            epoch: in_flight.epoch,
            token: in_flight.token.clone(),
        }
    }

    /// Applies `update` to the published state if `generation` is still the
    /// latest one and has not been cancelled. Returns whether it was applied.
    pub(crate) fn publish_if_current<F>(&self, generation: &Generation, update: F) -> bool
    where
        F: FnOnce(&mut PlannerState),
    {
        let in_flight = self.lock_in_flight();
        if in_flight.epoch != generation.epoch || generation.token.is_cancelled() {
            return false;
        }
        self.state.send_modify(update);
        true
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, InFlight> {
        // plain data, consistent even after a panic
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Generation {
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}
