//! Generation backend contract.
//!
//! A backend turns a natural-language planning request into a structured
//! [`DailyPlan`]. It is an opaque capability: it may be slow, unavailable, or
//! return malformed output, and the planner treats all of those as ordinary
//! outcomes.
//!
//! Two operations share one contract so that the fallback path, the real
//! backend and test fakes are interchangeable:
//!
//! - [`PlanBackend::generate`] returns a finished plan.
//! - [`PlanBackend::generate_stream`] returns cumulative
//!   [`PartialDailyPlan`] snapshots, each a superset of the previous one.
//!
//! Backends that natively emit deltas must accumulate them before yielding.
//!
//! ## Implementations
//!
//! - [`command`]: runs an external command and exchanges JSON over stdio
//! - [`scripted`]: deterministic canned responses for tests

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::{DailyPlan, PartialDailyPlan};

pub mod command;
pub mod scripted;

pub use command::CommandBackend;
pub use scripted::ScriptedBackend;

/// Errors reported by a generation backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The capability cannot run at all (not installed, not configured)
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend ran and reported an error
    #[error("backend failed: {0}")]
    Failed(String),

    /// The backend produced output that does not match the schema
    #[error("malformed backend output: {0}")]
    Malformed(String),
}

/// Result alias for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Stream of cumulative partial plans, terminated by completion or an error.
pub type PartialPlanStream = BoxStream<'static, BackendResult<PartialDailyPlan>>;

/// Whether a backend can currently serve requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    /// Carries a user-facing explanation
    Unavailable(String),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// Trait for structured plan generation backends.
#[async_trait]
pub trait PlanBackend: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &str;

    /// Reports whether the backend can run right now.
    fn availability(&self) -> Availability {
        Availability::Available
    }

    /// Generates a complete plan for the prompt, shaped by `schema`.
    async fn generate(&self, prompt: &str, schema: &Value) -> BackendResult<DailyPlan>;

    /// Generates a plan incrementally as cumulative snapshots.
    async fn generate_stream(&self, prompt: &str, schema: &Value)
        -> BackendResult<PartialPlanStream>;
}

/// JSON schema for the [`DailyPlan`] shape requested from backends.
pub fn plan_schema() -> Value {
    json!({
        "type": "object",
        "required": ["sessions"],
        "properties": {
            "sessions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": [
                        "id",
                        "goalTitle",
                        "recommendedStartTime",
                        "suggestedDuration",
                        "priority",
                        "reasoning"
                    ],
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "Goal identity, copied exactly from the request"
                        },
                        "goalTitle": { "type": "string" },
                        "recommendedStartTime": {
                            "type": "string",
                            "pattern": "^([01][0-9]|2[0-3]):[0-5][0-9]$",
                            "description": "24-hour HH:mm"
                        },
                        "suggestedDuration": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Minutes"
                        },
                        "priority": {
                            "type": "integer",
                            "minimum": 1,
                            "maximum": 5,
                            "description": "1 is most urgent"
                        },
                        "reasoning": { "type": "string" }
                    }
                }
            },
            "overallStrategy": { "type": "string" },
            "topThreeRecommendations": {
                "type": "array",
                "items": { "type": "string" },
                "maxItems": 3
            },
            "recommendationReasoning": { "type": "string" }
        }
    })
}
