use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use futures::{stream, StreamExt};
use serde_json::Value;

use super::{Availability, BackendError, BackendResult, PartialPlanStream, PlanBackend};
use crate::models::{DailyPlan, PartialDailyPlan};

/// A deterministic backend that replays canned responses.
///
/// Records every prompt it receives so tests can assert on what was sent and
/// how often the backend was reached.
pub struct ScriptedBackend {
    availability: Availability,
    plan: BackendResult<DailyPlan>,
    snapshots: Vec<BackendResult<PartialDailyPlan>>,
    delay: Duration,
    prompts: Mutex<Vec<String>>,
    generate_calls: AtomicUsize,
    stream_calls: AtomicUsize,
}

impl ScriptedBackend {
    /// Create a backend that returns `plan` from `generate`.
    pub fn with_plan(plan: DailyPlan) -> Self {
        Self {
            availability: Availability::Available,
            plan: Ok(plan),
            snapshots: Vec::new(),
            delay: Duration::ZERO,
            prompts: Mutex::new(Vec::new()),
            generate_calls: AtomicUsize::new(0),
            stream_calls: AtomicUsize::new(0),
        }
    }

    /// Create a backend whose `generate` fails with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self {
            plan: Err(error),
            ..Self::with_plan(DailyPlan::default())
        }
    }

    /// Create a backend that reports itself unavailable.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            availability: Availability::Unavailable(reason.to_string()),
            ..Self::with_plan(DailyPlan::default())
        }
    }

    /// Set the snapshots yielded by `generate_stream`, in order.
    pub fn with_snapshots(mut self, snapshots: Vec<BackendResult<PartialDailyPlan>>) -> Self {
        self.snapshots = snapshots;
        self
    }

    /// Delay each response (and each streamed snapshot) by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of times `generate` was invoked.
    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    /// Number of times `generate_stream` was invoked.
    pub fn stream_calls(&self) -> usize {
        self.stream_calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    fn record(&self, prompt: &str) {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
    }
}

#[async_trait]
impl PlanBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn availability(&self) -> Availability {
        self.availability.clone()
    }

    async fn generate(&self, prompt: &str, _schema: &Value) -> BackendResult<DailyPlan> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.record(prompt);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.plan.clone()
    }

    async fn generate_stream(
        &self,
        prompt: &str,
        _schema: &Value,
    ) -> BackendResult<PartialPlanStream> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        self.record(prompt);
        let delay = self.delay;
        let items = stream::iter(self.snapshots.clone());
        if delay.is_zero() {
            Ok(items.boxed())
        } else {
            Ok(items
                .then(move |item| async move {
                    tokio::time::sleep(delay).await;
                    item
                })
                .boxed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_prompts_and_counts_calls() {
        let backend = ScriptedBackend::with_plan(DailyPlan::default());
        let schema = super::super::plan_schema();

        backend.generate("first", &schema).await.expect("plan");
        backend.generate("second", &schema).await.expect("plan");

        assert_eq!(backend.generate_calls(), 2);
        assert_eq!(backend.prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn replays_snapshots_in_order() {
        let first = PartialDailyPlan {
            overall_strategy: Some("one".into()),
            ..Default::default()
        };
        let second = PartialDailyPlan {
            overall_strategy: Some("two".into()),
            ..Default::default()
        };
        let backend = ScriptedBackend::with_plan(DailyPlan::default())
            .with_snapshots(vec![Ok(first.clone()), Ok(second.clone())]);

        let items: Vec<_> = backend
            .generate_stream("p", &Value::Null)
            .await
            .expect("stream")
            .collect()
            .await;

        assert_eq!(items, vec![Ok(first), Ok(second)]);
        assert_eq!(backend.stream_calls(), 1);
    }

    #[tokio::test]
    async fn failing_backend_returns_error() {
        let backend = ScriptedBackend::failing(BackendError::Failed("boom".into()));
        let result = backend.generate("p", &Value::Null).await;
        assert_eq!(result, Err(BackendError::Failed("boom".into())));
    }
}
