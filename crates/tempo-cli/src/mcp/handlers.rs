//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tempo_core::{
    params::{self as core, parse_now},
    EligibleGoals, JsonGoalStore, PlanInput, Planner, PlannerError, PlannerPreferences,
};
use tokio::task;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types.
///
/// Adds deserialization and schema generation on top of the core types
/// without the core depending on rmcp.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type GeneratePlan = McpParams<core::PlanRequest>;
pub type GoalQuery = McpParams<core::GoalQuery>;
pub type AtTime = McpParams<core::AtTime>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Planner>,
    store: JsonGoalStore,
    preferences: PlannerPreferences,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>, store: JsonGoalStore, preferences: PlannerPreferences) -> Self {
        Self {
            planner,
            store,
            preferences,
        }
    }

    pub async fn generate_plan(&self, Parameters(params): Parameters<GeneratePlan>) -> McpResult {
        debug!("generate_plan: {:?}", params);
        let request = params.as_ref();

        let preferences = request
            .apply(self.preferences.clone())
            .map_err(|e| to_mcp_error("Invalid preferences", &e))?;
        let input = self.load_input(request.now.as_deref(), preferences).await?;

        let plan = self
            .planner
            .generate_daily_plan(&input)
            .await
            .map_err(|e| to_mcp_error("Failed to generate plan", &e))?;

        Ok(CallToolResult::success(vec![Content::text(plan.to_string())]))
    }

    pub async fn eligible_goals(&self, Parameters(params): Parameters<AtTime>) -> McpResult {
        debug!("eligible_goals: {:?}", params);

        let input = self
            .load_input(params.as_ref().now.as_deref(), self.preferences.clone())
            .await?;
        let eligible = EligibleGoals(self.planner.eligible_goals(&input));

        let title = if eligible.is_empty() {
            "No eligible goals"
        } else {
            "Eligible goals"
        };
        Ok(CallToolResult::success(vec![Content::text(format!(
            "# {title}\n\n{eligible}"
        ))]))
    }

    pub async fn score_goal(&self, Parameters(params): Parameters<GoalQuery>) -> McpResult {
        debug!("score_goal: {:?}", params);
        let query = params.as_ref();

        let input = self
            .load_input(query.now.as_deref(), self.preferences.clone())
            .await?;
        let breakdown = self
            .planner
            .score_breakdown(&input, &query.goal_id)
            .map_err(|e| to_mcp_error("Failed to score goal", &e))?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "# Score: {}\n\n{breakdown}",
            query.goal_id
        ))]))
    }

    pub async fn next_goal(&self, Parameters(params): Parameters<AtTime>) -> McpResult {
        debug!("next_goal: {:?}", params);

        let input = self
            .load_input(params.as_ref().now.as_deref(), self.preferences.clone())
            .await?;
        let text = match self.planner.next_goal(&input) {
            Some(recommendation) => recommendation.to_string(),
            None => "# Next\n\nNothing needs attention right now.\n".to_string(),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Reads the goals file off the async runtime.
    async fn load_input(
        &self,
        now: Option<&str>,
        preferences: PlannerPreferences,
    ) -> Result<PlanInput, ErrorData> {
        let now = parse_now(now).map_err(|e| to_mcp_error("Invalid time", &e))?;
        let store = self.store.clone();

        task::spawn_blocking(move || PlanInput::from_store(&store, now, preferences))
            .await
            .map_err(|e| {
                to_mcp_error(
                    "Failed to load goals",
                    &PlannerError::Configuration {
                        message: format!("Task join error: {e}"),
                    },
                )
            })?
            .map_err(|e| to_mcp_error("Failed to load goals", &e))
    }
}
