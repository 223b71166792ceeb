//! MCP server implementation for Tempo
//!
//! Exposes planning over the Model Context Protocol so assistants can ask
//! for today's plan, the eligible goals, or what to work on next.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tempo_core::{JsonGoalStore, Planner, PlannerPreferences};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{AtTime, GeneratePlan, GoalQuery, McpHandlers, McpResult};

/// MCP server for Tempo
#[derive(Clone)]
pub struct TempoMcpServer {
    handlers: Arc<McpHandlers>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TempoMcpServer {
    /// Create a server that reads goals from `store` on every call.
    pub fn new(planner: Planner, store: JsonGoalStore, preferences: PlannerPreferences) -> Self {
        Self {
            handlers: Arc::new(McpHandlers::new(Arc::new(planner), store, preferences)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "generate_plan",
        description = "Generate today's plan: recommended sessions with start times (HH:mm), durations in minutes, priorities and reasoning, plus a 'right now' shortlist. Optional: now (local date-time like 2026-10-19T09:30), max_sessions, focus_mode (deepWork, balanced, flexible). Plans are reused for five minutes."
    )]
    async fn generate_plan(&self, params: Parameters<GeneratePlan>) -> McpResult {
        self.handlers.generate_plan(params).await
    }

    #[tool(
        name = "eligible_goals",
        description = "List the goals that still need time today and fit the current time of day, most urgent first, with remaining minutes and urgency. Optional: now."
    )]
    async fn eligible_goals(&self, params: Parameters<AtTime>) -> McpResult {
        self.handlers.eligible_goals(params).await
    }

    #[tool(
        name = "score_goal",
        description = "Score how well suited a goal is to work on right now (0-125), broken down into progress deficit, time-of-day match, focus mode fit, closeness to a planned start and notifications. Requires goal_id; optional: now."
    )]
    async fn score_goal(&self, params: Parameters<GoalQuery>) -> McpResult {
        self.handlers.score_goal(params).await
    }

    #[tool(
        name = "next_goal",
        description = "Pick the single best goal to work on right now, with its score breakdown. Optional: now."
    )]
    async fn next_goal(&self, params: Parameters<AtTime>) -> McpResult {
        self.handlers.next_goal(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TempoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tempo".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Tempo plans a user's day across personal goals that have weekly time targets.

## Tools
- `generate_plan`: today's sessions and the 'right now' shortlist
- `eligible_goals`: which goals need time at the moment, most urgent first
- `next_goal`: the single best goal to start now
- `score_goal`: why a particular goal ranks where it does

All tools accept an optional `now` (local date-time, e.g. 2026-10-19T09:30) to plan for a different moment."#.to_string()),
        }
    }
}

/// Serve MCP over stdin/stdout until the client disconnects or the process
/// is asked to stop.
pub async fn run_stdio_server(server: TempoMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!(
        "Starting Tempo MCP server on stdio with {} tools",
        server.tool_router.list_all().len()
    );

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| error!("serving error: {e:?}"))?;

    let reason = tokio::select! {
        result = service.waiting() => match result {
            Ok(_) => "client disconnected".to_string(),
            Err(e) => {
                error!("MCP server error: {e:?}");
                "server task failed".to_string()
            }
        },
        _ = sigint.recv() => "SIGINT".to_string(),
        _ = sigterm.recv() => "SIGTERM".to_string(),
    };

    info!("MCP server stopped: {reason}");
    Ok(())
}
