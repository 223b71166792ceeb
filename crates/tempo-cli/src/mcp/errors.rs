//! Error handling utilities for MCP server

use rmcp::ErrorData;
use tempo_core::PlannerError;

/// Helper to convert planner errors to MCP errors
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlannerError::InvalidInput { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
