//! Conversion of planner errors into MCP error responses.

use rmcp::ErrorData;
use waypoint_core::PlannerError;

/// Maps a planner error onto an MCP error. Caller mistakes become
/// `invalid_params`; storage and runtime failures become `internal_error`.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlannerError::InvalidInput { .. }
        | PlannerError::PlanNotFound { .. }
        | PlannerError::TaskNotFound { .. }
        | PlannerError::PrerequisiteCycle { .. }
        | PlannerError::InvalidTransition { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
