//! Error rendering for the MCP surface

use rmcp::model::{CallToolResult, Content};
use waypoint_core::PlanError;

/// Render a tracker error as a readable tool result.
///
/// The caller is a tool-driving model that must read the failure and choose
/// its next operation, so tracker errors are returned as tool results with
/// the error flag set, never as opaque protocol faults. Each message
/// already names the condition and the valid next operation.
pub fn error_reply(error: &PlanError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(error.to_string())])
}
