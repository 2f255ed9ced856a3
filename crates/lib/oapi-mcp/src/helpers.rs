use rmcp::model::{CallToolResult, Content};

/// Wraps a rendered payload as a successful tool result.
///
/// Failures are reported inside the text itself, so the result is never
/// flagged as a protocol error.
pub(crate) fn text_result(payload: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(payload)])
}
