//! Plan data model.

use crate::tools::ToolAction;
use serde::Deserialize;
use serde_json::Value;

/// One planned invocation of a named tool with parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    /// Which registry entry to dispatch to
    pub action: ToolAction,

    /// Planner-supplied parameters; may be an object, a bare string for
    /// query-style actions, or absent entirely
    #[serde(default)]
    pub params: Value,
}

impl Task {
    /// Parameters in the canonical form expected by the transport.
    pub fn resolved_params(&self) -> Value {
        self.action.coerce_params(&self.params)
    }
}

/// The structured, ordered task list derived from a user query.
///
/// Produced once per request and never mutated after parsing. Order is
/// significant: later tasks may depend on side effects of earlier ones.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    pub tasks: Vec<Task>,
}
