//! Plan Producer contract and Plan Parser
//!
//! The planner turns a free-text user query into a `Plan` by prompting the
//! LLM with the tool catalog and a mandated output grammar, then parsing the
//! reply strictly. The prompt/parser pair is a contract: the prompt forces a
//! single well-formed JSON object, and the parser fails the whole request
//! loudly if that contract is not honored. There is deliberately no fence
//! stripping and no fallback plan here.

use crate::llm::{LlmProvider, Message};
use crate::orchestrator::types::Plan;
use crate::orchestrator::OrchestratorError;
use crate::tools::REGISTRY;
use std::sync::Arc;
use tracing::debug;

pub struct Planner {
    llm: Arc<dyn LlmProvider>,
}

impl Planner {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Ask the plan producer for a task list for `query` and parse it.
    ///
    /// Producer failures and unparseable output are both terminal planning
    /// errors; no tool is invoked before this returns `Ok`.
    pub async fn generate_plan(&self, query: &str) -> Result<Plan, OrchestratorError> {
        let messages = [Message::system(build_system_prompt()), Message::user(query)];

        let text = self.llm.generate(&messages).await?;
        debug!("plan producer returned: {}", text);

        parse_plan(&text)
    }
}

/// Build the planning instruction from the tool registry.
///
/// Declares exactly the supported actions with their parameter shapes and
/// mandates a response that is only the JSON plan object. The JSON-only
/// constraint is load-bearing for `parse_plan`.
pub fn build_system_prompt() -> String {
    let mut prompt = String::from("You have five tools:\n");
    for spec in REGISTRY {
        prompt.push_str(&format!("  - {} -> {}\n", spec.signature, spec.returns));
    }

    prompt.push_str(
        r#"
Analyze the user's query and return a JSON plan of tasks:
{"tasks": [
    {"action": "get_properties", "params": {"query": "..."}},
    {"action": "get_chart", "params": {"query": "..."}},
    {"action": "create_trello_card", "params": {"name": "...", "desc": "..."}},
    {"action": "update_property_price", "params": {"id": 123, "rent_price": 10000.0, "reason": "..."}},
    {"action": "create_property", "params": {"address1": "...", "area": "...", "city": "...", "purchaseDate": "YYYY-MM-DD", "developer": "...", "buyPrice": 100000.0, "rentPrice": 5000.0, "bedrooms": 2, "bathrooms": 1, "receptions": 1, "size": 120.5}}
]}
Respond ONLY with this JSON. No prose, no markdown fencing."#,
    );

    prompt
}

/// Parse raw producer text into a `Plan`.
///
/// Strict by design: malformed JSON, a missing `tasks` key, or an action
/// outside the registry all reject the plan.
pub fn parse_plan(text: &str) -> Result<Plan, OrchestratorError> {
    serde_json::from_str(text.trim()).map_err(|e| OrchestratorError::InvalidPlan(e.to_string()))
}
