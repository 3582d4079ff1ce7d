//! Plan-then-execute orchestration
//!
//! Control flow for one request: query -> plan producer -> plan parser ->
//! task executor (dispatch, normalize, fold) -> filtered aggregate. All
//! mutable state is request-scoped; an `Orchestrator` can be shared behind an
//! `Arc` across concurrent requests without locks.

pub mod aggregate;
pub mod executor;
pub mod normalize;
pub mod planner;
pub mod types;

pub use aggregate::AggregateState;
pub use executor::Executor;
pub use normalize::normalize_result;
pub use planner::Planner;
pub use types::{Plan, Task};

use crate::config::ToolsConfig;
use crate::llm::{LlmError, LlmProvider};
use crate::transport::HttpToolTransport;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request-level failures. Only planning problems abort a request; tool
/// invocation failures are absorbed into partial results by the executor.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("plan producer failed: {0}")]
    PlanProducer(#[from] LlmError),

    #[error("invalid plan: {0}")]
    InvalidPlan(String),
}

/// The orchestration entry point: owns the planner and the tool endpoint
/// configuration, and instantiates one transport session per request.
pub struct Orchestrator {
    planner: Planner,
    tools: ToolsConfig,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LlmProvider>, tools: ToolsConfig) -> Self {
        Self {
            planner: Planner::new(llm),
            tools,
        }
    }

    /// Run one query end to end and return the filtered aggregate.
    ///
    /// Planning failures surface immediately with no partial results; once a
    /// plan parses, the caller always receives a best-effort aggregate.
    pub async fn run(&self, query: &str) -> Result<Map<String, Value>, OrchestratorError> {
        info!("received query: {}", query);

        let plan = self.planner.generate_plan(query).await?;
        info!("plan contains {} task(s)", plan.tasks.len());

        let transport = HttpToolTransport::new(self.tools.clone());
        let state = Executor::new(&transport).run_plan(&plan).await;

        Ok(state.into_response())
    }
}
