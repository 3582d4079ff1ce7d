//! Task Executor
//!
//! Walks a parsed plan strictly in order, one task at a time, dispatching
//! each task through the tool transport. Ordering matters: later tasks may
//! depend on side effects of earlier ones, so there is no fan-out within a
//! request. A failed invocation skips only its own task — one broken card
//! creation must not block an independent price update.

use crate::orchestrator::aggregate::AggregateState;
use crate::orchestrator::normalize::normalize_result;
use crate::orchestrator::types::Plan;
use crate::transport::ToolTransport;
use tracing::{debug, info, warn};

pub struct Executor<'a> {
    transport: &'a dyn ToolTransport,
}

impl<'a> Executor<'a> {
    pub fn new(transport: &'a dyn ToolTransport) -> Self {
        Self { transport }
    }

    /// Execute every task in plan order and accumulate the results.
    ///
    /// Per task: coerce params, invoke, normalize, fold. Invocation failures
    /// are logged and absorbed; this method itself cannot fail.
    pub async fn run_plan(&self, plan: &Plan) -> AggregateState {
        let mut state = AggregateState::new();

        for task in &plan.tasks {
            let params = task.resolved_params();
            info!("executing task {} with params {}", task.action, params);

            let raw = match self.transport.call(task.action, params).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("tool call {} failed: {}", task.action, e);
                    continue;
                }
            };

            let value = normalize_result(&raw);
            debug!("result {}: {}", task.action, value);

            state.fold(task, value);
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::planner::parse_plan;
    use crate::tools::ToolAction;
    use crate::transport::{Result as TransportResult, TransportError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Scripted transport: records calls, fails for configured actions.
    struct ScriptedTransport {
        fail_on: Vec<ToolAction>,
        calls: Mutex<Vec<(ToolAction, Value)>>,
    }

    impl ScriptedTransport {
        fn new(fail_on: Vec<ToolAction>) -> Self {
            Self {
                fail_on,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ToolTransport for ScriptedTransport {
        async fn call(&self, action: ToolAction, params: Value) -> TransportResult<Value> {
            self.calls.lock().unwrap().push((action, params));
            if self.fail_on.contains(&action) {
                return Err(TransportError::Network("connection refused".to_string()));
            }
            Ok(json!({"content": [{"type": "text",
                "text": format!(r#"{{"ok":"{}"}}"#, action)}]}))
        }
    }

    #[tokio::test]
    async fn test_tasks_run_in_plan_order() {
        let transport = ScriptedTransport::new(vec![]);
        let plan = parse_plan(
            r#"{"tasks": [
                {"action": "get_properties", "params": "q"},
                {"action": "update_property_price", "params": {"id": 1}},
                {"action": "create_property", "params": {}}
            ]}"#,
        )
        .unwrap();

        Executor::new(&transport).run_plan(&plan).await;

        let calls = transport.calls.lock().unwrap();
        let order: Vec<ToolAction> = calls.iter().map(|(a, _)| *a).collect();
        assert_eq!(
            order,
            vec![
                ToolAction::GetProperties,
                ToolAction::UpdatePropertyPrice,
                ToolAction::CreateProperty
            ]
        );
    }

    #[tokio::test]
    async fn test_bare_string_params_dispatched_in_object_form() {
        let transport = ScriptedTransport::new(vec![]);
        let plan =
            parse_plan(r#"{"tasks": [{"action": "get_properties", "params": "show rent"}]}"#)
                .unwrap();

        Executor::new(&transport).run_plan(&plan).await;

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls[0].1, json!({"query": "show rent"}));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_results() {
        let transport = ScriptedTransport::new(vec![ToolAction::UpdatePropertyPrice]);
        let plan = parse_plan(
            r#"{"tasks": [
                {"action": "update_property_price", "params": {"id": 1, "rent_price": 900.0}},
                {"action": "create_property", "params": {"address1": "12 Oak St"}}
            ]}"#,
        )
        .unwrap();

        let response = Executor::new(&transport).run_plan(&plan).await.into_response();

        assert!(response.contains_key("created"));
        assert!(!response.contains_key("updates"));
        // The failing task still runs before the loop moves on
        assert_eq!(transport.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_response() {
        let transport = ScriptedTransport::new(vec![
            ToolAction::GetProperties,
            ToolAction::GetChart,
        ]);
        let plan = parse_plan(
            r#"{"tasks": [{"action": "get_properties"}, {"action": "get_chart"}]}"#,
        )
        .unwrap();

        let response = Executor::new(&transport).run_plan(&plan).await.into_response();
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_normalized_json_stored_structured() {
        let transport = ScriptedTransport::new(vec![]);
        let plan = parse_plan(r#"{"tasks": [{"action": "get_properties", "params": "q"}]}"#)
            .unwrap();

        let response = Executor::new(&transport).run_plan(&plan).await.into_response();
        assert_eq!(response["properties"], json!({"ok": "get_properties"}));
    }
}
