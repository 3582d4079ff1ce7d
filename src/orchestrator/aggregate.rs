//! Result Aggregator
//!
//! Per-request accumulator that merges task outputs into response categories.
//! `properties` and `chart` are last-write-wins scalars; `cards`, `updates`,
//! and `created` are append-only in execution order. The state lives for one
//! request only and the final response contains exactly the non-empty
//! categories.

use crate::orchestrator::types::Task;
use crate::tools::Category;
use serde_json::{Map, Value};

/// Category-keyed accumulator for one request.
#[derive(Debug, Default)]
pub struct AggregateState {
    properties: Option<Value>,
    chart: Option<Value>,
    cards: Vec<Value>,
    updates: Vec<Value>,
    created: Vec<Value>,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one task's normalized payload into its action's category.
    ///
    /// A `create_trello_card` task whose params carry a truthy `mode` marker
    /// is a batch/aggregate directive rather than a concrete card creation,
    /// and is excluded from the `cards` category.
    pub fn fold(&mut self, task: &Task, value: Value) {
        match task.action.category() {
            Category::Properties => self.properties = Some(value),
            Category::Chart => self.chart = Some(value),
            Category::Cards => {
                let mode = task.resolved_params().get("mode").cloned();
                if !mode.map(|m| is_truthy(&m)).unwrap_or(false) {
                    self.cards.push(value);
                }
            }
            Category::Updates => self.updates.push(value),
            Category::Created => self.created.push(value),
        }
    }

    /// Produce the final response: only categories holding a non-empty value.
    pub fn into_response(self) -> Map<String, Value> {
        let mut response = Map::new();

        if let Some(properties) = self.properties {
            response.insert("properties".to_string(), properties);
        }
        if let Some(chart) = self.chart {
            response.insert("chart".to_string(), chart);
        }
        if !self.cards.is_empty() {
            response.insert("cards".to_string(), Value::Array(self.cards));
        }
        if !self.updates.is_empty() {
            response.insert("updates".to_string(), Value::Array(self.updates));
        }
        if !self.created.is_empty() {
            response.insert("created".to_string(), Value::Array(self.created));
        }

        response
    }
}

/// Python-style truthiness for the batch-mode marker.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
