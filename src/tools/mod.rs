//! Tool Registry
//!
//! The fixed catalog of remote procedures the planner may schedule and the
//! executor may dispatch. Each entry carries the wire name, the signature
//! shown to the planner LLM, and the response-category convention used by the
//! aggregator. The registry is the single shared, immutable resource in the
//! system: both the planner prompt and the dispatch table are derived from it,
//! so the two can never disagree about which actions exist.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// An invocable remote procedure.
///
/// This is a closed set: an action name outside it cannot be represented,
/// which turns "unknown action" into a plan-validation error instead of a
/// silent no-op at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolAction {
    /// Fetch property records matching a natural-language query
    GetProperties,

    /// Fetch matching records and generate a chart
    GetChart,

    /// Create a Trello card
    CreateTrelloCard,

    /// Update the rent price of a property by ID
    UpdatePropertyPrice,

    /// Create a new property
    CreateProperty,
}

/// Response category an action's result folds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Last-write-wins scalar: property query results
    Properties,

    /// Last-write-wins scalar: chart payload
    Chart,

    /// Append-only: created Trello cards
    Cards,

    /// Append-only: price updates
    Updates,

    /// Append-only: created properties
    Created,
}

/// Static description of one registry entry, used to build the planner
/// prompt. The `signature` is shown to the LLM verbatim.
pub struct ToolSpec {
    pub action: ToolAction,
    pub signature: &'static str,
    pub returns: &'static str,
}

/// The fixed tool catalog, in the order presented to the planner.
pub const REGISTRY: &[ToolSpec] = &[
    ToolSpec {
        action: ToolAction::GetProperties,
        signature: "get_properties(query: str)",
        returns: "returns JSON object with all the information",
    },
    ToolSpec {
        action: ToolAction::GetChart,
        signature: "get_chart(query: str)",
        returns: "returns JSON object with chart data",
    },
    ToolSpec {
        action: ToolAction::CreateTrelloCard,
        signature: "create_trello_card(name: str, desc: str)",
        returns: "returns plain text \"Card created: <url>\"",
    },
    ToolSpec {
        action: ToolAction::UpdatePropertyPrice,
        signature: "update_property_price(id: int, rent_price: float, reason: str)",
        returns: "updates a property's rent price",
    },
    ToolSpec {
        action: ToolAction::CreateProperty,
        signature: "create_property(address1: str, area: str, city: str, purchaseDate: str, \
                    developer: str, buyPrice: float, rentPrice: float, bedrooms: int, \
                    bathrooms: int, receptions: int, size: float)",
        returns: "creates a new property",
    },
];

impl ToolAction {
    /// Wire name of the action, as it appears in plans.
    pub fn name(&self) -> &'static str {
        match self {
            ToolAction::GetProperties => "get_properties",
            ToolAction::GetChart => "get_chart",
            ToolAction::CreateTrelloCard => "create_trello_card",
            ToolAction::UpdatePropertyPrice => "update_property_price",
            ToolAction::CreateProperty => "create_property",
        }
    }

    /// Resolve a wire name against the registry.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "get_properties" => Some(ToolAction::GetProperties),
            "get_chart" => Some(ToolAction::GetChart),
            "create_trello_card" => Some(ToolAction::CreateTrelloCard),
            "update_property_price" => Some(ToolAction::UpdatePropertyPrice),
            "create_property" => Some(ToolAction::CreateProperty),
            _ => None,
        }
    }

    /// Category this action's result folds into.
    pub fn category(&self) -> Category {
        match self {
            ToolAction::GetProperties => Category::Properties,
            ToolAction::GetChart => Category::Chart,
            ToolAction::CreateTrelloCard => Category::Cards,
            ToolAction::UpdatePropertyPrice => Category::Updates,
            ToolAction::CreateProperty => Category::Created,
        }
    }

    /// Whether the action takes a single natural-language `query` parameter.
    ///
    /// Only these actions receive the bare-string coercion; the rule is kept
    /// deliberately narrow rather than generalized to other actions.
    pub fn takes_query(&self) -> bool {
        matches!(self, ToolAction::GetProperties | ToolAction::GetChart)
    }

    /// Canonicalize planner-supplied params for dispatch.
    ///
    /// A bare string for a query-style action becomes `{"query": s}`;
    /// absent/null params become an empty object; everything else passes
    /// through untouched.
    pub fn coerce_params(&self, params: &Value) -> Value {
        match params {
            Value::String(s) if self.takes_query() => json!({ "query": s }),
            Value::Null => json!({}),
            other => other.clone(),
        }
    }
}

impl fmt::Display for ToolAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
