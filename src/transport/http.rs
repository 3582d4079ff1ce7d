//! HTTP tool transport
//!
//! Thin REST wrappers around the five remote tools. Each wrapper produces its
//! payload as JSON-encoded text and the transport wraps that text in a
//! content-chunk envelope (`{"content": [{"type": "text", "text": …}]}`), the
//! same shape an MCP tool session yields. The orchestrator's normalizer is
//! the only consumer and treats the envelope as opaque.

use super::{Result, ToolTransport, TransportError};
use crate::config::ToolsConfig;
use crate::tools::ToolAction;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

pub struct HttpToolTransport {
    config: ToolsConfig,
    client: reqwest::Client,
}

impl HttpToolTransport {
    pub fn new(config: ToolsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Fetch property records for a natural-language query.
    async fn get_properties(&self, params: &Value) -> Result<String> {
        let query = str_param(params, "query");
        info!("get_properties called with query={}", query);

        let data = self
            .post_json(&self.config.properties_url, &json!({ "question": query }))
            .await?;

        encode(&data)
    }

    /// Fetch matching records, then ask the visualise endpoint for a chart.
    async fn get_chart(&self, params: &Value) -> Result<String> {
        let query = str_param(params, "query");
        info!("get_chart called with query={}", query);

        let prop_data = self
            .post_json(&self.config.chart_url, &json!({ "question": query }))
            .await?;
        let records = prop_data
            .get("result")
            .cloned()
            .unwrap_or_else(|| json!([]));

        let payload = json!({ "question": query, "data": records });
        debug!("posting to visualise endpoint: {}", payload);

        let result = self.post_json(&self.config.chart_url, &payload).await?;
        encode(&result)
    }

    /// Create a Trello card and report its URL as plain text.
    async fn create_trello_card(&self, params: &Value) -> Result<String> {
        let name = str_param(params, "name");
        let desc = str_param(params, "desc");
        info!("create_trello_card called: name={}", name);

        let trello = &self.config.trello;
        let url = format!("{}/cards", trello.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[
                ("key", trello.key.as_str()),
                ("token", trello.token.as_str()),
                ("idList", trello.list_id.as_str()),
                ("name", name),
                ("desc", desc),
            ])
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let card = check_status(response).await?;
        let card_url = card.get("url").and_then(|u| u.as_str()).unwrap_or_default();
        info!(
            "created Trello card id={} url={}",
            card.get("id").and_then(|i| i.as_str()).unwrap_or("?"),
            card_url
        );

        Ok(format!("Card created: {}", card_url))
    }

    /// Update the rent price of a property by its ID.
    async fn update_property_price(&self, params: &Value) -> Result<String> {
        let id = params.get("id").and_then(|v| v.as_i64()).unwrap_or(0);
        let rent_price = params
            .get("rent_price")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let reason = str_param(params, "reason");
        info!(
            "update_property_price called with id={}, rent_price={}, reason={}",
            id, rent_price, reason
        );

        let url = format!("{}/{}", self.config.property_api_base, id);
        let payload = json!({ "id": id, "rentPrice": rent_price, "reason": reason });

        let response = self
            .client
            .put(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let updated = check_status(response).await?;
        info!("property {} updated successfully", id);
        encode(&updated)
    }

    /// Create a new property, forwarding the planner-supplied payload.
    async fn create_property(&self, params: &Value) -> Result<String> {
        info!("create_property called with {}", params);

        let created = self
            .post_json(&self.config.property_api_base, params)
            .await?;
        info!("property created successfully: {}", created);
        encode(&created)
    }

    async fn post_json(&self, url: &str, payload: &Value) -> Result<Value> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        check_status(response).await
    }
}

/// Surface a non-2xx response as a remote error, otherwise decode JSON.
async fn check_status(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Remote {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| TransportError::InvalidResponse(e.to_string()))
}

fn str_param<'a>(params: &'a Value, key: &str) -> &'a str {
    params.get(key).and_then(|v| v.as_str()).unwrap_or_default()
}

fn encode(value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(|e| TransportError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl ToolTransport for HttpToolTransport {
    async fn call(&self, action: ToolAction, params: Value) -> Result<Value> {
        let text = match action {
            ToolAction::GetProperties => self.get_properties(&params).await?,
            ToolAction::GetChart => self.get_chart(&params).await?,
            ToolAction::CreateTrelloCard => self.create_trello_card(&params).await?,
            ToolAction::UpdatePropertyPrice => self.update_property_price(&params).await?,
            ToolAction::CreateProperty => self.create_property(&params).await?,
        };

        Ok(json!({ "content": [{ "type": "text", "text": text }] }))
    }
}
