//! Integration tests for the HTTP gateway
//!
//! Boots the axum app on an ephemeral port with mock LLM and tool backends
//! and exercises the REST surface with a real client.

use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use steward::config::{OpenAiConfig, ToolsConfig, TrelloConfig};
use steward::llm::openai::OpenAiProvider;
use steward::llm::LlmProvider;
use steward::orchestrator::Orchestrator;
use steward::server::{router, AppState};

async fn spawn_app(llm_server: &MockServer, tools_server: &MockServer) -> String {
    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::new(OpenAiConfig {
        base_url: llm_server.uri(),
        model: "gpt-4.1-mini".to_string(),
        api_key: Some("test-key".to_string()),
    }));

    let tools = ToolsConfig {
        properties_url: format!("{}/get_properties", tools_server.uri()),
        chart_url: format!("{}/get_charts", tools_server.uri()),
        property_api_base: format!("{}/api/properties", tools_server.uri()),
        trello: TrelloConfig {
            base_url: tools_server.uri(),
            ..TrelloConfig::default()
        },
    };

    let state = AppState::new(Arc::new(Orchestrator::new(llm, tools)));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_run_endpoint_returns_aggregate() {
    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": {
                "role": "assistant",
                "content": r#"{"tasks":[{"action":"get_properties","params":{"query":"all rents"}}]}"#
            }}]
        })))
        .mount(&llm_server)
        .await;

    let tools_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_properties"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": [{"id": 3, "rent": 950}]})),
        )
        .mount(&tools_server)
        .await;

    let base = spawn_app(&llm_server, &tools_server).await;

    let response = reqwest::Client::new()
        .post(format!("{}/run", base))
        .json(&json!({"query": "all rents"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"properties": {"result": [{"id": 3, "rent": 950}]}}));
}

#[tokio::test]
async fn test_run_endpoint_reports_planning_error() {
    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": {
                "role": "assistant",
                "content": "no plan for you"
            }}]
        })))
        .mount(&llm_server)
        .await;
    let tools_server = MockServer::start().await;

    let base = spawn_app(&llm_server, &tools_server).await;

    let response = reqwest::Client::new()
        .post(format!("{}/run", base))
        .json(&json!({"query": "anything"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Planning error:"), "got: {}", detail);
}

#[tokio::test]
async fn test_status_endpoint() {
    let llm_server = MockServer::start().await;
    let tools_server = MockServer::start().await;
    let base = spawn_app(&llm_server, &tools_server).await;

    let response = reqwest::get(format!("{}/status", base)).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "running");
    assert!(body["version"].is_string());
}
