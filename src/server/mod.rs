//! HTTP server
//!
//! Exposes the orchestrator over REST:
//!
//! - `POST /run` — accept `{query}`, plan and run the tool invocations, and
//!   return the aggregated results. Planning failures come back as 500 with
//!   a `detail` field; everything else is a best-effort 200.
//! - `GET /status` — liveness probe with the crate version.

use crate::config::ServerConfig;
use crate::orchestrator::Orchestrator;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// Inbound run request
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub query: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/run", post(run_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: &ServerConfig, orchestrator: Arc<Orchestrator>) -> anyhow::Result<()> {
    let app = router(AppState::new(orchestrator));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down gracefully");
        })
        .await?;

    Ok(())
}

/// Run a query through the orchestrator.
async fn run_handler(State(state): State<AppState>, Json(request): Json<RunRequest>) -> Response {
    match state.orchestrator.run(&request.query).await {
        Ok(aggregate) => Json(Value::Object(aggregate)).into_response(),
        Err(e) => {
            error!("planning failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": format!("Planning error: {}", e) })),
            )
                .into_response()
        }
    }
}

/// Server status endpoint
async fn status_handler() -> Json<Value> {
    Json(json!({
        "status": "running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
