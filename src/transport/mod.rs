//! Tool Transport Layer
//!
//! The session abstraction the executor dispatches tool calls through. A
//! transport is established once per request and dropped when the request
//! finishes; it returns raw, opaquely-shaped results that the orchestrator's
//! normalizer flattens. Errors here are task-scoped: the executor logs them
//! and moves on to the next task.

use crate::tools::ToolAction;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod http;

pub use http::HttpToolTransport;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while invoking a remote tool
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("remote call failed with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Request-scoped channel to the remote tools.
///
/// `call` takes the resolved action and its canonical parameters and returns
/// whatever the remote side produced, untyped. Implementations must not
/// retry; retry policy is explicitly out of scope.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    async fn call(&self, action: ToolAction, params: Value) -> Result<Value>;
}
