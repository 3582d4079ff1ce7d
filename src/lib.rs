//! Steward Agent Gateway Library
//!
//! This library provides the core functionality of the Steward gateway:
//! turning a natural-language query into a JSON plan of tool invocations,
//! executing that plan against remote property-management tools, and
//! aggregating the results. It is used by both the main binary and
//! integration tests.

/// Configuration management module
pub mod config;

/// LLM provider abstraction layer
pub mod llm;

/// Plan-then-execute orchestration module
pub mod orchestrator;

/// HTTP server module
pub mod server;

/// Telemetry and Observability
pub mod telemetry;

/// Tool registry: the fixed catalog of invocable remote procedures
pub mod tools;

/// Tool transport layer for dispatching calls to remote tools
pub mod transport;

/// CLI interface module
pub mod cli;
