// Steward Agent Gateway
// Main entry point for the steward binary

use clap::Parser;
use std::sync::Arc;
use steward::cli::{Cli, Command};
use steward::config::Config;
use steward::llm::openai::OpenAiProvider;
use steward::llm::LlmProvider;
use steward::orchestrator::Orchestrator;
use steward::telemetry::{init_telemetry, init_telemetry_with_level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize basic telemetry first (before config is loaded)
    init_telemetry();

    tracing::info!("Steward Gateway v{}", env!("CARGO_PKG_VERSION"));

    let mut config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_create()?
    };

    // Re-initialize telemetry with the configured log level
    // (only takes effect if RUST_LOG env var is not set)
    let log_level = cli.log.unwrap_or_else(|| config.core.log_level.clone());
    init_telemetry_with_level(&log_level);

    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::new(config.llm.openai.clone()));
    if !llm.check_health().await {
        tracing::warn!("plan producer is not ready; set OPENAI_API_KEY");
    }

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let orchestrator = Arc::new(Orchestrator::new(llm, config.tools.clone()));
            steward::server::serve(&config.server, orchestrator).await
        }

        Command::Run { query } => {
            tracing::info!("executing query: {}", query);
            let orchestrator = Orchestrator::new(llm, config.tools.clone());
            let response = orchestrator.run(&query).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::Value::Object(response))?
            );
            Ok(())
        }
    }
}
