//! n8n MCP Server
//!
//! Model Context Protocol server for n8n workflows over stdio.
//! Run with: N8N_HOST=xxx N8N_API_KEY=xxx n8n-mcp

use std::sync::Arc;

use anyhow::Context;
use n8n_mcp::{N8nApiClient, N8nMcpService};
use n8n_mcp_core::Config;
use n8n_mcp_infra::{init_telemetry, shutdown_telemetry, LogTarget, TelemetryConfig};
use n8n_mcp_services::{OllamaEmbeddingClient, SemanticSearchService, WorkflowCatalog};
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol
    init_telemetry(&TelemetryConfig::from_env(LogTarget::Stderr))?;

    let config = Config::from_env().context("Failed to load configuration")?;

    let n8n = N8nApiClient::from_config(&config.n8n)
        .context("Failed to create n8n API client. Set N8N_API_KEY and N8N_HOST")?;
    let embeddings = OllamaEmbeddingClient::new(&config.embedding)?;

    let service = N8nMcpService::new(
        n8n,
        WorkflowCatalog::new(&config.catalog),
        SemanticSearchService::new(Arc::new(embeddings)),
        config.database.clone(),
    );

    tracing::info!("Starting n8n MCP server on stdio");
    let running = service.serve(stdio()).await.context("MCP transport failed")?;
    running.waiting().await.context("MCP server error")?;

    shutdown_telemetry();
    Ok(())
}
