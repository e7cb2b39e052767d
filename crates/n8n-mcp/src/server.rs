//! MCP server using rmcp SDK
//!
//! Exposes the n8n workflow tools over stdio. Every tool answers with a JSON
//! text payload; gateway failures become a `{status: "error", message}`
//! envelope rather than a protocol error.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use n8n_mcp_api_client::N8nApiClient;
use n8n_mcp_core::{
    validate_workflow, AppError, DatabaseConfig, ErrorMetadata, LogLevel, Strictness,
    ValidationOptions, Workflow,
};
use n8n_mcp_db::PostgresClient;
use n8n_mcp_services::{load_workflows, vectorize_catalog, SemanticSearchService, WorkflowCatalog};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use serde::Serialize;
use serde_json::{json, Value};

use crate::tools::*;

fn text_content(s: impl Into<String>) -> Content {
    Content {
        raw: RawContent::Text(RawTextContent { text: s.into() }),
        annotations: None,
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(value).map_err(|e| ErrorData {
        code: ErrorCode(-32603),
        message: Cow::from(e.to_string()),
        data: None,
    })?;
    Ok(CallToolResult::success(vec![text_content(text)]))
}

/// `{status: "error", message}`
pub fn error_envelope(message: impl Into<String>) -> Value {
    json!({ "status": "error", "message": message.into() })
}

fn log_app_error(context: &str, err: &AppError) {
    let code = err.error_code();
    let recoverable = err.is_recoverable();
    let error = err.detailed_message();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(code, recoverable, error = %error, "{}", context),
        LogLevel::Warn => tracing::warn!(code, recoverable, error = %error, "{}", context),
        LogLevel::Error => tracing::error!(code, recoverable, error = %error, "{}", context),
    }
}

fn app_error_envelope(context: &str, err: &AppError) -> Value {
    log_app_error(context, err);
    error_envelope(format!("{}: {}", context, err.client_message()))
}

/// Envelope for a workflow the remote API did not return.
pub fn workflow_not_found(workflow_id: &str) -> Value {
    let err = AppError::NotFound(format!("Workflow with ID {} not found.", workflow_id));
    log_app_error("Workflow lookup failed", &err);
    error_envelope(err.client_message())
}

fn to_json(value: &impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        app_error_envelope("Could not encode result", &AppError::Internal(e.to_string()))
    })
}

/// Build validation options from tool arguments. An unknown strictness falls
/// back to medium; a missing validator list selects every category.
pub fn validation_options(param: Option<ValidationOptionsParam>) -> ValidationOptions {
    let param = param.unwrap_or_default();

    let strictness = match param.strictness.as_deref() {
        None => Strictness::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unknown strictness, using medium");
            Strictness::default()
        }),
    };

    match param.validators {
        Some(names) => ValidationOptions::from_names(strictness, names),
        None => ValidationOptions {
            strictness,
            ..ValidationOptions::default()
        },
    }
}

#[derive(Clone)]
pub struct N8nMcpService {
    n8n: Arc<N8nApiClient>,
    catalog: Arc<WorkflowCatalog>,
    search: SemanticSearchService,
    database: DatabaseConfig,
    tool_router: ToolRouter<N8nMcpService>,
}

#[tool_router]
impl N8nMcpService {
    pub fn new(
        n8n: N8nApiClient,
        catalog: WorkflowCatalog,
        search: SemanticSearchService,
        database: DatabaseConfig,
    ) -> Self {
        Self {
            n8n: Arc::new(n8n),
            catalog: Arc::new(catalog),
            search,
            database,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List all workflows from n8n.")]
    async fn list_workflows(&self) -> Result<CallToolResult, ErrorData> {
        json_result(&self.n8n.list_workflows().await)
    }

    #[tool(description = "Get a specific workflow by ID.")]
    async fn get_workflow(
        &self,
        Parameters(req): Parameters<GetWorkflowRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        json_result(&self.fetch_workflow(&req.workflow_id).await)
    }

    #[tool(description = "Create a new workflow in n8n.")]
    async fn create_workflow(
        &self,
        Parameters(req): Parameters<CreateWorkflowRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .n8n
            .create_workflow(&req.workflow_data)
            .await
            .unwrap_or_else(|| error_envelope("Failed to create workflow."));
        json_result(&result)
    }

    #[tool(description = "Edit an existing workflow in n8n.")]
    async fn edit_workflow(
        &self,
        Parameters(req): Parameters<EditWorkflowRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .n8n
            .update_workflow(&req.workflow_id, &req.workflow_data)
            .await
            .unwrap_or_else(|| {
                error_envelope(format!("Failed to update workflow {}.", req.workflow_id))
            });
        json_result(&result)
    }

    #[tool(description = "Validate a workflow against best practices.")]
    async fn validate_workflow(
        &self,
        Parameters(req): Parameters<ValidateWorkflowRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        json_result(&self.validate_remote(&req.workflow_id, req.options).await)
    }

    #[tool(description = "Generate embeddings for all workflows.")]
    async fn vectorize_workflows(&self) -> Result<CallToolResult, ErrorData> {
        json_result(&self.vectorize().await)
    }

    #[tool(description = "Search for similar workflows based on a query.")]
    async fn search_similar_workflows(
        &self,
        Parameters(req): Parameters<SearchSimilarRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let top_k = req.top_k.unwrap_or(DEFAULT_TOP_K);
        json_result(&self.search_similar(&req.query, top_k).await)
    }

    #[tool(description = "Load all processed workflows into the PostgreSQL database.")]
    async fn load_workflows_to_postgres(&self) -> Result<CallToolResult, ErrorData> {
        json_result(&self.load_to_postgres().await)
    }
}

impl N8nMcpService {
    pub async fn fetch_workflow(&self, workflow_id: &str) -> Value {
        self.n8n
            .get_workflow(workflow_id)
            .await
            .unwrap_or_else(|| workflow_not_found(workflow_id))
    }

    pub async fn validate_remote(
        &self,
        workflow_id: &str,
        options: Option<ValidationOptionsParam>,
    ) -> Value {
        let Some(document) = self.n8n.get_workflow(workflow_id).await else {
            return workflow_not_found(workflow_id);
        };

        let report = validate_workflow(&Workflow::from_value(&document), &validation_options(options));
        tracing::info!(
            workflow_id = %workflow_id,
            total_issues = report.total_issues,
            "Validated workflow"
        );
        to_json(&report)
    }

    pub async fn vectorize(&self) -> Value {
        match vectorize_catalog(&self.catalog, &self.search, &self.database).await {
            Ok(outcome) => json!({
                "status": "success",
                "count": outcome.count,
                "persisted": outcome.persisted,
            }),
            Err(e) => app_error_envelope("Vectorization failed", &e),
        }
    }

    pub async fn search_similar(&self, query: &str, top_k: usize) -> Value {
        let workflows = match self.catalog.process_all().await {
            Ok(workflows) => workflows,
            Err(e) => return app_error_envelope("Could not process workflows", &e),
        };

        let results = self.search.search(query, &workflows, top_k).await;
        to_json(&results)
    }

    pub async fn load_to_postgres(&self) -> Value {
        let db = match PostgresClient::connect(&self.database).await {
            Ok(db) => db,
            Err(e) => {
                tracing::error!(error = %e, "Could not connect to PostgreSQL");
                return error_envelope("Could not connect to PostgreSQL.");
            }
        };

        let result = self.load_with(&db).await;
        db.disconnect().await;

        match result {
            Ok(count) => json!({
                "status": "success",
                "message": format!("Loaded {} workflows into PostgreSQL.", count),
            }),
            Err(e) => app_error_envelope("Loading workflows failed", &e),
        }
    }

    async fn load_with(&self, db: &PostgresClient) -> Result<usize, AppError> {
        db.ensure_schema().await?;
        let workflows = self.catalog.process_all().await?;
        let summary = load_workflows(db, &workflows).await?;
        Ok(summary.total)
    }
}

#[tool_handler]
impl ServerHandler for N8nMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "n8n-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
            instructions: Some(
                "n8n MCP: list, get, create, edit and validate n8n workflows; vectorize, \
                 search and load the local workflow catalog into PostgreSQL. \
                 Set N8N_HOST and N8N_API_KEY."
                    .to_string(),
            ),
        }
    }
}
