//! MCP tool request types with JSON Schema for AI parameter generation

use schemars::JsonSchema;
use serde::Deserialize;

pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetWorkflowRequest {
    #[schemars(description = "ID of the n8n workflow")]
    pub workflow_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateWorkflowRequest {
    #[schemars(description = "Workflow definition (name, nodes, connections, settings)")]
    pub workflow_data: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EditWorkflowRequest {
    #[schemars(description = "ID of the workflow to update")]
    pub workflow_id: String,
    #[schemars(description = "Full replacement workflow definition")]
    pub workflow_data: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ValidationOptionsParam {
    #[schemars(description = "Validation strictness: low, medium or high (default medium)")]
    pub strictness: Option<String>,
    #[schemars(
        description = "Categories to run: naming, errorHandling, security, performance, documentation (default all)"
    )]
    pub validators: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateWorkflowRequest {
    #[schemars(description = "ID of the n8n workflow to validate")]
    pub workflow_id: String,
    #[schemars(description = "Validation options")]
    pub options: Option<ValidationOptionsParam>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchSimilarRequest {
    #[schemars(description = "Free-text description of the workflow to look for")]
    pub query: String,
    #[schemars(description = "Maximum number of results to return (default 5)")]
    pub top_k: Option<usize>,
}
