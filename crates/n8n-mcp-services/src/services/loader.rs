//! Loading enriched workflows and their embeddings into PostgreSQL.

use n8n_mcp_core::{AppError, DatabaseConfig, EnrichedWorkflow};
use n8n_mcp_db::PostgresClient;
use serde::Serialize;

use super::catalog::WorkflowCatalog;
use super::embedding::normalize_embedding_dim;
use super::semantic_search::SemanticSearchService;

/// Outcome of [`load_workflows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Workflows submitted
    pub total: usize,
    /// Rows actually written; existing ids are left as they were
    pub inserted: usize,
    /// Rows in the `workflows` table afterwards
    pub stored: i64,
}

/// Outcome of [`vectorize_catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VectorizeOutcome {
    /// Workflows that received an embedding
    pub count: usize,
    /// Whether the embeddings reached the store
    pub persisted: bool,
}

/// Insert every workflow. Existing ids are not updated.
pub async fn load_workflows(
    db: &PostgresClient,
    workflows: &[EnrichedWorkflow],
) -> Result<LoadSummary, AppError> {
    let repo = db.workflows();
    let mut inserted = 0;
    for workflow in workflows {
        if repo.insert_workflow(workflow).await? {
            inserted += 1;
        }
    }

    let stored = repo.count_workflows().await?;
    tracing::info!(total = workflows.len(), inserted, stored, "Loaded workflows into PostgreSQL");
    Ok(LoadSummary {
        total: workflows.len(),
        inserted,
        stored,
    })
}

/// Store one embedding per workflow, inserting the workflow row first when missing.
pub async fn store_embeddings(
    db: &PostgresClient,
    items: Vec<(&EnrichedWorkflow, Vec<f32>)>,
) -> Result<usize, AppError> {
    let workflows = db.workflows();
    let embeddings = db.embeddings();
    let mut stored = 0;
    for (workflow, embedding) in items {
        workflows.insert_workflow(workflow).await?;
        embeddings
            .upsert_embedding(&workflow.id, normalize_embedding_dim(embedding))
            .await?;
        stored += 1;
    }
    Ok(stored)
}

/// Stored count and the table total afterwards.
async fn persist_embeddings(
    db: &PostgresClient,
    items: Vec<(&EnrichedWorkflow, Vec<f32>)>,
) -> Result<(usize, i64), AppError> {
    db.ensure_schema().await?;
    let stored = store_embeddings(db, items).await?;
    let total = db.embeddings().count_embeddings().await?;
    Ok((stored, total))
}

/// Process the catalog, embed every description and, when the store is
/// reachable, persist workflows and embeddings.
///
/// An unreachable store is logged and reported through `persisted`.
pub async fn vectorize_catalog(
    catalog: &WorkflowCatalog,
    search: &SemanticSearchService,
    database: &DatabaseConfig,
) -> Result<VectorizeOutcome, AppError> {
    let workflows = catalog.process_all().await?;
    let embedded = search.vectorize(&workflows).await;
    let count = embedded.len();

    let db = match PostgresClient::connect(database).await {
        Ok(db) => db,
        Err(e) => {
            tracing::warn!(error = %e, "Could not connect to PostgreSQL, embeddings not persisted");
            return Ok(VectorizeOutcome {
                count,
                persisted: false,
            });
        }
    };

    let items = embedded
        .into_iter()
        .map(|(index, embedding)| (&workflows[index], embedding))
        .collect();
    let result = persist_embeddings(&db, items).await;
    db.disconnect().await;

    let (stored, total) = result?;
    tracing::info!(stored, total, "Persisted workflow embeddings");
    Ok(VectorizeOutcome {
        count,
        persisted: true,
    })
}
