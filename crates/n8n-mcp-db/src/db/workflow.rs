use n8n_mcp_core::{AppError, EnrichedWorkflow};
use sqlx::types::Json;
use sqlx::PgPool;

#[derive(Clone)]
pub struct WorkflowRepository {
    pool: PgPool,
}

impl WorkflowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an enriched workflow. An existing id is left untouched.
    ///
    /// Returns `true` when a row was written.
    #[tracing::instrument(skip(self, workflow), fields(db.table = "workflows", db.operation = "insert", db.record_id = %workflow.id))]
    pub async fn insert_workflow(&self, workflow: &EnrichedWorkflow) -> Result<bool, AppError> {
        let tags: Vec<&str> = workflow.tags.iter().map(String::as_str).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO workflows (
                id, original_filename, category, name, description, tags, complexity, original_workflow
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&workflow.id)
        .bind(&workflow.original_filename)
        .bind(&workflow.category)
        .bind(&workflow.name)
        .bind(&workflow.description)
        .bind(&tags)
        .bind(Json(&workflow.complexity))
        .bind(Json(&workflow.original_workflow))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "workflows", db.operation = "count"))]
    pub async fn count_workflows(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workflows")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
