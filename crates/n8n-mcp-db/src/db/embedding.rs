use std::collections::BTreeSet;

use chrono::Utc;
use n8n_mcp_core::{AppError, ComplexityMetrics, EnrichedWorkflow, SimilarWorkflow};
use pgvector::Vector;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct EmbeddingRepository {
    pool: PgPool,
}

impl EmbeddingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store the embedding of a workflow, replacing any previous one.
    #[tracing::instrument(skip(self, embedding_vec), fields(db.table = "workflow_embeddings", db.operation = "upsert", db.record_id = %workflow_id))]
    pub async fn upsert_embedding(
        &self,
        workflow_id: &str,
        embedding_vec: Vec<f32>,
    ) -> Result<(), AppError> {
        let vector = Vector::from(embedding_vec);

        sqlx::query(
            r#"
            INSERT INTO workflow_embeddings (workflow_id, embedding, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (workflow_id)
            DO UPDATE SET
                embedding = EXCLUDED.embedding,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(workflow_id)
        .bind(vector)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The `limit` workflows nearest to `query_embedding`, closest first.
    ///
    /// Scores are cosine similarities (`1 - cosine distance`).
    #[tracing::instrument(skip(self, query_embedding), fields(db.table = "workflow_embeddings", db.operation = "vector_search", db.limit = %limit))]
    pub async fn search_similar(
        &self,
        query_embedding: Vec<f32>,
        limit: i64,
    ) -> Result<Vec<SimilarWorkflow>, AppError> {
        let vector = Vector::from(query_embedding);

        let rows = sqlx::query(
            r#"
            SELECT
                w.id,
                COALESCE(w.original_filename, '') AS original_filename,
                COALESCE(w.category, '') AS category,
                COALESCE(w.name, '') AS name,
                COALESCE(w.description, '') AS description,
                COALESCE(w.tags, '{}') AS tags,
                w.complexity,
                w.original_workflow,
                1 - (e.embedding <=> $1) AS similarity
            FROM workflow_embeddings e
            JOIN workflows w ON w.id = e.workflow_id
            ORDER BY e.embedding <=> $1
            LIMIT $2
            "#,
        )
        .bind(vector)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(similar_from_row).collect()
    }

    #[tracing::instrument(skip(self), fields(db.table = "workflow_embeddings", db.operation = "count"))]
    pub async fn count_embeddings(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workflow_embeddings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

fn similar_from_row(row: &PgRow) -> Result<SimilarWorkflow, AppError> {
    let tags: Vec<String> = row.try_get("tags")?;
    let complexity: Json<ComplexityMetrics> = row.try_get("complexity")?;
    let original_workflow: Option<serde_json::Value> = row.try_get("original_workflow")?;
    let similarity: f64 = row.try_get("similarity")?;

    Ok(SimilarWorkflow {
        score: similarity as f32,
        workflow: EnrichedWorkflow {
            id: row.try_get("id")?,
            original_filename: row.try_get("original_filename")?,
            category: row.try_get("category")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            tags: tags.into_iter().collect::<BTreeSet<_>>(),
            complexity: complexity.0,
            original_workflow: original_workflow.unwrap_or_default(),
        },
    })
}
