//! Connection lifecycle and schema management

use std::time::Duration;

use n8n_mcp_core::{AppError, DatabaseConfig};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{EmbeddingRepository, WorkflowRepository};

/// A single PostgreSQL connection, opened by [`PostgresClient::connect`] and
/// closed by [`PostgresClient::disconnect`].
#[derive(Clone)]
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(config.timeout_seconds))
            .connect(&config.database_url)
            .await?;

        tracing::info!("PostgreSQL database connection successful");
        Ok(Self { pool })
    }

    /// Create the tables (and the `vector` extension) when missing.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.into()))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn workflows(&self) -> WorkflowRepository {
        WorkflowRepository::new(self.pool.clone())
    }

    pub fn embeddings(&self) -> EmbeddingRepository {
        EmbeddingRepository::new(self.pool.clone())
    }

    pub async fn disconnect(self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL connection closed");
    }
}
