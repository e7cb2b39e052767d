//! n8n-mcp Persistence Gateway
//!
//! PostgreSQL storage for enriched workflows and their embeddings, with
//! nearest-neighbor search through pgvector.

pub mod db;

pub use db::{EmbeddingRepository, PostgresClient, WorkflowRepository};
