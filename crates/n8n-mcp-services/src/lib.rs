//! n8n-mcp Services Layer
//!
//! Orchestration between the pure core and the I/O collaborators: the
//! embedding service, the on-disk workflow catalog, in-memory similarity
//! search and loading enriched workflows into PostgreSQL. The CLI and the MCP
//! server both go through this crate.

pub mod services;

pub use services::{
    catalog::{read_workflow_file, WorkflowCatalog, SUMMARY_FILE},
    embedding::{normalize_embedding_dim, EmbeddingProvider, OllamaEmbeddingClient, EMBEDDING_DIM},
    loader::{load_workflows, store_embeddings, vectorize_catalog, LoadSummary, VectorizeOutcome},
    semantic_search::SemanticSearchService,
};
