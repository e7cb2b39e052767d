//! n8n-mcp Core Library
//!
//! This crate provides the workflow model, model extraction (category, description,
//! tags, complexity), the rule-based validation engine, similarity ranking,
//! configuration and the error types shared across all n8n-mcp components.
//!
//! Everything except [`Config::from_env`] is a pure computation over in-memory
//! structures.

pub mod config;
pub mod constants;
pub mod error;
pub mod extraction;
pub mod models;
pub mod similarity;
pub mod validation;

// Re-export commonly used types
pub use config::{CatalogConfig, Config, DatabaseConfig, EmbeddingConfig, N8nConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use extraction::enrich_workflow;
pub use models::{
    original_document, CategoryResult, Complexity, ComplexityMetrics, EnrichedWorkflow, Node,
    NodeKind, SimilarWorkflow, ValidationReport, Workflow, WorkflowRef, WorkflowTag,
};
pub use similarity::{cosine_similarity, rank};
pub use validation::{validate_workflow, Strictness, ValidationOptions, ValidatorKind};
